//! Elements and the pairs they form.
//!
//! A side picks two [`Element`]s per turn. The picked order is kept in an
//! [`ElementPair`] for display, while spell lookup goes through the
//! order-independent [`RecipeKey`].

use core::fmt;

use strum::IntoEnumIterator;

/// One of the four base picks.
///
/// The declaration order (Fire < Water < Wind < Earth) is the fixed total
/// order used to normalize recipe keys. It carries no gameplay meaning.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Element {
    Fire,
    Water,
    Wind,
    Earth,
}

impl Element {
    /// Every element, in canonical order.
    pub fn all() -> impl Iterator<Item = Element> {
        Element::iter()
    }
}

/// Two elements in the order a side picked them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementPair {
    pub first: Element,
    pub second: Element,
}

impl ElementPair {
    pub const fn new(first: Element, second: Element) -> Self {
        Self { first, second }
    }

    /// Canonical lookup key for this pair.
    pub fn recipe(self) -> RecipeKey {
        RecipeKey::new(self.first, self.second)
    }

    /// True when both pairs name the same recipe, regardless of pick order.
    pub fn same_recipe(self, other: ElementPair) -> bool {
        self.recipe() == other.recipe()
    }
}

impl fmt::Display for ElementPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.first, self.second)
    }
}

/// Unordered element pair normalized to canonical order.
///
/// `RecipeKey::new(a, b) == RecipeKey::new(b, a)` for every pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecipeKey {
    low: Element,
    high: Element,
}

impl RecipeKey {
    pub fn new(a: Element, b: Element) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub const fn low(self) -> Element {
        self.low
    }

    pub const fn high(self) -> Element {
        self.high
    }

    /// All ten distinct recipes, in canonical order.
    pub fn all() -> impl Iterator<Item = RecipeKey> {
        Element::iter().flat_map(|low| {
            Element::iter()
                .filter(move |high| low <= *high)
                .map(move |high| RecipeKey { low, high })
        })
    }
}

impl From<ElementPair> for RecipeKey {
    fn from(pair: ElementPair) -> Self {
        pair.recipe()
    }
}

impl fmt::Display for RecipeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn recipe_key_is_order_independent() {
        for a in Element::all() {
            for b in Element::all() {
                assert_eq!(RecipeKey::new(a, b), RecipeKey::new(b, a));
            }
        }
    }

    #[test]
    fn recipe_key_normalizes_to_canonical_order() {
        let key = RecipeKey::new(Element::Earth, Element::Fire);
        assert_eq!(key.low(), Element::Fire);
        assert_eq!(key.high(), Element::Earth);
    }

    #[test]
    fn there_are_ten_recipes() {
        let all: Vec<_> = RecipeKey::all().collect();
        assert_eq!(all.len(), 10);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn elements_parse_case_insensitively() {
        assert_eq!(Element::from_str("fire").unwrap(), Element::Fire);
        assert_eq!(Element::from_str("WIND").unwrap(), Element::Wind);
        assert!(Element::from_str("lightning").is_err());
    }

    #[test]
    fn same_recipe_ignores_pick_order() {
        let a = ElementPair::new(Element::Water, Element::Fire);
        let b = ElementPair::new(Element::Fire, Element::Water);
        assert!(a.same_recipe(b));
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "Water + Fire");
    }
}
