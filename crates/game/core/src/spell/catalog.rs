//! Spell catalog for recipe lookup.
//!
//! The `SpellCatalog` stores every castable spell keyed by its canonical
//! recipe. Lookup is symmetric in the element order and never mutates state.

use std::collections::BTreeMap;

use crate::element::{Element, ElementPair, RecipeKey};

use super::definition::{Spell, SpellDefinitionError, SpellRecord};

/// Catalog of spells keyed by recipe.
///
/// ## Example
///
/// ```
/// use game_core::{Effect, Element, Spell, SpellCatalog};
///
/// let catalog = SpellCatalog::from_spells([Spell::new(
///     "F+W",
///     "Steam Burst",
///     Element::Fire,
///     Element::Water,
///     vec![Effect::damage(3)],
/// )]);
///
/// let found = catalog.find(Element::Water, Element::Fire).unwrap();
/// assert_eq!(found.display_name(), "Steam Burst");
/// assert!(catalog.find(Element::Wind, Element::Wind).is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpellCatalog {
    spells: BTreeMap<RecipeKey, Spell>,
}

/// A record rejected during [`SpellCatalog::rebuild`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscardedSpell {
    /// Position of the record in the supplied list.
    pub index: usize,
    pub id: String,
    pub error: SpellDefinitionError,
}

/// Outcome of a catalog rebuild.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RebuildReport {
    /// Number of spells in the catalog after the rebuild.
    pub loaded: usize,
    /// Recipes defined more than once; the later record won.
    pub overridden: Vec<RecipeKey>,
    pub discarded: Vec<DiscardedSpell>,
}

impl RebuildReport {
    pub fn is_clean(&self) -> bool {
        self.overridden.is_empty() && self.discarded.is_empty()
    }
}

impl SpellCatalog {
    /// Create an empty catalog. Every lookup misfires.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from validated spells. Later spells replace earlier
    /// ones with the same recipe.
    pub fn from_spells(spells: impl IntoIterator<Item = Spell>) -> Self {
        let spells = spells
            .into_iter()
            .map(|spell| (spell.recipe(), spell))
            .collect();
        Self { spells }
    }

    /// Build a catalog from raw records, discarding malformed ones.
    pub fn from_records(records: impl IntoIterator<Item = SpellRecord>) -> (Self, RebuildReport) {
        let mut catalog = Self::new();
        let report = catalog.rebuild(records);
        (catalog, report)
    }

    /// Replace the whole catalog from raw records.
    ///
    /// The new map is built aside and swapped in at the end, so the catalog
    /// is never observed half-rebuilt. Malformed records are skipped and
    /// reported.
    pub fn rebuild(&mut self, records: impl IntoIterator<Item = SpellRecord>) -> RebuildReport {
        let mut spells = BTreeMap::new();
        let mut report = RebuildReport::default();

        for (index, record) in records.into_iter().enumerate() {
            let id = record.id.clone();
            match Spell::try_from(record) {
                Ok(spell) => {
                    let recipe = spell.recipe();
                    if spells.insert(recipe, spell).is_some() {
                        report.overridden.push(recipe);
                    }
                }
                Err(error) => report.discarded.push(DiscardedSpell { index, id, error }),
            }
        }

        report.loaded = spells.len();
        self.spells = spells;
        report
    }

    /// Look up the spell cast by `a` and `b`, in either order.
    ///
    /// Returns `None` for an undefined recipe (a misfire).
    #[must_use]
    pub fn find(&self, a: Element, b: Element) -> Option<&Spell> {
        self.spells.get(&RecipeKey::new(a, b))
    }

    #[must_use]
    pub fn find_pair(&self, pair: ElementPair) -> Option<&Spell> {
        self.spells.get(&pair.recipe())
    }

    #[must_use]
    pub fn get(&self, recipe: RecipeKey) -> Option<&Spell> {
        self.spells.get(&recipe)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// Iterate spells in canonical recipe order.
    pub fn iter(&self) -> impl Iterator<Item = &Spell> {
        self.spells.values()
    }

    /// Recipes with no spell defined.
    pub fn missing_recipes(&self) -> Vec<RecipeKey> {
        RecipeKey::all()
            .filter(|recipe| !self.spells.contains_key(recipe))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spell::{Effect, EffectKind, EffectRecord};

    fn record(id: &str, a: Element, b: Element, value: i32) -> SpellRecord {
        SpellRecord {
            id: id.into(),
            display_name: format!("{id} spell"),
            first: a,
            second: b,
            effects: vec![EffectRecord::new(EffectKind::Damage, value)],
        }
    }

    #[test]
    fn lookup_is_symmetric_for_every_pair() {
        let (catalog, report) = SpellCatalog::from_records(
            RecipeKey::all()
                .map(|key| record(&key.to_string(), key.high(), key.low(), 1))
                .collect::<Vec<_>>(),
        );
        assert!(report.is_clean());
        assert_eq!(catalog.len(), 10);

        for a in Element::all() {
            for b in Element::all() {
                assert_eq!(catalog.find(a, b), catalog.find(b, a));
                assert!(catalog.find(a, b).is_some());
            }
        }
    }

    #[test]
    fn undefined_recipe_misfires() {
        let catalog = SpellCatalog::from_spells([Spell::new(
            "F+F",
            "Great Fireball",
            Element::Fire,
            Element::Fire,
            vec![Effect::damage(6)],
        )]);
        assert!(catalog.find(Element::Wind, Element::Earth).is_none());
        assert_eq!(catalog.missing_recipes().len(), 9);
    }

    #[test]
    fn rebuild_discards_malformed_and_replaces_everything() {
        let mut catalog = SpellCatalog::from_spells([Spell::new(
            "old",
            "Old Spell",
            Element::Wind,
            Element::Wind,
            vec![Effect::haste()],
        )]);

        let report = catalog.rebuild(vec![
            record("F+F", Element::Fire, Element::Fire, 6),
            record("bad", Element::Water, Element::Water, -4),
            record("W+E", Element::Water, Element::Earth, 2),
        ]);

        assert_eq!(report.loaded, 2);
        assert_eq!(report.discarded.len(), 1);
        assert_eq!(report.discarded[0].index, 1);
        assert_eq!(report.discarded[0].id, "bad");
        assert!(catalog.find(Element::Wind, Element::Wind).is_none());
        assert!(catalog.find(Element::Earth, Element::Water).is_some());
    }

    #[test]
    fn later_record_overrides_same_recipe() {
        let (catalog, report) = SpellCatalog::from_records(vec![
            record("first", Element::Fire, Element::Water, 1),
            record("second", Element::Water, Element::Fire, 2),
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.find(Element::Fire, Element::Water).unwrap().id(),
            "second"
        );
        assert_eq!(
            report.overridden,
            vec![RecipeKey::new(Element::Fire, Element::Water)]
        );
    }
}
