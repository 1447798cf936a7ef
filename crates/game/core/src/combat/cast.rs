use core::fmt;

use crate::element::ElementPair;
use crate::spell::{Spell, SpellCatalog};

/// What one side brought to a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cast {
    /// The side was stunned and could not pick.
    Stunned,
    /// The picked pair has no spell in the catalog.
    Misfire(ElementPair),
    Spell(Spell),
}

impl Cast {
    /// Resolve `pair` against `catalog`. A missing pair means the side was
    /// stunned.
    pub fn resolve(pair: Option<ElementPair>, catalog: &SpellCatalog) -> Self {
        match pair {
            None => Cast::Stunned,
            Some(pair) => match catalog.find_pair(pair) {
                Some(spell) => Cast::Spell(spell.clone()),
                None => Cast::Misfire(pair),
            },
        }
    }

    pub fn spell(&self) -> Option<&Spell> {
        match self {
            Cast::Spell(spell) => Some(spell),
            Cast::Stunned | Cast::Misfire(_) => None,
        }
    }
}

/// Short label used in turn summaries.
impl fmt::Display for Cast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cast::Stunned => f.write_str("stunned"),
            Cast::Misfire(pair) => write!(f, "misfire ({pair})"),
            Cast::Spell(spell) => f.write_str(spell.display_name()),
        }
    }
}
