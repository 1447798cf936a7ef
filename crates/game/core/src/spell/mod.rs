//! Spells and the catalog that maps recipes to them.
//!
//! - [`Effect`]: one step of a spell (kind + magnitude + duration)
//! - [`Spell`]: validated, immutable spell definition
//! - [`SpellRecord`]: raw definition as supplied by content data
//! - [`SpellCatalog`]: recipe → spell lookup, rebuilt atomically from records

mod catalog;
mod definition;
mod effect;

pub use catalog::{DiscardedSpell, RebuildReport, SpellCatalog};
pub use definition::{EffectRecord, Spell, SpellDefinitionError, SpellRecord};
pub use effect::{Effect, EffectKind};
