//! Data-driven duel content and its loaders.
//!
//! This crate supplies the data the rules engine runs on:
//! - Spell books (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//! - A built-in default spell book covering every recipe
//!
//! Content is handed to `game-core` as raw [`game_core::SpellRecord`]s and a
//! [`game_core::GameConfig`]; validation happens when the catalog is built.

#[cfg(feature = "loaders")]
pub mod builtin;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use builtin::{default_catalog, default_config, default_spell_records};
#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, SpellBook, SpellBookLoader};
