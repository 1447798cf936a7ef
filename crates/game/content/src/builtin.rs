//! Content compiled into the binary, used when no data directory is set.

use game_core::{GameConfig, RebuildReport, SpellCatalog, SpellRecord};

use crate::loaders::{ConfigLoader, LoadResult, SpellBookLoader};

const DEFAULT_SPELLS: &str = include_str!("../data/spells.ron");
const DEFAULT_CONFIG: &str = include_str!("../data/config.toml");

/// Records of the built-in spell book.
pub fn default_spell_records() -> LoadResult<Vec<SpellRecord>> {
    Ok(SpellBookLoader::parse(DEFAULT_SPELLS)?.spells)
}

/// Catalog built from the built-in spell book.
pub fn default_catalog() -> LoadResult<(SpellCatalog, RebuildReport)> {
    Ok(SpellCatalog::from_records(default_spell_records()?))
}

/// The built-in rules configuration.
pub fn default_config() -> LoadResult<GameConfig> {
    ConfigLoader::parse(DEFAULT_CONFIG)
}
