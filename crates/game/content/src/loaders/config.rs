//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse config TOML from a string.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        let max_hp = config.max_hp;
        Ok(config.with_max_hp(max_hp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Element, ElementPair};

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("max_hp = 30\n").unwrap();
        assert_eq!(config.max_hp, 30);
        assert_eq!(config.pick_time_limit_ms, GameConfig::DEFAULT_PICK_TIME_LIMIT_MS);
        assert_eq!(config.forced_pick, GameConfig::DEFAULT_FORCED_PICK);
    }

    #[test]
    fn forced_pick_table() {
        let config = ConfigLoader::parse(
            "[forced_pick]\nfirst = \"Fire\"\nsecond = \"Water\"\n",
        )
        .unwrap();
        assert_eq!(
            config.forced_pick,
            ElementPair::new(Element::Fire, Element::Water)
        );
    }

    #[test]
    fn non_positive_hp_is_raised() {
        let config = ConfigLoader::parse("max_hp = 0\n").unwrap();
        assert_eq!(config.max_hp, 1);
    }

    #[test]
    fn rejects_garbage() {
        assert!(ConfigLoader::parse("max_hp = \"lots\"").is_err());
    }
}
