//! Content factory for loading duel content from a data directory.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, RebuildReport, SpellCatalog};

use crate::loaders::{ConfigLoader, LoadResult, SpellBook, SpellBookLoader};

/// Content factory that loads all duel content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── spells.ron
/// ```
///
/// Either file may be absent, in which case the built-in content is used.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or the built-in defaults.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            crate::builtin::default_config()
        }
    }

    /// Load the raw spell book from `spells.ron`.
    pub fn load_spell_book(&self) -> LoadResult<SpellBook> {
        SpellBookLoader::load(&self.spells_path())
    }

    /// Build the spell catalog from `spells.ron`, or the built-in book.
    pub fn load_catalog(&self) -> LoadResult<(SpellCatalog, RebuildReport)> {
        let path = self.spells_path();
        if path.exists() {
            SpellBookLoader::load_catalog(&path)
        } else {
            tracing::debug!(
                target: "content::spells",
                path = %path.display(),
                "No spell book in data directory; using built-in book"
            );
            crate::builtin::default_catalog()
        }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn spells_path(&self) -> PathBuf {
        self.data_dir.join("spells.ron")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
