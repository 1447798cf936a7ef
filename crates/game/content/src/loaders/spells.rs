//! Spell book loader.
//!
//! A spell book is a RON file holding an ordered list of raw spell records:
//!
//! ```ron
//! (
//!     spells: [
//!         (
//!             id: "fire_fire",
//!             display_name: "Great Fireball",
//!             first: Fire,
//!             second: Fire,
//!             effects: [(kind: Damage, value: 6)],
//!         ),
//!     ],
//! )
//! ```
//!
//! `value` defaults to 0 and `duration` to 1. Records are not validated here;
//! [`game_core::SpellCatalog::rebuild`] discards malformed ones and reports
//! them.

use std::path::Path;

use game_core::{RebuildReport, SpellCatalog, SpellRecord};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Top-level layout of `spells.ron`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellBook {
    pub spells: Vec<SpellRecord>,
}

/// Loader for spell books from RON files.
pub struct SpellBookLoader;

impl SpellBookLoader {
    /// Load a spell book from a RON file.
    pub fn load(path: &Path) -> LoadResult<SpellBook> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell book RON at {:?}: {}", path, e))
    }

    /// Parse a spell book from a RON string.
    pub fn parse(content: &str) -> LoadResult<SpellBook> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse spell book RON: {}", e))
    }

    /// Load a spell book and build a catalog from it.
    ///
    /// Malformed records are skipped with a warning; the file as a whole only
    /// fails to load when it cannot be read or parsed.
    pub fn load_catalog(path: &Path) -> LoadResult<(SpellCatalog, RebuildReport)> {
        let book = Self::load(path)?;
        let (catalog, report) = SpellCatalog::from_records(book.spells);
        log_report(path, &report);
        Ok((catalog, report))
    }
}

fn log_report(path: &Path, report: &RebuildReport) {
    for discarded in &report.discarded {
        tracing::warn!(
            target: "content::spells",
            path = %path.display(),
            index = discarded.index,
            id = %discarded.id,
            error = %discarded.error,
            "Discarded malformed spell record"
        );
    }
    for recipe in &report.overridden {
        tracing::warn!(
            target: "content::spells",
            path = %path.display(),
            %recipe,
            "Recipe defined more than once; later record wins"
        );
    }
    tracing::debug!(
        target: "content::spells",
        path = %path.display(),
        loaded = report.loaded,
        "Spell book loaded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{EffectKind, Element};

    #[test]
    fn parses_defaults_for_value_and_duration() {
        let book = SpellBookLoader::parse(
            r#"(spells: [(
                id: "wind_wind",
                display_name: "Tailwind",
                first: Wind,
                second: Wind,
                effects: [(kind: Haste), (kind: Damage, value: 2)],
            )])"#,
        )
        .unwrap();

        let record = &book.spells[0];
        assert_eq!(record.first, Element::Wind);
        assert_eq!(record.effects[0].kind, EffectKind::Haste);
        assert_eq!(record.effects[0].value, 0);
        assert_eq!(record.effects[0].duration, 1);
        assert_eq!(record.effects[1].value, 2);
    }

    #[test]
    fn unknown_element_fails_to_parse() {
        let err = SpellBookLoader::parse(
            r#"(spells: [(id: "x", display_name: "X", first: Lightning, second: Fire, effects: [])])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to parse spell book RON"));
    }
}
