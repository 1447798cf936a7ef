//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Settings for the composition root, separate from [`runtime::RuntimeConfig`].
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Directory holding `config.toml` and `spells.ron`. Built-in content
    /// is used when unset.
    pub data_dir: Option<PathBuf>,
    /// Names the log directory of this run.
    pub session_id: Option<String>,
    /// Seed of the AI opponent. Derived from the clock when unset.
    pub ai_seed: Option<u64>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUEL_DATA_DIR` - Content directory (default: built-in content)
    /// - `DUEL_SESSION_ID` - Session identifier for the log directory (default: timestamp)
    /// - `DUEL_AI_SEED` - AI opponent seed (default: clock based)
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var_os("DUEL_DATA_DIR").map(PathBuf::from),
            session_id: env::var("DUEL_SESSION_ID").ok(),
            ai_seed: read_env::<u64>("DUEL_AI_SEED"),
        }
    }

    pub fn session_id(&self) -> String {
        self.session_id
            .clone()
            .unwrap_or_else(|| format!("session_{}", unix_secs()))
    }

    pub fn ai_seed(&self) -> u64 {
        self.ai_seed.unwrap_or_else(unix_secs)
    }
}

fn unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
