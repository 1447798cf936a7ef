use std::time::Duration;

use crate::element::{Element, ElementPair};

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Starting and maximum hp of each combatant.
    pub max_hp: i32,

    /// Time a side has to confirm its picks before a pick is forced.
    pub pick_time_limit_ms: u64,

    /// Pair submitted on behalf of a side whose countdown expires.
    pub forced_pick: ElementPair,

    /// Consecutive forced picks after which the side forfeits.
    pub forfeit_after_timeouts: u32,

    /// Number of log lines kept for presentation.
    pub max_log_lines: usize,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const PICKS_PER_TURN: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_HP: i32 = 20;
    pub const DEFAULT_PICK_TIME_LIMIT_MS: u64 = 15_000;
    pub const DEFAULT_FORCED_PICK: ElementPair = ElementPair::new(Element::Earth, Element::Earth);
    pub const DEFAULT_FORFEIT_AFTER_TIMEOUTS: u32 = 2;
    pub const DEFAULT_MAX_LOG_LINES: usize = 200;

    pub fn new() -> Self {
        Self {
            max_hp: Self::DEFAULT_MAX_HP,
            pick_time_limit_ms: Self::DEFAULT_PICK_TIME_LIMIT_MS,
            forced_pick: Self::DEFAULT_FORCED_PICK,
            forfeit_after_timeouts: Self::DEFAULT_FORFEIT_AFTER_TIMEOUTS,
            max_log_lines: Self::DEFAULT_MAX_LOG_LINES,
        }
    }

    /// Overrides the maximum hp (at least 1).
    #[must_use]
    pub fn with_max_hp(mut self, max_hp: i32) -> Self {
        self.max_hp = max_hp.max(1);
        self
    }

    #[must_use]
    pub fn with_pick_time_limit(mut self, limit: Duration) -> Self {
        self.pick_time_limit_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_forced_pick(mut self, forced_pick: ElementPair) -> Self {
        self.forced_pick = forced_pick;
        self
    }

    pub fn pick_time_limit(&self) -> Duration {
        Duration::from_millis(self.pick_time_limit_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = GameConfig::default();
        assert_eq!(config.max_hp, 20);
        assert_eq!(config.pick_time_limit(), Duration::from_secs(15));
        assert_eq!(config.forfeit_after_timeouts, 2);
        assert_eq!(config.max_log_lines, 200);
    }

    #[test]
    fn max_hp_is_at_least_one() {
        assert_eq!(GameConfig::new().with_max_hp(0).max_hp, 1);
        assert_eq!(GameConfig::new().with_max_hp(-5).max_hp, 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_fills_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "max_hp": 30 }"#).unwrap();
        assert_eq!(config.max_hp, 30);
        assert_eq!(config.forced_pick, GameConfig::DEFAULT_FORCED_PICK);
    }
}
