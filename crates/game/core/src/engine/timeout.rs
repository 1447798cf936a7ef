//! Per-turn pick countdown.

use std::time::Duration;

use crate::config::GameConfig;
use crate::element::ElementPair;

/// What the caller must do after the countdown expired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeoutAction {
    /// Submit this pair on the side's behalf.
    ForcePick(ElementPair),
    /// The side timed out too often and loses the match.
    Forfeit,
}

/// Countdown for one side's picks, advanced cooperatively by elapsed time.
///
/// The guard never sleeps. The owner calls [`tick`](Self::tick) from its
/// scheduling loop, [`cancel`](Self::cancel) or
/// [`note_manual_submit`](Self::note_manual_submit) when the side confirms,
/// and [`start`](Self::start) at the beginning of every turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickTimeoutGuard {
    limit: Duration,
    forced_pick: ElementPair,
    forfeit_after: u32,
    remaining: Option<Duration>,
    consecutive_forced: u32,
}

impl PickTimeoutGuard {
    pub fn new(limit: Duration, forced_pick: ElementPair, forfeit_after: u32) -> Self {
        Self {
            limit,
            forced_pick,
            forfeit_after: forfeit_after.max(1),
            remaining: None,
            consecutive_forced: 0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.pick_time_limit(),
            config.forced_pick,
            config.forfeit_after_timeouts,
        )
    }

    /// Restart the countdown from the full limit.
    pub fn start(&mut self) {
        self.remaining = Some(self.limit);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn consecutive_forced(&self) -> u32 {
        self.consecutive_forced
    }

    /// Advance by `elapsed`. Returns the action to take on expiry.
    ///
    /// An expired countdown stops; it fires at most once per `start`.
    pub fn tick(&mut self, elapsed: Duration) -> Option<TimeoutAction> {
        let remaining = self.remaining?.saturating_sub(elapsed);
        if !remaining.is_zero() {
            self.remaining = Some(remaining);
            return None;
        }

        self.remaining = None;
        self.consecutive_forced += 1;
        if self.consecutive_forced >= self.forfeit_after {
            Some(TimeoutAction::Forfeit)
        } else {
            Some(TimeoutAction::ForcePick(self.forced_pick))
        }
    }

    /// Record a confirm made by the side itself and stop the countdown.
    ///
    /// Only a pick that differs from the forced pair breaks the timeout
    /// streak; re-entering the default pair by hand does not.
    pub fn note_manual_submit(&mut self, pair: ElementPair) {
        self.cancel();
        if !pair.same_recipe(self.forced_pick) {
            self.consecutive_forced = 0;
        }
    }

    /// Whole seconds left, rounded up. Zero when stopped.
    pub fn remaining_secs(&self) -> u64 {
        self.remaining.map_or(0, |remaining| {
            let millis = remaining.as_millis();
            u64::try_from(millis.div_ceil(1000)).unwrap_or(u64::MAX)
        })
    }

    /// Stop the countdown and forget the timeout streak.
    pub fn reset(&mut self) {
        self.remaining = None;
        self.consecutive_forced = 0;
    }
}
