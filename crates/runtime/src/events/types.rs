//! Event types for different topics.

use serde::{Deserialize, Serialize};

use game_core::{Outcome, Side};

use super::bus::Event;

/// Session and turn lifecycle, from the local viewer's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A new session began (fresh hp, turn 1).
    SessionStarted { side: Side, max_hp: i32 },
    /// Picks are open for `turn`.
    TurnStarted { turn: u32 },
    /// The local pick buffer changed.
    PicksChanged { picks: String, confirmed: bool },
    /// A turn was resolved and hp updated.
    TurnResolved {
        turn: u32,
        my_hp: i32,
        opponent_hp: i32,
    },
    /// A pick was forced because the countdown ran out.
    PickForced { consecutive: u32 },
    /// The match is over.
    Ended { outcome: Outcome },
}

/// One presentation log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub line: String,
}

impl LogEvent {
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }
}

/// Countdown update, published once per whole second change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerEvent {
    pub remaining_secs: u64,
}

impl From<MatchEvent> for Event {
    fn from(event: MatchEvent) -> Self {
        Event::Match(event)
    }
}

impl From<LogEvent> for Event {
    fn from(event: LogEvent) -> Self {
        Event::Log(event)
    }
}

impl From<TimerEvent> for Event {
    fn from(event: TimerEvent) -> Self {
        Event::Timer(event)
    }
}
