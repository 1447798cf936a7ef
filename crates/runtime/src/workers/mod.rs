//! Worker tasks that back the runtime orchestration.
//!
//! Exactly one worker runs per runtime: [`LocalMatchWorker`] for offline play
//! against a [`crate::api::PickProvider`], or [`PeerWorker`] for a networked
//! peer. Both accept the same [`Command`]s so [`crate::RuntimeHandle`] does not
//! care which one is behind it.

mod local;
mod peer;

use tokio::sync::oneshot;

use game_core::{Element, ElementPair};

use crate::api::{MatchView, Result};

pub use local::LocalMatchWorker;
pub use peer::PeerWorker;

/// Commands that can be sent to a match worker
pub enum Command {
    /// Add one element to the local side's picks.
    Pick {
        element: Element,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Lock in the local side's two picks.
    Confirm {
        reply: oneshot::Sender<Result<ElementPair>>,
    },
    /// Drop unconfirmed picks.
    ClearPicks { reply: oneshot::Sender<Result<()>> },
    /// Start a fresh session (local matches only).
    Restart { reply: oneshot::Sender<Result<()>> },
    /// Snapshot for presentation.
    View { reply: oneshot::Sender<MatchView> },
}

/// Publishes a countdown update only when the whole-second value changes.
#[derive(Debug, Default)]
pub(crate) struct CountdownTracker {
    last: Option<u64>,
}

impl CountdownTracker {
    pub(crate) fn update(&mut self, remaining_secs: u64) -> Option<u64> {
        if self.last == Some(remaining_secs) {
            return None;
        }
        self.last = Some(remaining_secs);
        Some(remaining_secs)
    }
}
