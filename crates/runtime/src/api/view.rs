//! Presentation-facing snapshot of a match.
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use game_core::{Outcome, Side};

/// Whether the match runs against a local opponent or a remote peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    Local,
    Online,
}

/// Read-only snapshot answered by [`crate::RuntimeHandle::view`].
///
/// Hp values are from the viewer's perspective, not side A/B.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub mode: MatchMode,
    /// `None` while an online peer waits for an opponent.
    pub side: Option<Side>,
    pub turn: u32,
    pub my_hp: i32,
    pub opponent_hp: i32,
    pub max_hp: i32,
    /// Rendered pick buffer: `-`, `Fire` or `Fire + Water`.
    pub picks: String,
    pub remaining_secs: u64,
    pub input_locked: bool,
    pub outcome: Option<Outcome>,
    pub log: Vec<String>,
}

/// Append-only log that keeps the newest `capacity` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_oldest_lines_past_capacity() {
        let mut log = LogBuffer::new(3);
        for line in ["a", "b", "c", "d"] {
            log.push(line);
        }
        assert_eq!(log.to_vec(), vec!["b", "c", "d"]);
        assert_eq!(log.len(), 3);
    }
}
