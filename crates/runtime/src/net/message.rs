use std::fmt;

use serde::{Deserialize, Serialize};

use game_core::{Element, ElementPair};

/// Opaque peer identity. The ordering decides authority and sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeerId(pub u64);

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer-{}", self.0)
    }
}

/// Result of one resolved turn as broadcast by the authority.
///
/// Hp values are in side order (A, B); each peer maps them to its own
/// perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnBroadcast {
    pub hp_a: i32,
    pub hp_b: i32,
    /// Summary of both casts.
    pub line1: String,
    /// Next-turn banner or the match result.
    pub line2: String,
    /// Turn the peers move to.
    pub turn: u32,
}

/// Every frame exchanged between peers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetMessage {
    /// Non-authority → authority: a peer's confirmed pair for this turn.
    SubmitPick {
        peer: PeerId,
        first: Element,
        second: Element,
    },
    /// Authority → all peers.
    ApplyTurn(TurnBroadcast),
}

impl NetMessage {
    pub fn submit(peer: PeerId, pair: ElementPair) -> Self {
        NetMessage::SubmitPick {
            peer,
            first: pair.first,
            second: pair.second,
        }
    }
}
