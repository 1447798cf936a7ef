//! Room membership, authority election and side assignment.
//!
//! Election needs no extra round trip: every peer sees the same membership
//! list and derives the same authority from it.

use std::collections::BTreeSet;

use game_core::Side;

use super::message::PeerId;

/// Which peer plays which side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideAssignment {
    pub a: PeerId,
    pub b: PeerId,
}

impl SideAssignment {
    /// Lower identity plays side A, whatever order they are given in.
    pub fn from_peers(x: PeerId, y: PeerId) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    pub fn side_of(&self, peer: PeerId) -> Option<Side> {
        if peer == self.a {
            Some(Side::A)
        } else if peer == self.b {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn peer_for(&self, side: Side) -> PeerId {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }
}

/// Replicated view of the room as seen by one peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    local: PeerId,
    members: BTreeSet<PeerId>,
}

impl Room {
    /// A room holding only the local peer.
    pub fn new(local: PeerId) -> Self {
        Self {
            local,
            members: BTreeSet::from([local]),
        }
    }

    pub fn local(&self) -> PeerId {
        self.local
    }

    /// Returns true if membership changed.
    pub fn join(&mut self, peer: PeerId) -> bool {
        self.members.insert(peer)
    }

    /// Returns true if membership changed.
    pub fn leave(&mut self, peer: PeerId) -> bool {
        self.members.remove(&peer)
    }

    /// Replace membership with an authoritative list. Returns true if it
    /// changed.
    pub fn set_members(&mut self, members: impl IntoIterator<Item = PeerId>) -> bool {
        let members: BTreeSet<PeerId> = members.into_iter().collect();
        if members == self.members {
            return false;
        }
        self.members = members;
        true
    }

    pub fn contains(&self, peer: PeerId) -> bool {
        self.members.contains(&peer)
    }

    pub fn members(&self) -> impl Iterator<Item = PeerId> + '_ {
        self.members.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Lowest identity in the room.
    pub fn authority(&self) -> Option<PeerId> {
        self.members.first().copied()
    }

    pub fn is_authority(&self) -> bool {
        self.authority() == Some(self.local)
    }

    /// Sides for the two lowest identities, once two peers are present.
    pub fn assignment(&self) -> Option<SideAssignment> {
        let mut members = self.members.iter().copied();
        let a = members.next()?;
        let b = members.next()?;
        Some(SideAssignment::from_peers(a, b))
    }

    pub fn local_side(&self) -> Option<Side> {
        self.assignment()?.side_of(self.local)
    }
}
