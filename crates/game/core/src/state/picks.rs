//! Per-turn element picks.
//!
//! Every rejection is returned as a [`PickError`] and leaves the collector
//! untouched, so callers may log the reason and carry on.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::element::{Element, ElementPair};
use crate::error::{ErrorSeverity, GameError};

use super::side::{PerSide, Side};

/// Reasons a pick, confirm or clear is refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickError {
    #[error("{0} is stunned and cannot pick this turn")]
    Stunned(Side),

    #[error("{0} has already submitted this turn")]
    AlreadySubmitted(Side),

    #[error("{0} already holds two elements")]
    BufferFull(Side),

    #[error("{0} must pick two elements before confirming")]
    Incomplete(Side),

    #[error("the match has ended")]
    MatchEnded,
}

impl GameError for PickError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            PickError::Incomplete(_) => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            PickError::Stunned(_) => "PICK_STUNNED",
            PickError::AlreadySubmitted(_) => "PICK_ALREADY_SUBMITTED",
            PickError::BufferFull(_) => "PICK_BUFFER_FULL",
            PickError::Incomplete(_) => "PICK_INCOMPLETE",
            PickError::MatchEnded => "PICK_MATCH_ENDED",
        }
    }
}

/// Elements picked by one side in the current turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PickBuffer {
    picks: ArrayVec<Element, { GameConfig::PICKS_PER_TURN }>,
    submitted: bool,
}

impl PickBuffer {
    pub fn picks(&self) -> &[Element] {
        &self.picks
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.picks.is_full()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// The picked pair, once both elements are in.
    pub fn pair(&self) -> Option<ElementPair> {
        match self.picks.as_slice() {
            [first, second] => Some(ElementPair::new(*first, *second)),
            _ => None,
        }
    }

    fn clear(&mut self) {
        self.picks.clear();
        self.submitted = false;
    }
}

/// Pick buffers for both sides.
///
/// The collector does not own combat status. Callers pass whether a side is
/// stunned, which keeps the stun flag in a single place
/// ([`crate::CombatantState`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PickCollector {
    buffers: PerSide<PickBuffer>,
}

impl PickCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self, side: Side) -> &PickBuffer {
        &self.buffers[side]
    }

    /// Append one element to `side`'s buffer.
    pub fn add_pick(&mut self, side: Side, element: Element, stunned: bool) -> Result<(), PickError> {
        if stunned {
            return Err(PickError::Stunned(side));
        }
        let buffer = &mut self.buffers[side];
        if buffer.submitted {
            return Err(PickError::AlreadySubmitted(side));
        }
        buffer
            .picks
            .try_push(element)
            .map_err(|_| PickError::BufferFull(side))
    }

    /// Exactly two elements held, or nothing to pick because of a stun.
    pub fn is_ready(&self, side: Side, stunned: bool) -> bool {
        stunned || self.buffers[side].is_full()
    }

    /// Ready and locked in for resolution.
    pub fn is_committed(&self, side: Side, stunned: bool) -> bool {
        stunned || (self.buffers[side].submitted && self.buffers[side].is_full())
    }

    /// Lock in `side`'s two picks. Returns the submitted pair.
    pub fn submit(&mut self, side: Side, stunned: bool) -> Result<ElementPair, PickError> {
        if stunned {
            return Err(PickError::Stunned(side));
        }
        let buffer = &mut self.buffers[side];
        if buffer.submitted {
            return Err(PickError::AlreadySubmitted(side));
        }
        let pair = buffer.pair().ok_or(PickError::Incomplete(side))?;
        buffer.submitted = true;
        Ok(pair)
    }

    /// Replace `side`'s buffer with `pair` and mark it submitted.
    ///
    /// Used by the timeout path and by remote submissions, where the whole
    /// pair arrives at once and overwrites whatever was buffered.
    pub fn force(&mut self, side: Side, pair: ElementPair) {
        let buffer = &mut self.buffers[side];
        buffer.picks.clear();
        buffer.picks.push(pair.first);
        buffer.picks.push(pair.second);
        buffer.submitted = true;
    }

    /// Drop `side`'s unsubmitted picks.
    pub fn clear(&mut self, side: Side) -> Result<(), PickError> {
        let buffer = &mut self.buffers[side];
        if buffer.submitted {
            return Err(PickError::AlreadySubmitted(side));
        }
        buffer.picks.clear();
        Ok(())
    }

    pub fn pair(&self, side: Side) -> Option<ElementPair> {
        self.buffers[side].pair()
    }

    /// Render `side`'s buffer: `-`, `Fire` or `Fire + Water`.
    pub fn display(&self, side: Side) -> String {
        let picks = self.buffers[side].picks();
        if picks.is_empty() {
            return "-".to_owned();
        }
        picks
            .iter()
            .map(|element| element.as_ref())
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Empty both buffers and clear both submitted flags.
    pub fn reset(&mut self) {
        for side in Side::BOTH {
            self.buffers[side].clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_two_then_rejects_third() {
        let mut picks = PickCollector::new();
        picks.add_pick(Side::A, Element::Fire, false).unwrap();
        assert!(!picks.is_ready(Side::A, false));
        picks.add_pick(Side::A, Element::Water, false).unwrap();
        assert!(picks.is_ready(Side::A, false));

        assert_eq!(
            picks.add_pick(Side::A, Element::Wind, false),
            Err(PickError::BufferFull(Side::A))
        );
        assert_eq!(picks.display(Side::A), "Fire + Water");
    }

    #[test]
    fn stunned_side_cannot_pick_but_is_ready() {
        let mut picks = PickCollector::new();
        assert_eq!(
            picks.add_pick(Side::B, Element::Earth, true),
            Err(PickError::Stunned(Side::B))
        );
        assert!(picks.buffer(Side::B).is_empty());
        assert!(picks.is_ready(Side::B, true));
        assert!(picks.is_committed(Side::B, true));
    }

    #[test]
    fn submit_requires_two_and_locks() {
        let mut picks = PickCollector::new();
        picks.add_pick(Side::A, Element::Wind, false).unwrap();
        assert_eq!(picks.submit(Side::A, false), Err(PickError::Incomplete(Side::A)));
        assert_eq!(picks.display(Side::A), "Wind");

        picks.add_pick(Side::A, Element::Wind, false).unwrap();
        assert_eq!(
            picks.submit(Side::A, false),
            Ok(ElementPair::new(Element::Wind, Element::Wind))
        );
        assert!(picks.is_committed(Side::A, false));
        assert_eq!(
            picks.add_pick(Side::A, Element::Fire, false),
            Err(PickError::AlreadySubmitted(Side::A))
        );
        assert_eq!(picks.clear(Side::A), Err(PickError::AlreadySubmitted(Side::A)));
    }

    #[test]
    fn force_overwrites_partial_buffer() {
        let mut picks = PickCollector::new();
        picks.add_pick(Side::B, Element::Fire, false).unwrap();
        picks.force(Side::B, ElementPair::new(Element::Earth, Element::Earth));

        assert_eq!(
            picks.pair(Side::B),
            Some(ElementPair::new(Element::Earth, Element::Earth))
        );
        assert!(picks.buffer(Side::B).is_submitted());
    }

    #[test]
    fn reset_clears_everything() {
        let mut picks = PickCollector::new();
        picks.force(Side::A, ElementPair::new(Element::Fire, Element::Fire));
        picks.add_pick(Side::B, Element::Water, false).unwrap();
        picks.reset();

        assert_eq!(picks, PickCollector::new());
        assert_eq!(picks.display(Side::B), "-");
    }
}
