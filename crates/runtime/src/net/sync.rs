//! Applies authority broadcasts on each peer.
//!
//! The turn number carried by a broadcast is a logical clock: anything at or
//! below the last applied turn is a duplicate or arrived late and is dropped.

use thiserror::Error;

use game_core::{
    CombatantState, Element, ElementPair, MatchResult, Outcome, PerSide, PickCollector, PickError,
    Side,
};

use super::message::TurnBroadcast;
use crate::api::LogBuffer;

/// Reasons a local pick or confirm is refused in online play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("waiting for an opponent; no side assigned yet")]
    NotSeated,

    #[error("input is locked until the next turn")]
    InputLocked,

    #[error(transparent)]
    Pick(#[from] PickError),
}

/// What [`ClientSync::apply`] did with a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Turn number not newer than `last_applied`.
    Stale { last_applied: u32 },
    /// No side assignment yet, so hp cannot be mapped.
    NotSeated,
}

/// One peer's mirror of the match.
#[derive(Debug, Clone)]
pub struct ClientSync {
    side: Option<Side>,
    me: CombatantState,
    opponent: CombatantState,
    turn: u32,
    last_applied_turn: u32,
    picks: PickCollector,
    input_locked: bool,
    outcome: Option<Outcome>,
    log: LogBuffer,
}

impl ClientSync {
    pub fn new(max_hp: i32, max_log_lines: usize) -> Self {
        Self {
            side: None,
            me: CombatantState::new(max_hp),
            opponent: CombatantState::new(max_hp),
            turn: 1,
            last_applied_turn: 0,
            picks: PickCollector::new(),
            input_locked: false,
            outcome: None,
            log: LogBuffer::new(max_log_lines),
        }
    }

    /// Record which side this peer plays.
    pub fn seat(&mut self, side: Option<Side>) {
        self.side = side;
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn my_hp(&self) -> i32 {
        self.me.hp()
    }

    pub fn opponent_hp(&self) -> i32 {
        self.opponent.hp()
    }

    pub fn max_hp(&self) -> i32 {
        self.me.max_hp()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn last_applied_turn(&self) -> u32 {
        self.last_applied_turn
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line);
    }

    /// Rendered local pick buffer.
    pub fn picks_display(&self) -> String {
        match self.side {
            Some(side) => self.picks.display(side),
            None => "-".to_owned(),
        }
    }

    /// Add one element to the local buffer.
    pub fn pick(&mut self, element: Element) -> Result<(), SyncError> {
        let side = self.open_side()?;
        self.picks.add_pick(side, element, false)?;
        Ok(())
    }

    pub fn clear_picks(&mut self) -> Result<(), SyncError> {
        let side = self.open_side()?;
        self.picks.clear(side)?;
        Ok(())
    }

    /// Lock input and return the pair to send to the authority.
    pub fn confirm(&mut self) -> Result<ElementPair, SyncError> {
        let side = self.open_side()?;
        let pair = self.picks.submit(side, false)?;
        self.input_locked = true;
        Ok(pair)
    }

    /// Replace the local buffer with a timeout pair and lock input.
    pub fn force(&mut self, pair: ElementPair) -> Result<ElementPair, SyncError> {
        let side = self.open_side()?;
        self.picks.force(side, pair);
        self.input_locked = true;
        Ok(pair)
    }

    /// Lock this peer into a loss. Returns `None` if the match already ended.
    pub fn forfeit(&mut self) -> Option<Outcome> {
        if self.outcome.is_some() {
            return None;
        }
        self.outcome = Some(Outcome::Loss);
        self.input_locked = true;
        Some(Outcome::Loss)
    }

    /// Drop the local picks and unlock input for the current turn.
    ///
    /// Used when the opponent leaves mid-turn and a submitted pick will never
    /// be resolved. Does nothing once the match has ended.
    pub fn reopen(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        self.picks.reset();
        self.input_locked = false;
    }

    /// Apply one authority broadcast.
    pub fn apply(&mut self, broadcast: &TurnBroadcast) -> ApplyOutcome {
        if broadcast.turn <= self.last_applied_turn {
            return ApplyOutcome::Stale {
                last_applied: self.last_applied_turn,
            };
        }
        let Some(side) = self.side else {
            return ApplyOutcome::NotSeated;
        };

        let hp = PerSide::new(broadcast.hp_a, broadcast.hp_b);
        self.me.sync_hp(hp[side]);
        self.opponent.sync_hp(hp[side.opponent()]);
        self.turn = broadcast.turn;
        self.log.push(broadcast.line1.clone());
        self.log.push(broadcast.line2.clone());
        self.picks.reset();
        self.last_applied_turn = broadcast.turn;

        if self.outcome.is_none() {
            self.outcome = MatchResult::from_hp(hp).map(|result| result.outcome_for(side));
        }
        self.input_locked = self.outcome.is_some();

        ApplyOutcome::Applied
    }

    fn open_side(&self) -> Result<Side, SyncError> {
        let side = self.side.ok_or(SyncError::NotSeated)?;
        if self.input_locked {
            return Err(SyncError::InputLocked);
        }
        Ok(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broadcast(turn: u32, hp_a: i32, hp_b: i32) -> TurnBroadcast {
        TurnBroadcast {
            hp_a,
            hp_b,
            line1: format!("summary {turn}"),
            line2: format!("--- Turn {turn} ---"),
            turn,
        }
    }

    #[test]
    fn duplicate_and_stale_broadcasts_are_dropped() {
        let mut sync = ClientSync::new(20, 200);
        sync.seat(Some(Side::A));

        let outcomes: Vec<_> = [1, 2, 2, 4, 3]
            .into_iter()
            .map(|turn| sync.apply(&broadcast(turn, 20 - turn as i32, 20)))
            .collect();

        assert_eq!(
            outcomes,
            vec![
                ApplyOutcome::Applied,
                ApplyOutcome::Applied,
                ApplyOutcome::Stale { last_applied: 2 },
                ApplyOutcome::Applied,
                ApplyOutcome::Stale { last_applied: 4 },
            ]
        );
        assert_eq!(sync.last_applied_turn(), 4);
        assert_eq!(sync.my_hp(), 16);
        assert_eq!(sync.log().len(), 6);
    }

    #[test]
    fn hp_is_mapped_to_own_perspective() {
        let mut sync = ClientSync::new(20, 200);
        sync.seat(Some(Side::B));
        sync.apply(&broadcast(2, 20, 14));
        assert_eq!(sync.my_hp(), 14);
        assert_eq!(sync.opponent_hp(), 20);
        assert_eq!(sync.turn(), 2);
    }

    #[test]
    fn unseated_peer_drops_broadcast() {
        let mut sync = ClientSync::new(20, 200);
        assert_eq!(sync.apply(&broadcast(2, 10, 10)), ApplyOutcome::NotSeated);
        assert_eq!(sync.last_applied_turn(), 0);
    }

    #[test]
    fn confirm_locks_until_next_broadcast() {
        let mut sync = ClientSync::new(20, 200);
        sync.seat(Some(Side::A));
        sync.pick(Element::Fire).unwrap();
        assert_eq!(
            sync.confirm(),
            Err(SyncError::Pick(PickError::Incomplete(Side::A)))
        );
        sync.pick(Element::Fire).unwrap();
        assert_eq!(
            sync.confirm(),
            Ok(ElementPair::new(Element::Fire, Element::Fire))
        );
        assert_eq!(sync.pick(Element::Water), Err(SyncError::InputLocked));

        sync.apply(&broadcast(2, 20, 14));
        assert!(!sync.is_input_locked());
        assert_eq!(sync.picks_display(), "-");
    }

    #[test]
    fn lethal_broadcast_ends_match_for_this_peer() {
        let mut sync = ClientSync::new(20, 200);
        sync.seat(Some(Side::B));
        sync.apply(&broadcast(5, 6, 0));
        assert_eq!(sync.outcome(), Some(Outcome::Loss));
        assert!(sync.is_input_locked());

        let mut draw = ClientSync::new(20, 200);
        draw.seat(Some(Side::A));
        draw.apply(&broadcast(5, 0, 0));
        assert_eq!(draw.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn forfeit_is_final() {
        let mut sync = ClientSync::new(20, 200);
        sync.seat(Some(Side::A));
        assert_eq!(sync.forfeit(), Some(Outcome::Loss));
        assert_eq!(sync.forfeit(), None);

        sync.apply(&broadcast(2, 20, 20));
        assert!(sync.is_input_locked());
        assert_eq!(sync.outcome(), Some(Outcome::Loss));
    }

    #[test]
    fn reopen_unlocks_a_pending_confirm() {
        let mut sync = ClientSync::new(20, 200);
        sync.seat(Some(Side::B));
        sync.pick(Element::Water).unwrap();
        sync.pick(Element::Water).unwrap();
        sync.confirm().unwrap();

        sync.seat(None);
        sync.reopen();
        sync.seat(Some(Side::A));
        assert!(!sync.is_input_locked());
        assert_eq!(sync.picks_display(), "-");
        sync.pick(Element::Fire).unwrap();

        sync.forfeit();
        sync.reopen();
        assert!(sync.is_input_locked());
    }
}
