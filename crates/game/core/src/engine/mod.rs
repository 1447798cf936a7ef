//! Turn state machine.
//!
//! The [`TurnEngine`] is the authoritative reducer for a duel. It owns both
//! [`CombatantState`]s and the current [`TurnState`], and every combat
//! mutation flows through [`TurnEngine::resolve`]:
//!
//! snapshot picks → consume stuns → initiative → clear haste → first mover
//! → second mover → termination check → advance
//!
//! The local runtime and the network authority both drive this type, so a
//! turn resolves identically regardless of where it runs.

mod report;
mod timeout;

pub use report::{TurnReport, turn_banner};
pub use timeout::{PickTimeoutGuard, TimeoutAction};

use crate::combat::{Cast, EffectResolver, InitiativeResolver, MatchResult};
use crate::config::GameConfig;
use crate::element::{Element, ElementPair};
use crate::spell::SpellCatalog;
use crate::state::{CombatantState, PerSide, PickCollector, PickError, Side, TurnState};

/// Where the engine is in the turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    AwaitingPicks,
    Resolving,
    Ended(MatchResult),
}

impl Phase {
    pub fn is_ended(self) -> bool {
        matches!(self, Phase::Ended(_))
    }
}

/// Two-sided duel engine.
#[derive(Clone, Debug)]
pub struct TurnEngine {
    config: GameConfig,
    combatants: PerSide<CombatantState>,
    turn: TurnState,
    phase: Phase,
}

impl TurnEngine {
    /// Creates an engine at turn 1 with both sides at full hp.
    pub fn new(config: GameConfig) -> Self {
        let combatants = PerSide::splat(CombatantState::new(config.max_hp));
        Self {
            config,
            combatants,
            turn: TurnState::new(),
            phase: Phase::AwaitingPicks,
        }
    }

    /// Starts a fresh session: full hp, no status, turn 1, empty picks.
    pub fn restart(&mut self) {
        for side in Side::BOTH {
            self.combatants[side].reset();
        }
        self.turn = TurnState::new();
        self.phase = Phase::AwaitingPicks;
    }

    /// Continues a match from `turn` with the given hp.
    ///
    /// Status flags and picks start empty. A side already at 0 hp ends the
    /// match immediately.
    pub fn resume(&mut self, turn: u32, hp: PerSide<i32>) {
        self.restart();
        for side in Side::BOTH {
            self.combatants[side].sync_hp(hp[side]);
        }
        self.turn.number = turn.max(1);
        if let Some(result) = MatchResult::from_hp(self.hp()) {
            self.phase = Phase::Ended(result);
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<MatchResult> {
        match self.phase {
            Phase::Ended(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.phase.is_ended()
    }

    pub fn turn_number(&self) -> u32 {
        self.turn.number
    }

    pub fn combatant(&self, side: Side) -> &CombatantState {
        &self.combatants[side]
    }

    pub fn combatants(&self) -> &PerSide<CombatantState> {
        &self.combatants
    }

    pub fn hp(&self) -> PerSide<i32> {
        PerSide::new(self.combatants.a.hp(), self.combatants.b.hp())
    }

    pub fn picks(&self) -> &PickCollector {
        &self.turn.picks
    }

    /// Adds one element to `side`'s buffer. Refused picks change nothing.
    pub fn add_pick(&mut self, side: Side, element: Element) -> Result<(), PickError> {
        self.ensure_open()?;
        let stunned = self.combatants[side].is_stunned();
        self.turn.picks.add_pick(side, element, stunned)
    }

    /// Drops `side`'s unconfirmed picks.
    pub fn clear_picks(&mut self, side: Side) -> Result<(), PickError> {
        self.ensure_open()?;
        self.turn.picks.clear(side)
    }

    /// Locks in `side`'s two picks.
    pub fn confirm(&mut self, side: Side) -> Result<ElementPair, PickError> {
        self.ensure_open()?;
        let stunned = self.combatants[side].is_stunned();
        self.turn.picks.submit(side, stunned)
    }

    /// Submits a whole pair for `side`, overwriting anything buffered.
    ///
    /// This is how remote and scripted sides enter their picks.
    pub fn submit_pair(&mut self, side: Side, pair: ElementPair) -> Result<(), PickError> {
        self.ensure_open()?;
        if self.combatants[side].is_stunned() {
            return Err(PickError::Stunned(side));
        }
        self.turn.picks.force(side, pair);
        Ok(())
    }

    /// Submits the timeout pair for `side`.
    pub fn force_pick(&mut self, side: Side, pair: ElementPair) -> Result<(), PickError> {
        self.submit_pair(side, pair)
    }

    /// True once both sides are committed (submitted or stunned).
    pub fn is_ready_to_resolve(&self) -> bool {
        self.phase == Phase::AwaitingPicks
            && Side::BOTH.into_iter().all(|side| {
                let stunned = self.combatants[side].is_stunned();
                self.turn.picks.is_ready(side, stunned)
                    && self.turn.picks.is_committed(side, stunned)
            })
    }

    /// Resolves the current turn if both sides are committed.
    ///
    /// Returns `None` and changes nothing when the engine is not ready.
    pub fn resolve(&mut self, catalog: &SpellCatalog) -> Option<TurnReport> {
        if !self.is_ready_to_resolve() {
            return None;
        }
        self.phase = Phase::Resolving;
        let turn = self.turn.number;

        let casts = PerSide::splat(()).map(|side, ()| {
            let pair = if self.combatants[side].is_stunned() {
                None
            } else {
                self.turn.picks.pair(side)
            };
            Cast::resolve(pair, catalog)
        });

        // A stun lives for exactly the turn it blocks.
        for side in Side::BOTH {
            if matches!(casts[side], Cast::Stunned) {
                self.combatants[side].set_stunned(false);
            }
        }

        let first_mover = InitiativeResolver::decide(
            turn,
            self.combatants.a.has_haste(),
            self.combatants.b.has_haste(),
        );
        for side in Side::BOTH {
            self.combatants[side].set_haste(false);
        }

        let second_mover = first_mover.opponent();
        let mut log =
            EffectResolver::apply_cast(&casts[first_mover], first_mover, &mut self.combatants);
        log.extend(EffectResolver::apply_cast(
            &casts[second_mover],
            second_mover,
            &mut self.combatants,
        ));

        let result = MatchResult::from_hp(self.hp());
        match result {
            Some(result) => self.phase = Phase::Ended(result),
            None => {
                self.turn.advance();
                self.phase = Phase::AwaitingPicks;
            }
        }

        Some(TurnReport {
            turn,
            first_mover,
            casts,
            log,
            hp: self.hp(),
            result,
        })
    }

    /// Ends the match with `side` losing, bypassing resolution.
    ///
    /// Returns `None` if the match had already ended.
    pub fn forfeit(&mut self, side: Side) -> Option<MatchResult> {
        if self.is_ended() {
            return None;
        }
        let result = MatchResult::Winner(side.opponent());
        self.phase = Phase::Ended(result);
        Some(result)
    }

    fn ensure_open(&self) -> Result<(), PickError> {
        if self.is_ended() {
            Err(PickError::MatchEnded)
        } else {
            Ok(())
        }
    }
}
