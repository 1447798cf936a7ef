//! Turn resolution on the elected peer.

use std::collections::BTreeMap;
use std::sync::Arc;

use game_core::{
    ElementPair, GameConfig, PerSide, PickError, Side, SpellCatalog, TurnEngine, TurnReport,
};

use super::message::{PeerId, TurnBroadcast};
use super::room::Room;

/// Authority-side state: the engine plus the latest pick of each peer.
///
/// Only the elected peer holds one. Picks are keyed by peer, so a resubmit
/// overwrites and arrival order never affects side assignment.
pub struct NetworkAuthority {
    engine: TurnEngine,
    catalog: Arc<SpellCatalog>,
    pending: BTreeMap<PeerId, ElementPair>,
}

impl NetworkAuthority {
    pub fn new(config: GameConfig, catalog: Arc<SpellCatalog>) -> Self {
        Self {
            engine: TurnEngine::new(config),
            catalog,
            pending: BTreeMap::new(),
        }
    }

    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_pick(&self, peer: PeerId) -> Option<ElementPair> {
        self.pending.get(&peer).copied()
    }

    /// Buffer `peer`'s pick and resolve once both seated peers have one.
    ///
    /// Returns the broadcast to send to every peer when a turn resolved.
    pub fn receive(
        &mut self,
        room: &Room,
        peer: PeerId,
        pair: ElementPair,
    ) -> Option<TurnBroadcast> {
        if self.engine.is_ended() {
            tracing::debug!(
                target: "runtime::authority",
                %peer,
                "Ignoring pick received after the match ended"
            );
            return None;
        }
        if !room.contains(peer) {
            tracing::debug!(
                target: "runtime::authority",
                %peer,
                "Ignoring pick from a peer outside the room"
            );
            return None;
        }

        if self.pending.insert(peer, pair).is_some() {
            tracing::trace!(target: "runtime::authority", %peer, %pair, "Pick overwritten");
        }
        self.try_resolve(room)
    }

    /// Take over a match already in progress at `turn` with `hp` in side order.
    pub fn resume(&mut self, turn: u32, hp: PerSide<i32>) {
        self.engine.resume(turn, hp);
        self.pending.clear();
        tracing::info!(
            target: "runtime::authority",
            turn,
            hp_a = hp.a,
            hp_b = hp.b,
            "Resuming match"
        );
    }

    /// End the match with `side` losing.
    ///
    /// The forfeiting side is broadcast at 0 hp so every peer derives the
    /// result from hp alone. Returns `None` if the match already ended.
    pub fn forfeit(&mut self, side: Side) -> Option<TurnBroadcast> {
        let result = self.engine.forfeit(side)?;
        self.pending.clear();
        let mut hp = self.engine.hp();
        hp[side] = 0;
        tracing::info!(target: "runtime::authority", %side, %result, "Side forfeited");
        Some(TurnBroadcast {
            hp_a: hp.a,
            hp_b: hp.b,
            line1: format!("{side} forfeits after repeated timeouts."),
            line2: result.to_string(),
            turn: self.engine.turn_number() + 1,
        })
    }

    /// Drop picks from peers that left the room.
    pub fn retain_members(&mut self, room: &Room) {
        self.pending.retain(|peer, _| room.contains(*peer));
    }

    fn try_resolve(&mut self, room: &Room) -> Option<TurnBroadcast> {
        let assignment = room.assignment()?;
        let picks = [Side::A, Side::B].map(|side| {
            let peer = assignment.peer_for(side);
            (side, peer, self.pending.get(&peer).copied())
        });
        if picks.iter().any(|(_, _, pick)| pick.is_none()) {
            return None;
        }

        for (side, peer, pick) in picks {
            let Some(pair) = pick else { continue };
            match self.engine.submit_pair(side, pair) {
                Ok(()) => {}
                Err(PickError::Stunned(_)) => {
                    tracing::debug!(
                        target: "runtime::authority",
                        %peer,
                        %side,
                        "Side is stunned; its pick is discarded"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        target: "runtime::authority",
                        %peer,
                        error = %err,
                        "Pick refused by engine"
                    );
                    return None;
                }
            }
        }

        let report = self.engine.resolve(&self.catalog)?;
        self.pending.clear();
        tracing::info!(
            target: "runtime::authority",
            turn = report.turn,
            first_mover = %report.first_mover,
            hp_a = report.hp.a,
            hp_b = report.hp.b,
            "Turn resolved"
        );
        Some(broadcast_for(&report))
    }
}

/// The tuple every peer applies for a resolved turn.
pub fn broadcast_for(report: &TurnReport) -> TurnBroadcast {
    TurnBroadcast {
        hp_a: report.hp.a,
        hp_b: report.hp.b,
        line1: report.summary_line(),
        line2: report.status_line(),
        turn: report.next_turn(),
    }
}
