//! Online peer worker.
//!
//! Every peer runs one of these. It mirrors the match through [`ClientSync`]
//! and drives the local countdown. While the room elects it as authority it
//! also owns a [`NetworkAuthority`] that resolves turns for both peers. A
//! peer elected mid-match seeds that authority from its own mirror.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use game_core::{
    Element, ElementPair, GameConfig, PerSide, PickTimeoutGuard, Side, SpellCatalog, TimeoutAction,
};

use super::{Command, CountdownTracker};
use crate::api::{MatchMode, MatchView, Result, RuntimeError};
use crate::events::{EventBus, LogEvent, MatchEvent, TimerEvent};
use crate::net::{
    ApplyOutcome, ClientSync, NetMessage, NetworkAuthority, PeerId, Room, Transport,
    TransportEvent, TurnBroadcast, decode, encode,
};

/// Background task for one networked peer.
///
/// A forfeit reaches the other peer only when the authority's own side
/// forfeits, broadcast like any resolved turn. A non-authority peer can only
/// send picks, so its forfeit stays local and the authority keeps waiting for
/// its next submission.
pub struct PeerWorker<T: Transport> {
    config: GameConfig,
    catalog: Arc<SpellCatalog>,
    transport: T,
    room: Room,
    sync: ClientSync,
    authority: Option<NetworkAuthority>,
    guard: PickTimeoutGuard,
    countdown: CountdownTracker,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    tick_interval: Duration,
}

impl<T: Transport> PeerWorker<T> {
    pub fn new(
        config: GameConfig,
        catalog: Arc<SpellCatalog>,
        transport: T,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        tick_interval: Duration,
    ) -> Self {
        let local = transport.local_peer();
        info!(target: "runtime::peer", peer = %local, "PeerWorker initialized");

        Self {
            sync: ClientSync::new(config.max_hp, config.max_log_lines),
            guard: PickTimeoutGuard::from_config(&config),
            room: Room::new(local),
            authority: None,
            countdown: CountdownTracker::default(),
            config,
            catalog,
            transport,
            command_rx,
            event_bus,
            tick_interval,
        }
    }

    fn local_peer(&self) -> PeerId {
        self.room.local()
    }

    /// Main worker loop: commands, transport events and countdown ticks are
    /// handled one at a time.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => break,
                },
                event = self.transport.recv() => match event {
                    Some(event) => self.handle_transport(event).await,
                    None => {
                        warn!(target: "runtime::peer", "Transport closed, worker stopping");
                        break;
                    }
                },
                now = ticker.tick() => {
                    let elapsed = now.saturating_duration_since(last_tick);
                    last_tick = now;
                    self.on_tick(elapsed).await;
                }
            }
        }

        debug!(target: "runtime::peer", peer = %self.local_peer(), "PeerWorker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Pick { element, reply } => {
                let result = self.pick(element);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::peer", "Pick reply channel closed (caller dropped)");
                }
            }
            Command::Confirm { reply } => {
                let result = self.confirm().await;
                if reply.send(result).is_err() {
                    debug!(target: "runtime::peer", "Confirm reply channel closed (caller dropped)");
                }
            }
            Command::ClearPicks { reply } => {
                let result = self.sync.clear_picks().map_err(RuntimeError::from);
                if result.is_ok() {
                    self.publish_picks(false);
                }
                if reply.send(result).is_err() {
                    debug!(target: "runtime::peer", "ClearPicks reply channel closed (caller dropped)");
                }
            }
            Command::Restart { reply } => {
                if reply.send(Err(RuntimeError::RestartUnavailable)).is_err() {
                    debug!(target: "runtime::peer", "Restart reply channel closed (caller dropped)");
                }
            }
            Command::View { reply } => {
                if reply.send(self.view()).is_err() {
                    debug!(target: "runtime::peer", "View reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn pick(&mut self, element: Element) -> Result<()> {
        self.sync
            .pick(element)
            .inspect_err(|err| debug!(target: "runtime::peer", error = %err, "Pick ignored"))?;
        self.publish_picks(false);
        Ok(())
    }

    async fn confirm(&mut self) -> Result<ElementPair> {
        let pair = self
            .sync
            .confirm()
            .inspect_err(|err| debug!(target: "runtime::peer", error = %err, "Confirm refused"))?;
        self.guard.note_manual_submit(pair);
        self.publish_picks(true);
        self.submit(pair).await?;
        Ok(pair)
    }

    /// Hand the local pair to the authority, which may be this peer.
    async fn submit(&mut self, pair: ElementPair) -> Result<()> {
        let local = self.local_peer();
        let broadcast = match self.authority.as_mut() {
            Some(authority) => authority.receive(&self.room, local, pair),
            None => {
                let Some(authority) = self.room.authority() else {
                    debug!(target: "runtime::peer", "No authority elected, pick kept locally");
                    return Ok(());
                };
                let bytes = encode(&NetMessage::submit(local, pair))?;
                self.transport.send_to(authority, bytes).await?;
                trace!(target: "runtime::peer", %authority, %pair, "Pick sent to authority");
                None
            }
        };

        if let Some(broadcast) = broadcast {
            self.broadcast_turn(broadcast).await?;
        }
        Ok(())
    }

    async fn broadcast_turn(&self, broadcast: TurnBroadcast) -> Result<()> {
        let bytes = encode(&NetMessage::ApplyTurn(broadcast))?;
        self.transport.broadcast(bytes).await?;
        Ok(())
    }

    async fn handle_transport(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Membership(members) => {
                if self.room.set_members(members) {
                    self.on_membership_changed();
                }
            }
            TransportEvent::Frame { from, bytes } => match decode(&bytes) {
                Ok(message) => self.handle_message(from, message).await,
                Err(error) => {
                    warn!(target: "runtime::peer", %from, error = %error, "Dropping undecodable frame");
                }
            },
        }
    }

    async fn handle_message(&mut self, from: PeerId, message: NetMessage) {
        match message {
            NetMessage::SubmitPick {
                peer,
                first,
                second,
            } => {
                if peer != from {
                    debug!(target: "runtime::peer", %from, %peer, "Submit claims another peer, ignored");
                    return;
                }
                let Some(authority) = self.authority.as_mut() else {
                    debug!(target: "runtime::peer", %from, "Not the authority, submit ignored");
                    return;
                };
                let pair = ElementPair::new(first, second);
                let Some(broadcast) = authority.receive(&self.room, peer, pair) else {
                    return;
                };
                if let Err(error) = self.broadcast_turn(broadcast).await {
                    warn!(target: "runtime::peer", error = %error, "Failed to broadcast turn");
                }
            }
            NetMessage::ApplyTurn(broadcast) => self.apply_broadcast(&broadcast),
        }
    }

    fn on_membership_changed(&mut self) {
        let was_seated = self.sync.side().is_some();
        let side = self.room.local_side();
        self.sync.seat(side);

        let elected = match (self.room.is_authority(), self.authority.is_some()) {
            (true, false) => {
                info!(target: "runtime::peer", peer = %self.local_peer(), "Elected as authority");
                self.authority = Some(NetworkAuthority::new(
                    self.config.clone(),
                    Arc::clone(&self.catalog),
                ));
                true
            }
            (false, true) => {
                info!(target: "runtime::peer", peer = %self.local_peer(), "No longer the authority");
                self.authority = None;
                false
            }
            _ => false,
        };
        if let Some(authority) = self.authority.as_mut() {
            authority.retain_members(&self.room);
            // Seed from the local mirror when elected or re-seated.
            if let Some(side) = side.filter(|_| elected || !was_seated) {
                let (mine, theirs) = (self.sync.my_hp(), self.sync.opponent_hp());
                let hp = match side {
                    Side::A => PerSide::new(mine, theirs),
                    Side::B => PerSide::new(theirs, mine),
                };
                authority.resume(self.sync.turn(), hp);
            }
        }

        match side {
            Some(side) if !was_seated => {
                info!(target: "runtime::peer", %side, turn = self.sync.turn(), "Seated, battle start");
                self.event_bus.publish(MatchEvent::SessionStarted {
                    side,
                    max_hp: self.sync.max_hp(),
                });
                self.push_log("Battle start!");
                self.push_log(game_core::turn_banner(self.sync.turn()));
                self.open_turn();
            }
            None if was_seated => {
                info!(target: "runtime::peer", "Opponent left, waiting");
                self.sync.reopen();
                self.guard.cancel();
                self.publish_countdown();
                self.publish_picks(false);
            }
            _ => {}
        }
    }

    fn apply_broadcast(&mut self, broadcast: &TurnBroadcast) {
        let was_over = self.sync.outcome().is_some();
        match self.sync.apply(broadcast) {
            ApplyOutcome::Applied => {
                debug!(target: "runtime::sync", turn = broadcast.turn, "Broadcast applied");
                for line in [&broadcast.line1, &broadcast.line2] {
                    self.event_bus.publish(LogEvent::new(line.clone()));
                }
                self.event_bus.publish(MatchEvent::TurnResolved {
                    turn: broadcast.turn.saturating_sub(1),
                    my_hp: self.sync.my_hp(),
                    opponent_hp: self.sync.opponent_hp(),
                });
                self.publish_picks(false);

                match self.sync.outcome() {
                    Some(_) if was_over => {}
                    Some(outcome) => {
                        self.guard.cancel();
                        self.publish_countdown();
                        self.event_bus.publish(MatchEvent::Ended { outcome });
                    }
                    None => self.open_turn(),
                }
            }
            ApplyOutcome::Stale { last_applied } => {
                trace!(
                    target: "runtime::sync",
                    turn = broadcast.turn,
                    last_applied,
                    "Stale or duplicate broadcast dropped"
                );
            }
            ApplyOutcome::NotSeated => {
                debug!(target: "runtime::sync", turn = broadcast.turn, "Broadcast before seating dropped");
            }
        }
    }

    fn open_turn(&mut self) {
        if self.sync.outcome().is_some() {
            return;
        }
        self.event_bus.publish(MatchEvent::TurnStarted {
            turn: self.sync.turn(),
        });
        self.guard.start();
        self.publish_countdown();
    }

    async fn on_tick(&mut self, elapsed: Duration) {
        match self.guard.tick(elapsed) {
            None => self.publish_countdown(),
            Some(TimeoutAction::ForcePick(pair)) => {
                let pair = match self.sync.force(pair) {
                    Ok(pair) => pair,
                    Err(error) => {
                        debug!(target: "runtime::peer", error = %error, "Forced pick refused");
                        return;
                    }
                };
                let consecutive = self.guard.consecutive_forced();
                info!(target: "runtime::peer", %pair, consecutive, "Countdown expired, pick forced");
                self.event_bus.publish(MatchEvent::PickForced { consecutive });
                self.publish_picks(true);
                self.publish_countdown();

                if let Err(error) = self.submit(pair).await {
                    warn!(target: "runtime::peer", error = %error, "Failed to submit forced pick");
                }
            }
            Some(TimeoutAction::Forfeit) => {
                let Some(outcome) = self.sync.forfeit() else {
                    return;
                };
                info!(target: "runtime::peer", peer = %self.local_peer(), "Forfeit after repeated timeouts");
                self.publish_countdown();
                self.event_bus.publish(MatchEvent::Ended { outcome });

                let Some(side) = self.sync.side() else {
                    return;
                };
                let broadcast = self
                    .authority
                    .as_mut()
                    .and_then(|authority| authority.forfeit(side));
                match broadcast {
                    Some(broadcast) => {
                        if let Err(error) = self.broadcast_turn(broadcast).await {
                            warn!(target: "runtime::peer", error = %error, "Failed to broadcast forfeit");
                        }
                    }
                    None => self.push_log(format!("{side} forfeits after repeated timeouts.")),
                }
            }
        }
    }

    fn view(&self) -> MatchView {
        MatchView {
            mode: MatchMode::Online,
            side: self.sync.side(),
            turn: self.sync.turn(),
            my_hp: self.sync.my_hp(),
            opponent_hp: self.sync.opponent_hp(),
            max_hp: self.sync.max_hp(),
            picks: self.sync.picks_display(),
            remaining_secs: self.guard.remaining_secs(),
            input_locked: self.sync.side().is_none() || self.sync.is_input_locked(),
            outcome: self.sync.outcome(),
            log: self.sync.log().to_vec(),
        }
    }

    fn push_log(&mut self, line: impl Into<String>) {
        let line = line.into();
        self.sync.push_log(line.clone());
        self.event_bus.publish(LogEvent::new(line));
    }

    fn publish_picks(&self, confirmed: bool) {
        self.event_bus.publish(MatchEvent::PicksChanged {
            picks: self.sync.picks_display(),
            confirmed,
        });
    }

    fn publish_countdown(&mut self) {
        if let Some(remaining_secs) = self.countdown.update(self.guard.remaining_secs()) {
            self.event_bus.publish(TimerEvent { remaining_secs });
        }
    }
}
