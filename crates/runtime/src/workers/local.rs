//! Offline match worker that owns the authoritative [`TurnEngine`].
//!
//! Receives commands from [`crate::RuntimeHandle`], asks the opponent's
//! [`PickProvider`] for a pair at the start of every turn, drives the local
//! side's countdown and publishes everything on the [`EventBus`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use game_core::{
    Element, ElementPair, GameConfig, PickTimeoutGuard, Side, SpellCatalog, TimeoutAction,
    TurnEngine, turn_banner,
};

use super::{Command, CountdownTracker};
use crate::api::{LogBuffer, MatchMode, MatchView, PickContext, PickProvider, Result};
use crate::events::{EventBus, LogEvent, MatchEvent, TimerEvent};

/// Background task that plays one side against a provider-driven opponent.
pub struct LocalMatchWorker {
    engine: TurnEngine,
    catalog: Arc<SpellCatalog>,
    opponent: Arc<dyn PickProvider>,
    guard: PickTimeoutGuard,
    countdown: CountdownTracker,
    local_side: Side,
    log: LogBuffer,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    tick_interval: Duration,
}

impl LocalMatchWorker {
    pub fn new(
        config: GameConfig,
        catalog: Arc<SpellCatalog>,
        opponent: Arc<dyn PickProvider>,
        local_side: Side,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        tick_interval: Duration,
    ) -> Self {
        info!(
            target: "runtime::local",
            %local_side,
            max_hp = config.max_hp,
            spells = catalog.len(),
            "LocalMatchWorker initialized"
        );

        Self {
            guard: PickTimeoutGuard::from_config(&config),
            log: LogBuffer::new(config.max_log_lines),
            engine: TurnEngine::new(config),
            catalog,
            opponent,
            countdown: CountdownTracker::default(),
            local_side,
            command_rx,
            event_bus,
            tick_interval,
        }
    }

    /// Main worker loop. Starts a session, then serves commands and timer
    /// ticks until every handle is dropped.
    pub async fn run(mut self) {
        self.restart().await;

        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => break,
                },
                now = ticker.tick() => {
                    let elapsed = now.saturating_duration_since(last_tick);
                    last_tick = now;
                    self.on_tick(elapsed).await;
                }
            }
        }

        debug!(target: "runtime::local", "Command channel closed, worker stopping");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Pick { element, reply } => {
                let result = self.pick(element);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::local", "Pick reply channel closed (caller dropped)");
                }
            }
            Command::Confirm { reply } => {
                let result = self.confirm();
                if result.is_ok() && self.resolve_ready() {
                    self.prepare_turn().await;
                }
                if reply.send(result).is_err() {
                    debug!(target: "runtime::local", "Confirm reply channel closed (caller dropped)");
                }
            }
            Command::ClearPicks { reply } => {
                let result = self.clear_picks();
                if reply.send(result).is_err() {
                    debug!(target: "runtime::local", "ClearPicks reply channel closed (caller dropped)");
                }
            }
            Command::Restart { reply } => {
                self.restart().await;
                if reply.send(Ok(())).is_err() {
                    debug!(target: "runtime::local", "Restart reply channel closed (caller dropped)");
                }
            }
            Command::View { reply } => {
                if reply.send(self.view()).is_err() {
                    debug!(target: "runtime::local", "View reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn pick(&mut self, element: Element) -> Result<()> {
        self.engine
            .add_pick(self.local_side, element)
            .inspect_err(|err| debug!(target: "runtime::local", error = %err, "Pick ignored"))?;
        self.publish_picks(false);
        Ok(())
    }

    fn clear_picks(&mut self) -> Result<()> {
        self.engine.clear_picks(self.local_side)?;
        self.publish_picks(false);
        Ok(())
    }

    fn confirm(&mut self) -> Result<ElementPair> {
        let pair = self
            .engine
            .confirm(self.local_side)
            .inspect_err(|err| debug!(target: "runtime::local", error = %err, "Confirm refused"))?;
        self.guard.note_manual_submit(pair);
        self.publish_picks(true);
        Ok(pair)
    }

    /// Full reset to turn 1. Safe to call at any point, any number of times.
    async fn restart(&mut self) {
        self.engine.restart();
        self.guard.reset();
        self.log.clear();
        self.countdown = CountdownTracker::default();

        info!(target: "runtime::local", local_side = %self.local_side, "Battle start");
        self.event_bus.publish(MatchEvent::SessionStarted {
            side: self.local_side,
            max_hp: self.engine.config().max_hp,
        });
        self.push_log("Battle start!");
        self.push_log(turn_banner(1));

        self.prepare_turn().await;
    }

    /// Open picks for the current turn: fetch the opponent's pair and start
    /// the local countdown. A stunned local side has nothing to pick, so its
    /// turn resolves straight away.
    async fn prepare_turn(&mut self) {
        loop {
            if self.engine.is_ended() {
                self.guard.cancel();
                return;
            }

            self.event_bus.publish(MatchEvent::TurnStarted {
                turn: self.engine.turn_number(),
            });
            self.request_opponent_pick().await;

            if !self.engine.combatant(self.local_side).is_stunned() {
                self.guard.start();
                self.publish_countdown();
                return;
            }

            self.guard.cancel();
            if !self.resolve_ready() {
                return;
            }
        }
    }

    async fn request_opponent_pick(&mut self) {
        let side = self.local_side.opponent();
        if self.engine.combatant(side).is_stunned() {
            return;
        }

        let ctx = PickContext {
            side,
            turn: self.engine.turn_number(),
            own_hp: self.engine.combatant(side).hp(),
            opponent_hp: self.engine.combatant(self.local_side).hp(),
            max_hp: self.engine.config().max_hp,
        };
        let pair = match self.opponent.provide_pick(&ctx).await {
            Ok(pair) => pair,
            Err(error) => {
                warn!(
                    target: "runtime::local",
                    error = %error,
                    "Opponent provider failed, submitting the forced pick"
                );
                self.engine.config().forced_pick
            }
        };

        if let Err(error) = self.engine.submit_pair(side, pair) {
            debug!(target: "runtime::local", error = %error, "Opponent pick refused");
        }
    }

    /// Resolve the turn if both sides are committed. Returns whether it did.
    fn resolve_ready(&mut self) -> bool {
        let Some(report) = self.engine.resolve(&self.catalog) else {
            return false;
        };

        info!(
            target: "runtime::local",
            turn = report.turn,
            first_mover = %report.first_mover,
            hp_a = report.hp.a,
            hp_b = report.hp.b,
            "Turn resolved"
        );

        for line in report.log_lines() {
            self.push_log(line);
        }
        self.push_log(report.status_line());

        let opponent = self.local_side.opponent();
        self.event_bus.publish(MatchEvent::TurnResolved {
            turn: report.turn,
            my_hp: report.hp[self.local_side],
            opponent_hp: report.hp[opponent],
        });
        self.publish_picks(false);

        if let Some(result) = report.result {
            self.guard.cancel();
            self.publish_countdown();
            self.event_bus.publish(MatchEvent::Ended {
                outcome: result.outcome_for(self.local_side),
            });
        }
        true
    }

    async fn on_tick(&mut self, elapsed: Duration) {
        match self.guard.tick(elapsed) {
            None => self.publish_countdown(),
            Some(TimeoutAction::ForcePick(pair)) => {
                if let Err(error) = self.engine.force_pick(self.local_side, pair) {
                    debug!(target: "runtime::local", error = %error, "Forced pick refused");
                    return;
                }
                let consecutive = self.guard.consecutive_forced();
                info!(target: "runtime::local", %pair, consecutive, "Countdown expired, pick forced");
                self.push_log(format!("Time's up! {} plays {}.", self.local_side, pair));
                self.event_bus
                    .publish(MatchEvent::PickForced { consecutive });
                self.publish_picks(true);

                if self.resolve_ready() {
                    self.prepare_turn().await;
                }
            }
            Some(TimeoutAction::Forfeit) => {
                let Some(result) = self.engine.forfeit(self.local_side) else {
                    return;
                };
                info!(target: "runtime::local", local_side = %self.local_side, "Forfeit after repeated timeouts");
                self.push_log(format!("{} forfeits after repeated timeouts.", self.local_side));
                self.push_log(result.to_string());
                self.publish_countdown();
                self.event_bus.publish(MatchEvent::Ended {
                    outcome: result.outcome_for(self.local_side),
                });
            }
        }
    }

    fn view(&self) -> MatchView {
        let side = self.local_side;
        let picks = self.engine.picks();
        MatchView {
            mode: MatchMode::Local,
            side: Some(side),
            turn: self.engine.turn_number(),
            my_hp: self.engine.combatant(side).hp(),
            opponent_hp: self.engine.combatant(side.opponent()).hp(),
            max_hp: self.engine.config().max_hp,
            picks: picks.display(side),
            remaining_secs: self.guard.remaining_secs(),
            input_locked: self.engine.is_ended()
                || self.engine.combatant(side).is_stunned()
                || picks.buffer(side).is_submitted(),
            outcome: self.engine.result().map(|result| result.outcome_for(side)),
            log: self.log.to_vec(),
        }
    }

    fn push_log(&mut self, line: impl Into<String>) {
        let line = line.into();
        self.log.push(line.clone());
        self.event_bus.publish(LogEvent::new(line));
    }

    fn publish_picks(&self, confirmed: bool) {
        self.event_bus.publish(MatchEvent::PicksChanged {
            picks: self.engine.picks().display(self.local_side),
            confirmed,
        });
    }

    fn publish_countdown(&mut self) {
        if let Some(remaining_secs) = self.countdown.update(self.guard.remaining_secs()) {
            self.event_bus.publish(TimerEvent { remaining_secs });
        }
    }
}

