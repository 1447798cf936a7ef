//! High-level runtime orchestrator.
//!
//! The runtime owns the match worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a local or online duel.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_core::{GameConfig, Side, SpellCatalog};

use crate::api::{PickProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::net::Transport;
use crate::workers::{Command, LocalMatchWorker, PeerWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// How often the countdown is advanced.
    pub tick_interval: Duration,
    /// Side played through the handle in local matches.
    pub local_side: Side,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            tick_interval: Duration::from_millis(100),
            local_side: Side::A,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUEL_MAX_HP` - Starting hp of both sides (default: 20)
    /// - `DUEL_PICK_TIME_LIMIT_MS` - Countdown per turn (default: 15000)
    /// - `DUEL_TICK_MS` - Countdown tick interval (default: 100)
    /// - `DUEL_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `DUEL_COMMAND_BUFFER` - Command queue size (default: 32)
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(max_hp) = read_env::<i32>("DUEL_MAX_HP") {
            self.game = self.game.with_max_hp(max_hp);
        }
        if let Some(limit) = read_env::<u64>("DUEL_PICK_TIME_LIMIT_MS") {
            self.game = self.game.with_pick_time_limit(Duration::from_millis(limit));
        }
        if let Some(tick) = read_env::<u64>("DUEL_TICK_MS") {
            self.tick_interval = Duration::from_millis(tick.max(1));
        }
        if let Some(capacity) = read_env::<usize>("DUEL_EVENT_BUFFER") {
            self.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("DUEL_COMMAND_BUFFER") {
            self.command_buffer_size = capacity.max(1);
        }
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that runs one match worker.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every handle clone has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<Arc<SpellCatalog>>,
    opponent: Option<Arc<dyn PickProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            opponent: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the spell catalog (required)
    pub fn catalog(mut self, catalog: impl Into<Arc<SpellCatalog>>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Set the provider that picks for the opponent in local matches
    pub fn opponent(mut self, provider: impl PickProvider + 'static) -> Self {
        self.opponent = Some(Arc::new(provider));
        self
    }

    /// Build a local match against the configured opponent provider.
    pub fn build(self) -> Result<Runtime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;
        let opponent = self.opponent.ok_or(RuntimeError::MissingOpponent)?;
        let (command_rx, event_bus, handle) = Self::channels(&self.config);

        let worker = LocalMatchWorker::new(
            self.config.game,
            catalog,
            opponent,
            self.config.local_side,
            command_rx,
            event_bus,
            self.config.tick_interval,
        );
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }

    /// Build an online peer over `transport`.
    ///
    /// Side and authority follow from room membership; the configured
    /// `local_side` and opponent provider are not used.
    pub fn build_online<T: Transport>(self, transport: T) -> Result<Runtime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;
        let (command_rx, event_bus, handle) = Self::channels(&self.config);

        let worker = PeerWorker::new(
            self.config.game,
            catalog,
            transport,
            command_rx,
            event_bus,
            self.config.tick_interval,
        );
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }

    fn channels(config: &RuntimeConfig) -> (mpsc::Receiver<Command>, EventBus, RuntimeHandle) {
        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size);
        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());
        (command_rx, event_bus, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_catalog_and_opponent() {
        let missing_catalog = Runtime::builder().build();
        assert!(matches!(missing_catalog, Err(RuntimeError::MissingCatalog)));

        let missing_opponent = Runtime::builder().catalog(SpellCatalog::new()).build();
        assert!(matches!(missing_opponent, Err(RuntimeError::MissingOpponent)));
    }
}
