//! Runtime orchestration for the elemental duel.
//!
//! This crate wires the deterministic [`game_core::TurnEngine`] to tokio
//! workers, pick providers and the network layer. Consumers embed [`Runtime`]
//! to run a match, subscribe to events, and send picks through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`net`] holds room membership, the authority, client sync and transport
//! - [`providers`] supplies non-human pick sources such as the scripted AI
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod net;
pub mod providers;
pub mod runtime;

mod workers;

pub use api::{
    FixedPickProvider, LogBuffer, MatchMode, MatchView, PickContext, PickProvider, Result,
    RuntimeError, RuntimeHandle,
};
pub use events::{Event, EventBus, LogEvent, MatchEvent, TimerEvent, Topic};
pub use net::{
    ClientSync, LoopbackEndpoint, LoopbackHub, NetMessage, NetworkAuthority, PeerId, Room,
    Transport, TransportEvent, TurnBroadcast,
};
pub use providers::SimpleAi;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
