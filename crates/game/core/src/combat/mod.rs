//! Turn resolution primitives.
//!
//! These are pure functions over combat state. [`crate::TurnEngine`] strings
//! them together, and the network authority reuses the engine, so local and
//! online matches compute identical outcomes.
//!
//! - [`InitiativeResolver`]: which side's spell lands first
//! - [`EffectResolver`]: ordered application of one spell's effects
//! - [`CombatLog`]: structured log entries produced during resolution
//! - [`MatchResult`]: terminal outcome of a match

mod cast;
mod initiative;
mod log;
mod resolver;
mod result;

pub use cast::Cast;
pub use initiative::InitiativeResolver;
pub use log::CombatLog;
pub use resolver::EffectResolver;
pub use result::{MatchResult, Outcome};
