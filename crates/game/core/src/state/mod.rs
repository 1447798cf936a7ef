//! Combat state owned by the turn engine.
//!
//! This module holds the per-side data (hp, status flags, pick buffers) and
//! the turn counter. Runtime layers query it but mutate it exclusively through
//! [`crate::engine::TurnEngine`] or the explicit sync methods.
mod combatant;
mod picks;
mod side;
mod turn;

pub use combatant::{CombatantState, StatusFlags};
pub use picks::{PickBuffer, PickCollector, PickError};
pub use side::{PerSide, Side};
pub use turn::TurnState;
