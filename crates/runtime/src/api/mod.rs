//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or networking.

pub mod errors;
pub mod handle;
pub mod providers;
pub mod view;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use providers::{FixedPickProvider, PickContext, PickProvider};
pub use view::{LogBuffer, MatchMode, MatchView};
