//! Pick provider implementations for non-human sides.

pub mod ai;

pub use ai::SimpleAi;
