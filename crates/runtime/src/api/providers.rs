//! Asynchronous abstraction for sourcing a side's element pair.
//!
//! The local match asks a [`PickProvider`] for the opponent's pair at the
//! start of each turn, so the opponent can be a scripted AI, a fixed fixture
//! in tests, or anything else that can answer asynchronously.
use async_trait::async_trait;
use game_core::{ElementPair, Side};

use super::errors::Result;

/// What a provider sees when asked for a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickContext {
    pub side: Side,
    pub turn: u32,
    pub own_hp: i32,
    pub opponent_hp: i32,
    pub max_hp: i32,
}

/// Trait for providing a side's two elements for the current turn.
#[async_trait]
pub trait PickProvider: Send + Sync {
    async fn provide_pick(&self, ctx: &PickContext) -> Result<ElementPair>;
}

/// Always answers with the same pair.
#[derive(Debug, Clone, Copy)]
pub struct FixedPickProvider(pub ElementPair);

#[async_trait]
impl PickProvider for FixedPickProvider {
    async fn provide_pick(&self, _ctx: &PickContext) -> Result<ElementPair> {
        Ok(self.0)
    }
}
