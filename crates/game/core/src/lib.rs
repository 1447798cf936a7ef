//! Deterministic duel rules shared by every peer.
//!
//! `game-core` defines the canonical rules of the elemental duel: element
//! picks, the spell catalog, effect application, initiative and the turn state
//! machine. All combat state mutation flows through [`engine::TurnEngine`],
//! and both the local runtime and the network authority drive the same engine
//! so that every peer computes identical turn outcomes.
//!
//! The crate performs no I/O and carries no logging; callers receive typed
//! reports ([`TurnReport`], [`RebuildReport`]) and decide what to surface.
pub mod combat;
pub mod config;
pub mod element;
pub mod engine;
pub mod error;
pub mod spell;
pub mod state;

pub use combat::{
    Cast, CombatLog, EffectResolver, InitiativeResolver, MatchResult, Outcome,
};
pub use config::GameConfig;
pub use element::{Element, ElementPair, RecipeKey};
pub use engine::{Phase, PickTimeoutGuard, TimeoutAction, TurnEngine, TurnReport, turn_banner};
pub use error::{ErrorSeverity, GameError};
pub use spell::{
    DiscardedSpell, Effect, EffectKind, EffectRecord, RebuildReport, Spell, SpellCatalog,
    SpellDefinitionError, SpellRecord,
};
pub use state::{
    CombatantState, PerSide, PickBuffer, PickCollector, PickError, Side, StatusFlags, TurnState,
};
