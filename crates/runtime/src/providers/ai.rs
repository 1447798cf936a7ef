//! Scripted opponent for offline play.
//!
//! The policy only looks at its own hp. Below the low-hp threshold it first
//! rolls to heal; otherwise, or when that roll fails, it rolls between a heavy
//! hit, a stunning gale and a steady fallback.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use game_core::{Element, ElementPair};

use crate::api::{PickContext, PickProvider, Result};

const HEAL: ElementPair = ElementPair::new(Element::Water, Element::Water);
const FIREBALL: ElementPair = ElementPair::new(Element::Fire, Element::Fire);
const GALE: ElementPair = ElementPair::new(Element::Water, Element::Wind);
const FALLBACK: ElementPair = ElementPair::new(Element::Earth, Element::Fire);

/// Weighted random opponent with a seeded, reproducible RNG.
#[derive(Debug)]
pub struct SimpleAi {
    rng: Mutex<StdRng>,
    low_hp_threshold: i32,
}

impl SimpleAi {
    pub const DEFAULT_LOW_HP_THRESHOLD: i32 = 8;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            low_hp_threshold: Self::DEFAULT_LOW_HP_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_low_hp_threshold(mut self, threshold: i32) -> Self {
        self.low_hp_threshold = threshold;
        self
    }

    /// Pick a pair, drawing rolls in `[0, 1)` from `roll` as needed.
    ///
    /// A low-hp turn draws once for the heal and, if that fails, once more
    /// for the regular weights.
    pub fn choose(&self, own_hp: i32, mut roll: impl FnMut() -> f64) -> ElementPair {
        if own_hp <= self.low_hp_threshold && roll() < 0.7 {
            return HEAL;
        }
        let roll = roll();
        if roll < 0.4 {
            FIREBALL
        } else if roll < 0.6 {
            GALE
        } else {
            FALLBACK
        }
    }

    fn roll(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.r#gen::<f64>()
    }
}

#[async_trait]
impl PickProvider for SimpleAi {
    async fn provide_pick(&self, ctx: &PickContext) -> Result<ElementPair> {
        let pair = self.choose(ctx.own_hp, || self.roll());
        tracing::debug!(
            target: "runtime::ai",
            side = %ctx.side,
            turn = ctx.turn,
            own_hp = ctx.own_hp,
            %pair,
            "AI picked"
        );
        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Side;

    fn rolls(values: &[f64]) -> impl FnMut() -> f64 + '_ {
        let mut values = values.iter().copied();
        move || values.next().expect("policy drew more rolls than scripted")
    }

    #[test]
    fn low_hp_prefers_healing() {
        let ai = SimpleAi::new(0);
        assert_eq!(ai.choose(8, rolls(&[0.0])), HEAL);
        assert_eq!(ai.choose(8, rolls(&[0.69])), HEAL);
        assert_eq!(ai.choose(8, rolls(&[0.7, 0.1])), FIREBALL);
    }

    #[test]
    fn failed_heal_roll_falls_back_to_regular_weights() {
        let ai = SimpleAi::new(0);
        assert_eq!(ai.choose(5, rolls(&[0.8, 0.45])), GALE);
        assert_eq!(ai.choose(5, rolls(&[0.95, 0.9])), FALLBACK);

        let seeded = SimpleAi::new(7);
        let seen: std::collections::HashSet<_> =
            (0..500).map(|_| seeded.choose(5, || seeded.roll())).collect();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn healthy_rolls_follow_weights() {
        let ai = SimpleAi::new(0);
        assert_eq!(ai.choose(20, rolls(&[0.1])), FIREBALL);
        assert_eq!(ai.choose(20, rolls(&[0.45])), GALE);
        assert_eq!(ai.choose(20, rolls(&[0.6])), FALLBACK);
        assert_eq!(ai.choose(9, rolls(&[0.99])), FALLBACK);
    }

    #[tokio::test]
    async fn same_seed_same_sequence() {
        let ctx = PickContext {
            side: Side::B,
            turn: 1,
            own_hp: 20,
            opponent_hp: 20,
            max_hp: 20,
        };
        let left = SimpleAi::new(42);
        let right = SimpleAi::new(42);
        for _ in 0..16 {
            assert_eq!(
                left.provide_pick(&ctx).await.unwrap(),
                right.provide_pick(&ctx).await.unwrap()
            );
        }
    }
}
