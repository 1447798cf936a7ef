/// The closed set of effects a spell step can have.
///
/// [`crate::EffectResolver`] matches this exhaustively, so a new kind cannot
/// be added without deciding how it resolves.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum EffectKind {
    /// Reduces the opponent's hp.
    Damage,
    /// Defense-ignoring damage. There is no defense stat yet, so it resolves
    /// exactly like [`EffectKind::Damage`].
    Pierce,
    /// Restores the caster's hp.
    Heal,
    /// Prevents the opponent from picking next turn.
    Stun,
    /// Grants the caster initiative next turn.
    Haste,
}

/// A single validated spell step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    /// Magnitude for Damage / Pierce / Heal. Ignored by Stun and Haste.
    pub value: u32,
    /// Turns the effect lasts. Status effects currently always last 1.
    pub duration: u32,
}

impl Effect {
    pub const fn new(kind: EffectKind, value: u32) -> Self {
        Self {
            kind,
            value,
            duration: 1,
        }
    }

    pub const fn damage(value: u32) -> Self {
        Self::new(EffectKind::Damage, value)
    }

    pub const fn pierce(value: u32) -> Self {
        Self::new(EffectKind::Pierce, value)
    }

    pub const fn heal(value: u32) -> Self {
        Self::new(EffectKind::Heal, value)
    }

    pub const fn stun() -> Self {
        Self::new(EffectKind::Stun, 0)
    }

    pub const fn haste() -> Self {
        Self::new(EffectKind::Haste, 0)
    }
}
