//! Spell definitions and their validation.

use crate::element::{Element, ElementPair, RecipeKey};
use crate::error::{ErrorSeverity, GameError};

use super::effect::{Effect, EffectKind};

/// Raw spell definition as supplied by content data.
///
/// Values are kept signed so malformed data can be detected and reported
/// instead of failing to parse.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellRecord {
    pub id: String,
    pub display_name: String,
    pub first: Element,
    pub second: Element,
    pub effects: Vec<EffectRecord>,
}

/// Raw effect step inside a [`SpellRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectRecord {
    pub kind: EffectKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_duration"))]
    pub duration: i32,
}

#[cfg(feature = "serde")]
fn default_duration() -> i32 {
    1
}

impl EffectRecord {
    pub const fn new(kind: EffectKind, value: i32) -> Self {
        Self {
            kind,
            value,
            duration: 1,
        }
    }
}

/// Reasons a [`SpellRecord`] is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellDefinitionError {
    #[error("spell id is empty")]
    EmptyId,

    #[error("spell `{id}` has an empty display name")]
    EmptyDisplayName { id: String },

    #[error("spell `{id}` has no effects")]
    NoEffects { id: String },

    #[error("spell `{id}` effect #{index} has negative value {value}")]
    NegativeValue { id: String, index: usize, value: i32 },

    #[error("spell `{id}` effect #{index} has non-positive duration {duration}")]
    InvalidDuration {
        id: String,
        index: usize,
        duration: i32,
    },
}

impl GameError for SpellDefinitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use SpellDefinitionError::*;
        match self {
            EmptyId => "SPELL_EMPTY_ID",
            EmptyDisplayName { .. } => "SPELL_EMPTY_DISPLAY_NAME",
            NoEffects { .. } => "SPELL_NO_EFFECTS",
            NegativeValue { .. } => "SPELL_NEGATIVE_VALUE",
            InvalidDuration { .. } => "SPELL_INVALID_DURATION",
        }
    }
}

/// Validated spell definition. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spell {
    id: String,
    display_name: String,
    recipe: RecipeKey,
    effects: Vec<Effect>,
}

impl Spell {
    /// Builds a spell from already-valid parts.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        first: Element,
        second: Element,
        effects: Vec<Effect>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            recipe: RecipeKey::new(first, second),
            effects,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn recipe(&self) -> RecipeKey {
        self.recipe
    }

    /// Effects in application order.
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|effect| effect.kind == kind)
    }

    /// True if `pair` (in either order) casts this spell.
    pub fn matches(&self, pair: ElementPair) -> bool {
        pair.recipe() == self.recipe
    }
}

impl TryFrom<SpellRecord> for Spell {
    type Error = SpellDefinitionError;

    fn try_from(record: SpellRecord) -> Result<Self, Self::Error> {
        let id = record.id.trim();
        if id.is_empty() {
            return Err(SpellDefinitionError::EmptyId);
        }
        if record.display_name.trim().is_empty() {
            return Err(SpellDefinitionError::EmptyDisplayName { id: id.to_owned() });
        }
        if record.effects.is_empty() {
            return Err(SpellDefinitionError::NoEffects { id: id.to_owned() });
        }

        let mut effects = Vec::with_capacity(record.effects.len());
        for (index, effect) in record.effects.iter().enumerate() {
            let value = u32::try_from(effect.value).map_err(|_| {
                SpellDefinitionError::NegativeValue {
                    id: id.to_owned(),
                    index,
                    value: effect.value,
                }
            })?;
            let duration = u32::try_from(effect.duration)
                .ok()
                .filter(|duration| *duration > 0)
                .ok_or_else(|| SpellDefinitionError::InvalidDuration {
                    id: id.to_owned(),
                    index,
                    duration: effect.duration,
                })?;
            effects.push(Effect {
                kind: effect.kind,
                value,
                duration,
            });
        }

        Ok(Spell::new(
            id,
            record.display_name.trim(),
            record.first,
            record.second,
            effects,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(effects: Vec<EffectRecord>) -> SpellRecord {
        SpellRecord {
            id: "F+F".into(),
            display_name: "Great Fireball".into(),
            first: Element::Fire,
            second: Element::Fire,
            effects,
        }
    }

    #[test]
    fn valid_record_converts() {
        let spell = Spell::try_from(record(vec![EffectRecord::new(EffectKind::Damage, 6)])).unwrap();
        assert_eq!(spell.id(), "F+F");
        assert_eq!(spell.effects(), &[Effect::damage(6)]);
        assert!(spell.matches(ElementPair::new(Element::Fire, Element::Fire)));
    }

    #[test]
    fn rejects_negative_value() {
        let err = Spell::try_from(record(vec![
            EffectRecord::new(EffectKind::Heal, 2),
            EffectRecord::new(EffectKind::Damage, -1),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            SpellDefinitionError::NegativeValue {
                id: "F+F".into(),
                index: 1,
                value: -1
            }
        );
        assert_eq!(err.error_code(), "SPELL_NEGATIVE_VALUE");
    }

    #[test]
    fn rejects_zero_duration() {
        let mut effect = EffectRecord::new(EffectKind::Stun, 0);
        effect.duration = 0;
        let err = Spell::try_from(record(vec![effect])).unwrap_err();
        assert!(matches!(err, SpellDefinitionError::InvalidDuration { .. }));
    }

    #[test]
    fn rejects_blank_identity() {
        let mut blank_id = record(vec![EffectRecord::new(EffectKind::Damage, 1)]);
        blank_id.id = "  ".into();
        assert_eq!(Spell::try_from(blank_id).unwrap_err(), SpellDefinitionError::EmptyId);

        let mut blank_name = record(vec![EffectRecord::new(EffectKind::Damage, 1)]);
        blank_name.display_name = String::new();
        assert!(matches!(
            Spell::try_from(blank_name).unwrap_err(),
            SpellDefinitionError::EmptyDisplayName { .. }
        ));

        assert!(matches!(
            Spell::try_from(record(Vec::new())).unwrap_err(),
            SpellDefinitionError::NoEffects { .. }
        ));
    }
}
