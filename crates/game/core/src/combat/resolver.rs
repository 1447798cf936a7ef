use crate::spell::{EffectKind, Spell};
use crate::state::{CombatantState, PerSide, Side};

use super::cast::Cast;
use super::log::CombatLog;

/// Applies spells to combat state.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply `spell` cast by `actor`, effect by effect in declaration order.
    ///
    /// `None` is a misfire: nothing changes and a single log line is returned.
    /// Hp is clamped by every individual step.
    pub fn apply(
        spell: Option<&Spell>,
        actor: Side,
        combatants: &mut PerSide<CombatantState>,
    ) -> Vec<CombatLog> {
        let Some(spell) = spell else {
            return vec![CombatLog::Misfire {
                side: actor,
                pair: None,
            }];
        };

        let target = actor.opponent();
        let mut log = Vec::with_capacity(spell.effects().len() + 1);
        log.push(CombatLog::Casts {
            side: actor,
            spell: spell.display_name().to_owned(),
        });

        for effect in spell.effects() {
            let entry = match effect.kind {
                EffectKind::Damage => {
                    let state = &mut combatants[target];
                    state.take_damage(effect.value);
                    CombatLog::Damaged {
                        target,
                        amount: effect.value,
                        hp: state.hp(),
                    }
                }
                EffectKind::Pierce => {
                    let state = &mut combatants[target];
                    state.take_damage(effect.value);
                    CombatLog::Pierced {
                        target,
                        amount: effect.value,
                        hp: state.hp(),
                    }
                }
                EffectKind::Heal => {
                    let state = &mut combatants[actor];
                    state.heal(effect.value);
                    CombatLog::Healed {
                        side: actor,
                        amount: effect.value,
                        hp: state.hp(),
                    }
                }
                EffectKind::Stun => {
                    combatants[target].set_stunned(true);
                    CombatLog::StunApplied { target }
                }
                EffectKind::Haste => {
                    combatants[actor].set_haste(true);
                    CombatLog::HasteGained { side: actor }
                }
            };
            log.push(entry);
        }

        log
    }

    /// Apply a [`Cast`], keeping stun inaction and misfires apart in the log.
    pub fn apply_cast(
        cast: &Cast,
        actor: Side,
        combatants: &mut PerSide<CombatantState>,
    ) -> Vec<CombatLog> {
        match cast {
            Cast::Stunned => vec![CombatLog::Stunned { side: actor }],
            Cast::Misfire(pair) => vec![CombatLog::Misfire {
                side: actor,
                pair: Some(*pair),
            }],
            Cast::Spell(spell) => Self::apply(Some(spell), actor, combatants),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::spell::Effect;

    fn fresh() -> PerSide<CombatantState> {
        PerSide::splat(CombatantState::new(20))
    }

    fn spell(effects: Vec<Effect>) -> Spell {
        Spell::new("test", "Test Spell", Element::Fire, Element::Water, effects)
    }

    #[test]
    fn misfire_changes_nothing() {
        let mut combatants = fresh();
        let log = EffectResolver::apply(None, Side::A, &mut combatants);
        assert_eq!(combatants, fresh());
        assert_eq!(
            log,
            vec![CombatLog::Misfire {
                side: Side::A,
                pair: None
            }]
        );
    }

    #[test]
    fn effects_apply_in_order_with_per_step_clamping() {
        let mut combatants = fresh();
        combatants[Side::B].take_damage(2);

        let spell = spell(vec![Effect::heal(5), Effect::damage(3)]);
        combatants[Side::A].take_damage(1);
        EffectResolver::apply(Some(&spell), Side::B, &mut combatants);

        assert_eq!(combatants[Side::B].hp(), 20);
        assert_eq!(combatants[Side::A].hp(), 16);
    }

    #[test]
    fn pierce_matches_damage() {
        let mut damaged = fresh();
        let mut pierced = fresh();
        EffectResolver::apply(Some(&spell(vec![Effect::damage(5)])), Side::A, &mut damaged);
        EffectResolver::apply(Some(&spell(vec![Effect::pierce(5)])), Side::A, &mut pierced);
        assert_eq!(damaged, pierced);
    }

    #[test]
    fn status_effects_target_correct_side() {
        let mut combatants = fresh();
        let log = EffectResolver::apply(
            Some(&spell(vec![Effect::stun(), Effect::haste()])),
            Side::A,
            &mut combatants,
        );

        assert!(combatants[Side::B].is_stunned());
        assert!(!combatants[Side::A].is_stunned());
        assert!(combatants[Side::A].has_haste());
        assert!(!combatants[Side::B].has_haste());
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn hp_stays_in_bounds() {
        let mut combatants = fresh();
        let big = spell(vec![Effect::damage(500), Effect::heal(500)]);
        for _ in 0..3 {
            EffectResolver::apply(Some(&big), Side::A, &mut combatants);
            EffectResolver::apply(Some(&big), Side::B, &mut combatants);
            for (_, state) in combatants.iter() {
                assert!((0..=state.max_hp()).contains(&state.hp()));
            }
        }
    }

    #[test]
    fn stunned_cast_is_logged_apart_from_misfire() {
        let mut combatants = fresh();
        let stunned = EffectResolver::apply_cast(&Cast::Stunned, Side::B, &mut combatants);
        assert_eq!(stunned[0].to_string(), "Side B is stunned and cannot act.");

        let pair = crate::ElementPair::new(Element::Fire, Element::Earth);
        let misfire = EffectResolver::apply_cast(&Cast::Misfire(pair), Side::B, &mut combatants);
        assert_eq!(
            misfire[0].to_string(),
            "Side B combined Fire + Earth, but nothing happened."
        );
    }
}
