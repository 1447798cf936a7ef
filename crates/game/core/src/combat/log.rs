use core::fmt;

use crate::element::ElementPair;
use crate::state::Side;

/// One line of the combat log.
///
/// `Display` renders the English line shown to players.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatLog {
    Casts { side: Side, spell: String },
    /// Undefined recipe. The side acted but nothing happened.
    Misfire { side: Side, pair: Option<ElementPair> },
    /// The side could not act because of a stun.
    Stunned { side: Side },
    Damaged { target: Side, amount: u32, hp: i32 },
    Pierced { target: Side, amount: u32, hp: i32 },
    Healed { side: Side, amount: u32, hp: i32 },
    StunApplied { target: Side },
    HasteGained { side: Side },
}

impl fmt::Display for CombatLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatLog::Casts { side, spell } => write!(f, "{side} casts {spell}!"),
            CombatLog::Misfire { side, pair: Some(pair) } => {
                write!(f, "{side} combined {pair}, but nothing happened.")
            }
            CombatLog::Misfire { side, pair: None } => {
                write!(f, "{side} acted, but nothing happened.")
            }
            CombatLog::Stunned { side } => write!(f, "{side} is stunned and cannot act."),
            CombatLog::Damaged { target, amount, hp } => {
                write!(f, "{target} takes {amount} damage (hp {hp}).")
            }
            CombatLog::Pierced { target, amount, hp } => {
                write!(f, "{target} takes {amount} piercing damage (hp {hp}).")
            }
            CombatLog::Healed { side, amount, hp } => {
                write!(f, "{side} recovers {amount} hp (hp {hp}).")
            }
            CombatLog::StunApplied { target } => {
                write!(f, "{target} is stunned for the next turn!")
            }
            CombatLog::HasteGained { side } => write!(f, "{side} readies to strike first!"),
        }
    }
}
