use crate::state::Side;

/// Decides which side's spell is applied first in a turn.
pub struct InitiativeResolver;

impl InitiativeResolver {
    /// Exactly one hasted side moves first. Otherwise side A moves first on
    /// odd turns and side B on even turns.
    ///
    /// Both-haste cancels out to the parity rule.
    pub const fn decide(turn: u32, haste_a: bool, haste_b: bool) -> Side {
        match (haste_a, haste_b) {
            (true, false) => Side::A,
            (false, true) => Side::B,
            _ if turn % 2 == 1 => Side::A,
            _ => Side::B,
        }
    }
}
