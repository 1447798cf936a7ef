use core::fmt;

use crate::state::{PerSide, Side};

/// Terminal outcome of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchResult {
    Winner(Side),
    Draw,
}

/// A match result seen from one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl MatchResult {
    /// Result implied by the current hp, if the match is over.
    ///
    /// Both sides at 0 is a draw even when one of them struck first.
    pub fn from_hp(hp: PerSide<i32>) -> Option<Self> {
        match (hp.a <= 0, hp.b <= 0) {
            (true, true) => Some(MatchResult::Draw),
            (true, false) => Some(MatchResult::Winner(Side::B)),
            (false, true) => Some(MatchResult::Winner(Side::A)),
            (false, false) => None,
        }
    }

    pub fn outcome_for(self, side: Side) -> Outcome {
        match self {
            MatchResult::Draw => Outcome::Draw,
            MatchResult::Winner(winner) if winner == side => Outcome::Win,
            MatchResult::Winner(_) => Outcome::Loss,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Winner(side) => write!(f, "{side} wins!"),
            MatchResult::Draw => f.write_str("Both fall together. Draw!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_from_hp() {
        assert_eq!(MatchResult::from_hp(PerSide::new(5, 3)), None);
        assert_eq!(
            MatchResult::from_hp(PerSide::new(0, 3)),
            Some(MatchResult::Winner(Side::B))
        );
        assert_eq!(
            MatchResult::from_hp(PerSide::new(2, 0)),
            Some(MatchResult::Winner(Side::A))
        );
        assert_eq!(MatchResult::from_hp(PerSide::new(0, 0)), Some(MatchResult::Draw));
    }

    #[test]
    fn outcome_is_relative_to_side() {
        let result = MatchResult::Winner(Side::A);
        assert_eq!(result.outcome_for(Side::A), Outcome::Win);
        assert_eq!(result.outcome_for(Side::B), Outcome::Loss);
        assert_eq!(MatchResult::Draw.outcome_for(Side::B), Outcome::Draw);
    }
}
