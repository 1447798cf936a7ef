use crate::combat::{Cast, CombatLog, MatchResult};
use crate::state::{PerSide, Side};

/// Everything that happened while resolving one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    /// The turn that was resolved.
    pub turn: u32,
    pub first_mover: Side,
    pub casts: PerSide<Cast>,
    /// Effect log in application order.
    pub log: Vec<CombatLog>,
    /// Hp of both sides after the turn.
    pub hp: PerSide<i32>,
    /// Set when the turn ended the match.
    pub result: Option<MatchResult>,
}

impl TurnReport {
    /// Turn number the peers move to. Sent even for a terminal turn so that
    /// the result broadcast is never mistaken for a stale one.
    pub fn next_turn(&self) -> u32 {
        self.turn + 1
    }

    /// One-line summary of both casts: `Side A: Great Fireball / Side B: stunned`.
    pub fn summary_line(&self) -> String {
        format!(
            "{}: {} / {}: {}",
            Side::A,
            self.casts[Side::A],
            Side::B,
            self.casts[Side::B]
        )
    }

    /// The match result, or the banner for the next turn.
    pub fn status_line(&self) -> String {
        match self.result {
            Some(result) => result.to_string(),
            None => turn_banner(self.next_turn()),
        }
    }

    /// Rendered effect log.
    pub fn log_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.log.iter().map(ToString::to_string)
    }
}

/// Banner logged when a turn begins.
pub fn turn_banner(turn: u32) -> String {
    format!("--- Turn {turn} ---")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementPair};

    fn report(result: Option<MatchResult>) -> TurnReport {
        TurnReport {
            turn: 3,
            first_mover: Side::B,
            casts: PerSide::new(
                Cast::Stunned,
                Cast::Misfire(ElementPair::new(Element::Wind, Element::Earth)),
            ),
            log: vec![CombatLog::Stunned { side: Side::A }],
            hp: PerSide::new(12, 9),
            result,
        }
    }

    #[test]
    fn lines_for_running_match() {
        let report = report(None);
        assert_eq!(
            report.summary_line(),
            "Side A: stunned / Side B: misfire (Wind + Earth)"
        );
        assert_eq!(report.status_line(), "--- Turn 4 ---");
        assert_eq!(report.next_turn(), 4);
    }

    #[test]
    fn terminal_status_line_names_winner() {
        let report = report(Some(MatchResult::Winner(Side::B)));
        assert_eq!(report.status_line(), "Side B wins!");
        assert_eq!(report.next_turn(), 4);
    }
}
