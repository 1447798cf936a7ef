use super::picks::PickCollector;

/// Turn counter and the picks collected for the current turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnState {
    /// Logical clock. Starts at 1 and moves by exactly one per resolved turn.
    pub number: u32,
    pub picks: PickCollector,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            number: 1,
            picks: PickCollector::new(),
        }
    }

    /// Move to the next turn with empty pick buffers.
    pub fn advance(&mut self) {
        self.number += 1;
        self.picks.reset();
    }

    /// Odd turns go to side A when no haste is in play.
    pub fn is_odd(&self) -> bool {
        self.number % 2 == 1
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
