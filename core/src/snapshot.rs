use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a presentation layer needs to redraw after a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub selection: Selection,
    pub state: TurnState,
    pub turn_count: u32,
    pub is_busy: bool,
    pub is_won: bool,
    pub elapsed: Elapsed,
    pub generation: Generation,
}

impl GameSnapshot {
    pub fn pairs_left(&self) -> CardCount {
        self.board.pairs_left()
    }

    /// Whether `index` belongs to the turn in progress.
    pub fn is_selected(&self, index: CardIndex) -> bool {
        self.selection.contains(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_survives_json() {
        let mut engine = PlayEngine::new(
            Board::from_colors(["red", "blue", "red", "blue"], 2).unwrap(),
            Rules::default(),
            ManualClock::new(),
        );
        engine.select_card(1).unwrap();

        let snapshot = engine.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: GameSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, snapshot);
        assert!(parsed.is_selected(1));
        assert_eq!(parsed.state, TurnState::OneSelected);
        assert_eq!(parsed.pairs_left(), 2);
    }
}
