use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Index of the player `steps` seats away from `from` in this direction.
    pub(crate) fn step(self, from: usize, steps: usize, players: usize) -> usize {
        let steps = steps % players;
        match self {
            Direction::Clockwise => (from + steps) % players,
            Direction::CounterClockwise => (from + players - steps) % players,
        }
    }
}

/// The interval after a player gets down to one card, during which the other
/// players may catch them for not having said UNO.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnoWindow {
    pub target: usize,
    pub said: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Continues,
    Ended { winner: usize, score: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Continues,
    RoundEnded {
        winner: usize,
        score: u32,
        next_dealer: usize,
    },
    GameEnded {
        winner: usize,
        score: u32,
        total: u32,
    },
}
