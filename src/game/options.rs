use super::tier::TierTable;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How many terminal dice a player must collect to win.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn target(self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::InvalidGameOptions),
        }
    }
}

/// Options for customising a game.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GameOptions {
    pub difficulty: Difficulty,
    /// The name of the human player, who always sits in the first seat.
    pub human_name: String,
    pub tiers: TierTable,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            human_name: "You".to_string(),
            tiers: TierTable::default(),
        }
    }
}

impl GameOptions {
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Default::default()
        }
    }

    pub fn target(&self) -> usize {
        self.difficulty.target()
    }
}
