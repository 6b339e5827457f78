use super::player::Player;
use super::tier::TierTable;
use serde::{Deserialize, Serialize};

/// The index of the human player.
pub const HUMAN: usize = 0;

/// Why a player won the game.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum WinCondition {
    /// The player collected enough of the terminal die.
    TerminalDice,
    /// Every other player was eliminated.
    LastStanding,
}

impl ToString for WinCondition {
    fn to_string(&self) -> String {
        match self {
            WinCondition::TerminalDice => "TerminalDice",
            WinCondition::LastStanding => "LastStanding",
        }
        .to_string()
    }
}

/// The state of the game as judged after a choice has been applied.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(tag = "type")]
pub enum WinState {
    Continue,
    Winner { player: usize, condition: WinCondition },
    /// The human was eliminated without anyone else winning outright.
    NoWinner,
}

impl WinState {
    pub fn is_over(&self) -> bool {
        !matches!(self, WinState::Continue)
    }

    pub fn winner(&self) -> Option<usize> {
        match self {
            WinState::Winner { player, .. } => Some(*player),
            _ => None,
        }
    }
}

/// Checks the win conditions in order of precedence.
pub fn evaluate(players: &[Player], tiers: &TierTable, target: usize) -> WinState {
    // Eliminated players are checked too
    let terminal = tiers.terminal();
    if let Some(player) = players.iter().position(|p| p.count_of(terminal) >= target) {
        return WinState::Winner {
            player,
            condition: WinCondition::TerminalDice,
        };
    }

    let mut active = players.iter().enumerate().filter(|(_, p)| p.is_active());
    if let (Some((player, _)), None) = (active.next(), active.next()) {
        return WinState::Winner {
            player,
            condition: WinCondition::LastStanding,
        };
    }

    if players.get(HUMAN).map(|p| p.eliminated).unwrap_or(false) {
        return WinState::NoWinner;
    }

    WinState::Continue
}
