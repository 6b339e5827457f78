use super::choice::AppliedChoice;
use super::dice::{pick_index, DiceSource};
use super::player::Player;
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// What one player rolled this round.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Roll {
    pub player: usize,
    pub die: u32,
    pub rolls: Vec<u32>,
    pub score: u32,
}

/// What one losing player forfeited this round.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Loss {
    pub player: usize,
    /// The die sent to the pool, or `None` if the player was protected.
    pub lost: Option<u32>,
    /// Whether this loss eliminated the player.
    pub eliminated: bool,
}

/// The result of a resolved round.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct RoundOutcome {
    pub round: usize,
    pub winner: usize,
    /// Whether the winner was picked from several players sharing the top score.
    pub tie_break: bool,
    pub rolls: Vec<Roll>,
    /// One entry per losing player, in seating order.
    pub losses: Vec<Loss>,
    /// The shared pool after this round's losses.
    pub pool: Vec<u32>,
    /// The choice made automatically by a computer winner.
    pub auto_choice: Option<AppliedChoice>,
}

impl RoundOutcome {
    /// The losing players, in seating order.
    pub fn losers(&self) -> impl Iterator<Item = usize> + '_ {
        self.losses.iter().map(|l| l.player)
    }

    /// The players eliminated this round.
    pub fn eliminated(&self) -> impl Iterator<Item = usize> + '_ {
        self.losses.iter().filter(|l| l.eliminated).map(|l| l.player)
    }

    pub fn loss_of(&self, player: usize) -> Option<&Loss> {
        self.losses.iter().find(|l| l.player == player)
    }

    pub fn max_score(&self) -> u32 {
        self.rolls.iter().map(|r| r.score).max().unwrap_or(0)
    }
}

/// Checks that every active player holds a die, and returns the indices of the active players.
pub fn active_players(players: &[Player]) -> Result<Vec<usize>, GameError> {
    if players.iter().any(|p| p.is_active() && p.dice.is_empty()) {
        return Err(GameError::InvariantViolation("active player holds no dice"));
    }
    let active = players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_active())
        .map(|(i, _)| i)
        .collect::<Vec<_>>();
    if active.is_empty() {
        return Err(GameError::InvariantViolation("no active players"));
    }
    Ok(active)
}

/// Decides the winner of a rolled round and makes every other active player forfeit a die.
///
/// Every active player must already have rolled. Nothing is changed if the players are in an
/// inconsistent state.
pub fn resolve_round(
    round: usize,
    players: &mut [Player],
    pool: &mut Vec<u32>,
    lowest: u32,
    dice: &mut impl DiceSource,
) -> Result<RoundOutcome, GameError> {
    let active = active_players(players)?;

    let rolls = active
        .iter()
        .map(|&idx| {
            let player = &players[idx];
            Roll {
                player: idx,
                die: player.chosen_die,
                rolls: player.round_rolls.clone(),
                score: player.round_score,
            }
        })
        .collect::<Vec<_>>();

    // Pick the winner, breaking ties at random
    let max_score = rolls.iter().map(|r| r.score).max().unwrap_or(0);
    let leaders = rolls
        .iter()
        .filter(|r| r.score == max_score)
        .map(|r| r.player)
        .collect::<Vec<_>>();
    let winner = leaders[pick_index(dice, leaders.len())];

    // Everyone else forfeits a die
    let mut losses = vec![];
    for &idx in active.iter().filter(|idx| **idx != winner) {
        let player = &mut players[idx];
        let lost = player.lose_random_die(lowest, dice);
        if let Some(die) = lost {
            pool.push(die);
        }
        losses.push(Loss {
            player: idx,
            lost,
            eliminated: player.eliminated,
        });
    }

    Ok(RoundOutcome {
        round,
        winner,
        tie_break: leaders.len() > 1,
        rolls,
        losses,
        pool: pool.clone(),
        auto_choice: None,
    })
}
