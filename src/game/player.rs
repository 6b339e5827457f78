use super::choice::Choice;
use super::dice::{pick_index, DiceSource};
use super::tier::TierTable;
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// A game player.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Player {
    pub name: String,
    pub is_human: bool,
    /// The dice held, largest first.
    pub dice: Vec<u32>,
    pub made_first_choice: bool,
    pub eliminated: bool,
    pub chosen_die: u32,
    pub round_rolls: Vec<u32>,
    pub round_score: u32,
}

impl Player {
    /// Creates a player holding a single starting die.
    pub fn new(name: String, is_human: bool, starting_die: u32) -> Self {
        Self {
            name,
            is_human,
            dice: vec![starting_die],
            made_first_choice: false,
            eliminated: false,
            chosen_die: starting_die,
            round_rolls: vec![],
            round_score: 0,
        }
    }

    /// A player is protected until they make their first choice.
    pub fn is_protected(&self) -> bool {
        !self.made_first_choice
    }

    pub fn is_active(&self) -> bool {
        !self.eliminated
    }

    /// The largest die held, if any.
    pub fn best_die(&self) -> Option<u32> {
        self.dice.first().copied()
    }

    /// The number of dice held of the given size.
    pub fn count_of(&self, sides: u32) -> usize {
        self.dice.iter().filter(|d| **d == sides).count()
    }

    /// Chooses the die to roll this round.
    pub fn select_die(&mut self, sides: u32) -> Result<(), GameError> {
        if !self.dice.contains(&sides) {
            return Err(GameError::InvalidDieSelection);
        }
        self.chosen_die = sides;
        Ok(())
    }

    /// Clears the per-round scratch state.
    pub fn reset_round(&mut self) {
        self.round_rolls.clear();
        self.round_score = 0;
    }

    /// Rolls the chosen die as many times as it has sides, and returns the total.
    pub fn roll_for_round(&mut self, dice: &mut impl DiceSource) -> Result<u32, GameError> {
        if self.eliminated {
            return Err(GameError::InvariantViolation("eliminated player cannot roll"));
        }
        if !self.dice.contains(&self.chosen_die) {
            return Err(GameError::InvariantViolation("chosen die is not held"));
        }
        let sides = self.chosen_die;
        self.round_rolls = (0..sides).map(|_| dice.roll(sides)).collect();
        self.round_score = self.round_rolls.iter().sum();
        Ok(self.round_score)
    }

    /// Forfeits a random die, returning it, or `None` if the player has nothing they can lose.
    ///
    /// Nobody loses a lone lowest-tier die, and a protected player cannot lose any die of the
    /// lowest tier. Losing the last die eliminates the player.
    pub fn lose_random_die(&mut self, lowest: u32, dice: &mut impl DiceSource) -> Option<u32> {
        if self.dice == [lowest] {
            return None;
        }
        let protected = self.is_protected();
        let eligible = self
            .dice
            .iter()
            .enumerate()
            .filter(|(_, d)| !(protected && **d == lowest))
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        if eligible.is_empty() {
            return None;
        }

        let idx = eligible[pick_index(dice, eligible.len())];
        let lost = self.dice.remove(idx);
        if self.dice.is_empty() {
            self.eliminated = true;
        }
        Some(lost)
    }

    /// Applies a round winner's choice to the chosen die, returning the die that was rolled.
    ///
    /// Upgrading the terminal die is rejected, leaving the player untouched.
    pub fn apply_choice(&mut self, choice: Choice, tiers: &TierTable) -> Result<u32, GameError> {
        let die = self.chosen_die;
        let Some(idx) = self.dice.iter().position(|d| *d == die) else {
            return Err(GameError::InvariantViolation("chosen die is not held"));
        };

        match choice {
            Choice::Duplicate => self.dice.push(die),
            Choice::Upgrade => {
                let Some(next) = tiers.successor(die) else {
                    return Err(GameError::InvalidChoicePhase);
                };
                self.dice[idx] = next;
            }
        }

        self.made_first_choice = true;
        self.dice.sort_unstable_by(|a, b| b.cmp(a));
        Ok(die)
    }
}
