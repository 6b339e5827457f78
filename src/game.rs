use self::choice::{opponent_choice, AppliedChoice, Choice};
use self::dice::DiceSource;
pub use self::options::{Difficulty, GameOptions};
use self::outcome::{WinState, HUMAN};
use self::player::Player;
use self::round::{active_players, resolve_round, RoundOutcome};
use crate::error::GameError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub mod choice;
pub mod dice;
mod json;
pub mod options;
pub mod outcome;
pub mod player;
pub mod round;
pub mod tier;

pub const MAX_OPPONENTS: usize = 7;

/// A game of dice, from the first roll until someone wins.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Game<R = ChaCha8Rng> {
    opts: GameOptions,
    players: Vec<Player>,
    /// Dice forfeited by losing players.
    pool: Vec<u32>,
    round: usize,
    state: GamePhase,
    last_round: Option<RoundOutcome>,
    rng: R,
}

/// Represents the current phase in the game loop.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(tag = "type")]
pub enum GamePhase {
    /// The game has been created but not started.
    Setup,
    /// The human must pick which of their dice to roll.
    SelectDie,
    /// Every active player has a die chosen and the round can be rolled.
    Rolling,
    /// The dice have been rolled and losses are being applied.
    Resolving,
    /// The human won the round and must duplicate or upgrade their die.
    Choice { winner: usize },
    /// The round is complete and the next one can begin.
    Continue,
    Over { result: WinState },
}

impl Game<ChaCha8Rng> {
    /// Creates a new game against `opponent_count` computer players, seeded for reproducibility.
    pub fn new(
        opts: GameOptions,
        opponent_count: usize,
        opponent_names: &[String],
        seed: u64,
    ) -> Result<Self, GameError> {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Self::with_dice(opts, opponent_count, opponent_names, rng)
    }
}

impl<R> Game<R> {
    pub fn options(&self) -> &GameOptions {
        &self.opts
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn human(&self) -> &Player {
        &self.players[HUMAN]
    }

    pub fn pool(&self) -> &[u32] {
        &self.pool
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn phase(&self) -> GamePhase {
        self.state
    }

    /// The most recently resolved round, if any.
    pub fn last_round(&self) -> Option<&RoundOutcome> {
        self.last_round.as_ref()
    }

    /// Gets the number of players in the game.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Gets the number of players in the game that are still in play.
    pub fn num_players_active(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Checks the win conditions against the current players.
    ///
    /// This has no side effects, so calling it repeatedly gives the same answer.
    pub fn evaluate_win(&self) -> WinState {
        outcome::evaluate(&self.players, &self.opts.tiers, self.opts.target())
    }

    /// Returns true if the game is over.
    pub fn game_over(&self) -> bool {
        matches!(self.state, GamePhase::Over { .. })
    }

    /// Returns the final result, if the game is over.
    pub fn outcome(&self) -> Option<WinState> {
        match self.state {
            GamePhase::Over { result } => Some(result),
            _ => None,
        }
    }

    /// The choices the human may make, if a choice is pending.
    pub fn available_choices(&self) -> Vec<Choice> {
        match self.state {
            GamePhase::Choice { winner } => {
                choice::available_choices(&self.opts.tiers, self.players[winner].chosen_die)
            }
            _ => vec![],
        }
    }
}

impl<R: DiceSource> Game<R> {
    /// Creates a new game which draws all its randomness from `rng`.
    pub fn with_dice(
        opts: GameOptions,
        opponent_count: usize,
        opponent_names: &[String],
        rng: R,
    ) -> Result<Self, GameError> {
        if opponent_count == 0 {
            return Err(GameError::TooFewPlayers);
        }
        if opponent_count > MAX_OPPONENTS {
            return Err(GameError::TooManyPlayers);
        }
        if opponent_names.len() != opponent_count {
            return Err(GameError::InvalidGameOptions);
        }

        let names = std::iter::once(&opts.human_name).chain(opponent_names);
        let mut players: Vec<Player> = vec![];
        for (idx, name) in names.enumerate() {
            if players.iter().any(|p| &p.name == name) {
                return Err(GameError::DuplicatePlayerName);
            }
            players.push(Player::new(name.clone(), idx == HUMAN, opts.tiers.lowest()));
        }

        Ok(Game {
            opts,
            players,
            pool: vec![],
            round: 0,
            state: GamePhase::Setup,
            last_round: None,
            rng,
        })
    }

    /// Starts the first round.
    pub fn start(&mut self) -> Result<(), GameError> {
        let GamePhase::Setup = self.state else {
            return Err(GameError::InvalidAction);
        };
        self.start_round();
        Ok(())
    }

    /// Called when the human chooses which die to roll.
    pub fn select_die(&mut self, player: usize, sides: u32) -> Result<(), GameError> {
        self.check_player_index(player)?;
        if !matches!(self.state, GamePhase::SelectDie | GamePhase::Rolling) {
            return Err(GameError::InvalidAction);
        }
        let player = &mut self.players[player];
        if !player.is_human || !player.is_active() {
            return Err(GameError::InvalidAction);
        }
        player.select_die(sides)?;
        self.state = GamePhase::Rolling;
        Ok(())
    }

    /// Rolls every active player's chosen die and resolves the round.
    ///
    /// A computer winner makes their choice immediately; a human winner is left to call
    /// [Game::apply_winner_choice].
    pub fn execute_round(&mut self) -> Result<RoundOutcome, GameError> {
        let GamePhase::Rolling = self.state else {
            return Err(GameError::InvalidAction);
        };

        let active = active_players(&self.players)?;
        if active
            .iter()
            .any(|idx| !self.players[*idx].dice.contains(&self.players[*idx].chosen_die))
        {
            return Err(GameError::InvariantViolation("chosen die is not held"));
        }

        for idx in active {
            self.players[idx].roll_for_round(&mut self.rng)?;
        }

        self.state = GamePhase::Resolving;
        let lowest = self.opts.tiers.lowest();
        let mut outcome = resolve_round(
            self.round,
            &mut self.players,
            &mut self.pool,
            lowest,
            &mut self.rng,
        )?;

        let winner = outcome.winner;
        log::debug!(
            "Round {} won by {} with {}",
            self.round,
            self.players[winner].name,
            outcome.max_score()
        );
        for idx in outcome.eliminated() {
            log::debug!("{} was eliminated in round {}", self.players[idx].name, self.round);
        }

        if self.players[winner].is_human {
            self.state = GamePhase::Choice { winner };
        } else {
            let choice = opponent_choice(&self.opts.tiers, self.players[winner].chosen_die);
            outcome.auto_choice = Some(self.apply_choice(winner, choice)?);
            self.check_game_over();
        }

        self.last_round = Some(outcome.clone());
        Ok(outcome)
    }

    /// Called when the human, having won the round, duplicates or upgrades their die.
    pub fn apply_winner_choice(&mut self, choice: Choice) -> Result<AppliedChoice, GameError> {
        let GamePhase::Choice { winner } = self.state else {
            return Err(GameError::InvalidChoicePhase);
        };
        if !self.players[winner].is_human {
            return Err(GameError::InvalidChoicePhase);
        }
        let applied = self.apply_choice(winner, choice)?;
        self.check_game_over();
        Ok(applied)
    }

    /// Called once the players have seen the round result, to begin the next round.
    pub fn next_round(&mut self) -> Result<(), GameError> {
        let GamePhase::Continue = self.state else {
            return Err(GameError::InvalidAction);
        };
        self.start_round();
        Ok(())
    }

    fn start_round(&mut self) {
        self.round += 1;

        for player in self.players.iter_mut().filter(|p| p.is_active()) {
            player.reset_round();
            let keep = player.is_human && player.dice.contains(&player.chosen_die);
            if !keep {
                if let Some(best) = player.best_die() {
                    player.chosen_die = best;
                }
            }
        }

        let human = &self.players[HUMAN];
        self.state = if human.is_active() && human.dice.len() > 1 {
            GamePhase::SelectDie
        } else {
            GamePhase::Rolling
        };
    }

    fn apply_choice(&mut self, player: usize, choice: Choice) -> Result<AppliedChoice, GameError> {
        let die = self.players[player].apply_choice(choice, &self.opts.tiers)?;
        let result = match choice {
            Choice::Duplicate => die,
            Choice::Upgrade => self.opts.tiers.successor(die).unwrap_or(die),
        };
        log::debug!("{} chose {} on a d{}", self.players[player].name, choice.to_string(), die);
        Ok(AppliedChoice {
            player,
            choice,
            die,
            result,
        })
    }

    fn check_game_over(&mut self) -> bool {
        let result = self.evaluate_win();
        if result.is_over() {
            log::info!("Game over after round {}: {:?}", self.round, result);
            self.state = GamePhase::Over { result };
            true
        } else {
            self.state = GamePhase::Continue;
            false
        }
    }

    /// Returns `Ok` if the given player index is valid, and an `Err` otherwise.
    fn check_player_index(&self, player: usize) -> Result<(), GameError> {
        if player < self.num_players() {
            Ok(())
        } else {
            Err(GameError::InvalidPlayerIndex)
        }
    }
}
