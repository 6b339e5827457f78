use crate::error::GameError;
use crate::game::choice::{AppliedChoice, Choice};
use crate::game::dice::DiceSource;
use crate::game::round::RoundOutcome;
use crate::game::{Game, GamePhase};
use chrono::prelude::{DateTime, Utc};
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Value};
use std::time::{Duration, SystemTime};
use tokio::sync::watch;

/// Cosmetic delays inserted between the logical steps of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pacing {
    /// Pause before the dice are rolled.
    pub roll: Duration,
    /// Pause after a round result is revealed.
    pub reveal: Duration,
}

impl Pacing {
    /// No delays at all.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn uniform(delay: Duration) -> Self {
        Self {
            roll: delay,
            reveal: delay,
        }
    }
}

/// A single play-through, wrapping a [Game] with pacing and state notifications.
///
/// The game itself only changes inside synchronous engine calls. Delays happen between those
/// calls, so dropping a future part way through leaves the game at its last completed step.
pub struct Session<R = ChaCha8Rng> {
    /// The game itself.
    game: Game<R>,
    pacing: Pacing,
    /// Channel for sending game state updates to whatever is rendering the game.
    state: watch::Sender<Value>,
    /// Timestamp that the game was created.
    started_ts: SystemTime,
    /// Whether the final result has been logged.
    archived: bool,
}

impl<R> Session<R> {
    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    /// Returns a stream of board states, updated after every step of the game.
    pub fn subscribe(&self) -> watch::Receiver<Value> {
        self.state.subscribe()
    }
}

impl<R: DiceSource> Session<R> {
    pub fn new(game: Game<R>, pacing: Pacing) -> Self {
        let (state, _) = watch::channel(game.get_board_json());
        Self {
            game,
            pacing,
            state,
            started_ts: SystemTime::now(),
            archived: false,
        }
    }

    /// Starts the game.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.mutate_game(|game| game.start())?;
        log::info!(
            "Started a game with {} players, first to {} d{}",
            self.game.num_players(),
            self.game.options().target(),
            self.game.options().tiers.terminal()
        );
        Ok(())
    }

    /// Chooses the human's die for this round.
    pub fn select_die(&mut self, player: usize, sides: u32) -> Result<(), GameError> {
        self.mutate_game(|game| game.select_die(player, sides))
    }

    /// Rolls and resolves a round, pausing before the roll and after the reveal.
    pub async fn play_round(&mut self) -> Result<RoundOutcome, GameError> {
        if self.game.phase() != GamePhase::Rolling {
            return Err(GameError::InvalidAction);
        }
        pause(self.pacing.roll).await;
        let outcome = self.mutate_game(|game| game.execute_round())?;
        log::info!(
            "Round {}: {} wins with {}",
            outcome.round,
            self.game.players()[outcome.winner].name,
            outcome.max_score()
        );
        pause(self.pacing.reveal).await;
        Ok(outcome)
    }

    /// Applies the human's choice after winning a round.
    pub fn choose(&mut self, choice: Choice) -> Result<AppliedChoice, GameError> {
        self.mutate_game(|game| game.apply_winner_choice(choice))
    }

    /// Moves on to the next round.
    pub fn next_round(&mut self) -> Result<(), GameError> {
        self.mutate_game(|game| game.next_round())
    }

    /// Performs an action on the game.
    pub fn mutate_game<F, T>(&mut self, mutation: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut Game<R>) -> Result<T, GameError>,
    {
        match mutation(&mut self.game) {
            Ok(value) => {
                self.notify();
                self.archive();
                Ok(value)
            }
            Err(err) => {
                log::warn!("Rejected action: {}", err);
                Err(err)
            }
        }
    }

    /// A record of the finished game, or `None` while it is still in progress.
    pub fn summary_json(&self) -> Option<Value> {
        if !self.game.game_over() {
            return None;
        }
        Some(json!({
            "players": self.game.players().iter().map(|p| p.name.clone()).collect::<Value>(),
            "started": iso8601(self.started_ts),
            "finished": iso8601(SystemTime::now()),
            "outcome": self.game.get_outcome_json()
        }))
    }

    /// Notifies the subscriber of the new game state.
    fn notify(&mut self) {
        self.state.send_replace(self.game.get_board_json());
    }

    /// Logs the result once the game is over.
    fn archive(&mut self) {
        if self.archived {
            return;
        }
        if let Some(summary) = self.summary_json() {
            log::info!("Game finished: {}", summary);
            self.archived = true;
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

fn iso8601(st: SystemTime) -> String {
    let dt: DateTime<Utc> = st.into();
    dt.format("%+").to_string()
}
