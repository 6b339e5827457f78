use thiserror::Error;

/// The result of attempting to perform an invalid operation on a [Game](crate::game::Game).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid combination of game options")]
    InvalidGameOptions,
    #[error("too few players in the game")]
    TooFewPlayers,
    #[error("too many players in the game")]
    TooManyPlayers,
    #[error("two players share the same name")]
    DuplicatePlayerName,
    #[error("invalid player index")]
    InvalidPlayerIndex,
    #[error("this action cannot be performed during this phase of the game")]
    InvalidAction,
    #[error("the chosen die is not held by this player")]
    InvalidDieSelection,
    #[error("no choice is pending, or the choice is not allowed for this die")]
    InvalidChoicePhase,
    #[error("game state is inconsistent: {0}")]
    InvariantViolation(&'static str),
}
