use crate::error::GameError;
use crate::game::choice::Choice;
use crate::game::dice::DiceSource;
use crate::game::outcome::{WinState, HUMAN};
use crate::game::round::{Loss, RoundOutcome};
use crate::game::{Game, GamePhase};
use crate::session::Session;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// An action performed by the human player.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum PlayerAction {
    SelectDie { sides: u32 },
    Roll,
    Choose { choice: Choice },
    Continue,
    Quit,
}

impl PlayerAction {
    /// Parses a line of input, either as a JSON action or as a short command such as
    /// `d8`, `roll`, `up`, `dup`, `next` or `quit`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.starts_with('{') {
            return serde_json::from_str(line).ok();
        }
        let word = line.to_ascii_lowercase();
        let action = match word.as_str() {
            "r" | "roll" => PlayerAction::Roll,
            "u" | "up" | "upgrade" => PlayerAction::Choose { choice: Choice::Upgrade },
            "d" | "dup" | "duplicate" => PlayerAction::Choose { choice: Choice::Duplicate },
            "" | "n" | "next" | "continue" => PlayerAction::Continue,
            "q" | "quit" | "exit" => PlayerAction::Quit,
            other => {
                let sides = other.strip_prefix('d').unwrap_or(other).parse().ok()?;
                PlayerAction::SelectDie { sides }
            }
        };
        Some(action)
    }
}

/// A terminal front end which reads actions from `input` and prints the game as it unfolds.
pub struct Console<I> {
    input: I,
}

impl<I: AsyncBufRead + Unpin> Console<I> {
    pub fn new(input: I) -> Self {
        Self { input }
    }

    /// Plays until the game is over or the player quits, returning the final result.
    pub async fn run<R: DiceSource>(
        &mut self,
        session: &mut Session<R>,
    ) -> anyhow::Result<Option<WinState>> {
        if session.game().phase() == GamePhase::Setup {
            session.start()?;
        }

        loop {
            let game = session.game();
            if let Some(result) = game.outcome() {
                print_result(game, result);
                return Ok(Some(result));
            }

            let human = game.human();
            match game.phase() {
                GamePhase::Rolling if human.dice.len() == 1 => {
                    println!("\n-- Round {} --", game.round());
                    play_round(session).await?;
                    continue;
                }
                GamePhase::SelectDie => {
                    println!("\n-- Round {} --", game.round());
                    println!(
                        "Your dice: {}. Pick one to roll (e.g. d{}).",
                        dice_list(&human.dice),
                        human.dice[0]
                    );
                }
                GamePhase::Rolling => {
                    println!("Rolling your d{}. Press enter or type 'roll'.", human.chosen_die)
                }
                GamePhase::Choice { .. } => {
                    let die = human.chosen_die;
                    if game.available_choices().contains(&Choice::Upgrade) {
                        println!("You won! 'up' to upgrade your d{die}, or 'dup' to duplicate it.");
                    } else {
                        println!("You won! Your d{die} is already the best die.");
                        println!("Type 'dup' to duplicate it.");
                    }
                }
                GamePhase::Continue => println!("Press enter for the next round."),
                GamePhase::Setup | GamePhase::Resolving | GamePhase::Over { .. } => {}
            }

            let mut line = String::new();
            if self.input.read_line(&mut line).await? == 0 {
                return Ok(None);
            }
            let Some(action) = PlayerAction::parse(&line) else {
                println!("Unrecognised command: {}", line.trim());
                continue;
            };
            let result = match (session.game().phase(), action) {
                (_, PlayerAction::Quit) => return Ok(None),
                (GamePhase::SelectDie | GamePhase::Rolling, PlayerAction::SelectDie { sides }) => {
                    if session.game().options().tiers.contains(sides) {
                        session.select_die(HUMAN, sides)
                    } else {
                        println!("There is no d{sides} in this game.");
                        Ok(())
                    }
                }
                (GamePhase::Rolling, PlayerAction::Roll | PlayerAction::Continue) => {
                    play_round(session).await
                }
                (GamePhase::Choice { .. }, PlayerAction::Choose { choice }) => {
                    session.choose(choice).map(|applied| {
                        let dice = dice_list(&session.game().human().dice);
                        println!("Your d{} became {}.", applied.die, dice);
                    })
                }
                (GamePhase::Continue, PlayerAction::Continue) => session.next_round(),
                _ => {
                    println!("That can't be done right now.");
                    Ok(())
                }
            };
            if let Err(err) = result {
                println!("{}", err);
            }
        }
    }
}

/// Plays the round, then prints it from the game's record of the last round.
async fn play_round<R: DiceSource>(session: &mut Session<R>) -> Result<(), GameError> {
    session.play_round().await?;
    let game = session.game();
    if let Some(outcome) = game.last_round() {
        print_round(game, outcome);
    }
    Ok(())
}

fn dice_list(dice: &[u32]) -> String {
    if dice.is_empty() {
        return "no dice".to_string();
    }
    dice.iter().map(|d| format!("d{d}")).collect::<Vec<_>>().join(", ")
}

fn print_round<R>(game: &Game<R>, outcome: &RoundOutcome) {
    let players = game.players();
    for roll in &outcome.rolls {
        let name = &players[roll.player].name;
        println!("{:>12} rolled d{:<3} -> {:>4}", name, roll.die, roll.score);
    }
    let tie = if outcome.tie_break { " (after a tie-break)" } else { "" };
    println!("{} wins the round{}.", players[outcome.winner].name, tie);
    for idx in outcome.losers() {
        let name = &players[idx].name;
        match outcome.loss_of(idx) {
            Some(Loss { lost: Some(die), eliminated: true, .. }) => {
                println!("{name} lost their d{die} and is out!")
            }
            Some(Loss { lost: Some(die), .. }) => println!("{name} lost a d{die}."),
            _ => println!("{name} keeps their dice."),
        }
    }
    if let Some(choice) = outcome.auto_choice {
        println!(
            "{} chose to {} their d{}.",
            players[choice.player].name,
            choice.choice.to_string().to_lowercase(),
            choice.die
        );
    }
    println!(
        "{} players left, {} dice in the pool.",
        game.num_players_active(),
        game.pool().len()
    );
}

fn print_result<R>(game: &Game<R>, result: WinState) {
    match result.winner() {
        Some(HUMAN) => println!("\nYou win after {} rounds!", game.round()),
        Some(player) => {
            println!("\n{} wins after {} rounds.", game.players()[player].name, game.round())
        }
        None => println!("\nYou are out of dice. Game over."),
    }
}
