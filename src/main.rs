use crate::config::Config;
use crate::console::Console;
use crate::game::Game;
use crate::session::Session;
use anyhow::Context;
use rand::RngCore;
use tokio::io::BufReader;

mod config;
mod console;
mod error;
mod game;
mod session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::try_init().ok();

    let config = Config::from_env().context("invalid configuration")?;
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().next_u64());
    log::info!("Dealing dice with seed {}", seed);
    let pacing = config.pacing();

    let game = Game::new(
        config.options,
        config.opponent_names.len(),
        &config.opponent_names,
        seed,
    )
    .context("could not create the game")?;
    let mut session = Session::new(game, pacing);

    // Mirror every board update to the trace log
    let mut updates = session.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            log::trace!("Board: {}", *updates.borrow_and_update());
        }
    });

    let mut console = Console::new(BufReader::new(tokio::io::stdin()));
    if console.run(&mut session).await?.is_none() {
        log::info!("Game abandoned in round {}", session.game().round());
    }

    Ok(())
}
