use crate::args::Args;
use crate::error::AppError;
use crate::tally::Tally;
use crate::terminal::Terminal;
use clap::Parser;
use common::{play_round, DeckRng, GameState};
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod args;
mod error;
mod narrate;
mod tally;
mod terminal;

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let _guard = init_logging(&args.log_dir)?;

    let rules = args.rules()?;
    let rng = match args.seed {
        Some(seed) => DeckRng::seeded(seed),
        None => DeckRng::default(),
    };
    info!(?rules, seed = ?args.seed, "starting session");

    let mut game = GameState::new(rules, rng);
    let mut terminal = Terminal;
    let mut tally = Tally::default();
    loop {
        let outcome = play_round(&mut game, &mut terminal, |event| {
            info!(?event, "round event");
            println!("{}", narrate::describe(event));
        })?;
        tally.record(outcome);
        if !terminal.play_again()? {
            break;
        }
    }

    info!(%tally, "session over");
    println!("{}", tally);
    Ok(())
}

// Daily rolling JSON log file, kept off the terminal
fn init_logging(log_dir: &Path) -> Result<WorkerGuard, AppError> {
    let file_appender = tracing_appender::rolling::daily(log_dir, "blackjack.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(guard)
}
