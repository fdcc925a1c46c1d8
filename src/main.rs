use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hexsweeper::board::max_mines;
use hexsweeper::config::{validate_side, Args, GameConfig};
use hexsweeper::game::GameSession;
use hexsweeper::interaction;

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    writeln!(output, "Welcome to Minesweeper!")?;
    let side = match args.size {
        Some(side) => validate_side(side)?,
        None => interaction::prompt_field_size(&mut input, &mut output)?
    };
    let mines = match args.mines {
        Some(mines) => mines,
        None => interaction::prompt_mine_count(&mut input, &mut output, max_mines(side))?
    };
    let config = GameConfig::new(side, mines)?;

    let seed = args.seed.unwrap_or_else(time_seed);
    info!(side, mines, seed, "starting game");

    let mut session = GameSession::new(&config, StdRng::seed_from_u64(seed));
    let phase = hexsweeper::game_loop(&mut session, &mut input, &mut output, !args.no_clear)
        .context("terminal I/O failed")?;
    info!(?phase, "game over");
    Ok(())
}
