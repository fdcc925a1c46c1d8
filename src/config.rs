use clap::Parser;

use super::board::{max_mines, MAX_SIDE, MIN_SIDE};
use super::error::ConfigError;

/// Terminal minesweeper addressed with hexadecimal coordinates.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Field side length (9-15). Asked interactively when omitted.
    #[arg(long)]
    pub size: Option<usize>,

    /// Number of mines. Asked interactively when omitted.
    #[arg(long)]
    pub mines: Option<usize>,

    /// Seed for mine placement. Defaults to the current UNIX time.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter used when RUST_LOG is not set. Logs go to stderr.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Do not clear the screen between moves.
    #[arg(long)]
    pub no_clear: bool,
}

/// Validated field side and mine count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    side: usize,
    mines: usize
}

impl GameConfig {
    pub fn new(side: usize, mines: usize) -> Result<GameConfig, ConfigError> {
        let side = validate_side(side)?;
        let max = max_mines(side);
        if mines < 1 || mines > max {
            return Err(ConfigError::MineCount{mines, max})
        }
        Ok(GameConfig{side, mines})
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn mines(&self) -> usize {
        self.mines
    }
}

pub fn validate_side(side: usize) -> Result<usize, ConfigError> {
    if (MIN_SIDE..=MAX_SIDE).contains(&side) {
        Ok(side)
    } else {
        Err(ConfigError::FieldSize{size: side, min: MIN_SIDE, max: MAX_SIDE})
    }
}
