use thiserror::Error;

/// A player action the current cell or game state does not allow. The message
/// is what the player gets to see; nothing changes when one is returned.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("This cell is already revealed, please choose another cell")]
    AlreadyRevealed,
    #[error("This cell is flagged, please choose another cell. Give the flag toggle command ('!' prefix) to remove the flag")]
    CellFlagged,
    #[error("You are out of flags, remove the flag from another cell")]
    OutOfFlags,
    #[error("The game is over, no new moves are accepted")]
    GameOver,
}

pub type Result<T> = std::result::Result<T, ActionError>;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid field size {size}, it must be between {min} and {max}")]
    FieldSize { size: usize, min: usize, max: usize },
    #[error("Invalid number of mines {mines}, it must be between 1 and {max}")]
    MineCount { mines: usize, max: usize },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter two hexadecimal digits (from 1-9 or A-F range), with an optional '!' prefix")]
    Malformed,
    #[error("Invalid cell range. Both coordinates must be between 1 and {side:X}")]
    OutOfRange { side: usize },
}
