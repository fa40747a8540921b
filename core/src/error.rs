use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board size {width}x{height}, both sides must be at least 1")]
    InvalidDimensions { width: Coord, height: Coord },
    #[error("Too many mines, requested {requested} but the board only fits {capacity}")]
    TooManyMines {
        requested: CellCount,
        capacity: CellCount,
    },
    #[error("Coordinates ({row}, {col}) are outside the board")]
    OutOfBounds { row: Coord, col: Coord },
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

impl GameError {
    /// Whether this error prevented a board from being built at all.
    pub const fn is_construction(&self) -> bool {
        matches!(self, Self::InvalidDimensions { .. } | Self::TooManyMines { .. })
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
