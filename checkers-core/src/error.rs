//! Errors raised when external board data is rejected

use thiserror::Error;

/// Malformed board input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid board size")]
    InvalidSize,

    #[error("Piece at ({row}, {col}) has no owner")]
    MissingOwner { row: usize, col: usize },

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Piece on non-playable square ({row}, {col})")]
    NonPlayableSquare { row: usize, col: usize },

    #[error("Square ({row}, {col}) is off the board")]
    OutOfBounds { row: i64, col: i64 },
}
