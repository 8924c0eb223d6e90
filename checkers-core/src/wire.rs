//! JSON wire format shared by the HTTP API and the CLI
//!
//! A board travels as an 8x8 array whose cells are `null` or
//! `{"player": "white"|"black", "isKing": bool}`. Squares are
//! `{"row": r, "col": c}` and a move's captures are `[[r, c], ...]`.
//! All validation of external boards happens here, before anything reaches
//! the engine.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Square, BOARD_SIZE};
use crate::error::BoardError;
use crate::game::Move;
use crate::pieces::{Piece, Player};

/// A cell's piece as sent by clients
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePiece {
    #[serde(default)]
    pub player: Option<String>,
    #[serde(rename = "isKing", default)]
    pub is_king: bool,
}

/// Rows of optional pieces
pub type WireBoard = Vec<Vec<Option<WirePiece>>>;

/// `{"row": r, "col": c}`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSquare {
    pub row: i64,
    pub col: i64,
}

impl WireSquare {
    pub fn to_square(self) -> Result<Square, BoardError> {
        let in_range = |v: i64| (0..BOARD_SIZE as i64).contains(&v);
        if !in_range(self.row) || !in_range(self.col) {
            return Err(BoardError::OutOfBounds {
                row: self.row,
                col: self.col,
            });
        }
        Ok(Square::new(self.row as i8, self.col as i8))
    }
}

impl From<Square> for WireSquare {
    fn from(sq: Square) -> Self {
        Self {
            row: sq.row as i64,
            col: sq.col as i64,
        }
    }
}

/// A move as returned to clients
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMove {
    pub from: WireSquare,
    pub to: WireSquare,
    pub jumps: Vec<[i64; 2]>,
}

impl From<&Move> for WireMove {
    fn from(mv: &Move) -> Self {
        Self {
            from: mv.from.into(),
            to: mv.to.into(),
            jumps: jumps_to_wire(&mv.captures),
        }
    }
}

/// Captured squares as `[row, col]` pairs
pub fn jumps_to_wire(captures: &[Square]) -> Vec<[i64; 2]> {
    captures
        .iter()
        .map(|sq| [sq.row as i64, sq.col as i64])
        .collect()
}

/// Encode a board for the wire
pub fn board_to_wire(board: &Board) -> WireBoard {
    board
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    cell.map(|piece| WirePiece {
                        player: Some(piece.owner.as_str().to_string()),
                        is_king: piece.is_king,
                    })
                })
                .collect()
        })
        .collect()
}

/// Decode and validate a board received from a client
pub fn board_from_wire(wire: &[Vec<Option<WirePiece>>]) -> Result<Board, BoardError> {
    if wire.len() != BOARD_SIZE as usize || wire.iter().any(|row| row.len() != BOARD_SIZE as usize) {
        return Err(BoardError::InvalidSize);
    }

    let mut board = Board::empty();
    for (row, cells) in wire.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let Some(wire_piece) = cell else {
                continue;
            };

            let owner: Player = wire_piece
                .player
                .as_deref()
                .ok_or(BoardError::MissingOwner { row, col })?
                .parse()?;

            let sq = Square::new(row as i8, col as i8);
            if !sq.is_playable() {
                return Err(BoardError::NonPlayableSquare { row, col });
            }

            let piece = if wire_piece.is_king {
                Piece::king(owner)
            } else {
                Piece::man(owner)
            };
            board.set(sq, Some(piece));
        }
    }

    Ok(board)
}

/// A position stored on disk, optionally with the side to move
#[derive(Clone, Debug)]
pub struct Position {
    pub board: Board,
    pub current_player: Option<Player>,
}

impl Position {
    /// Parse either a bare wire board or `{"board": ..., "current_player": ...}`
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        #[derive(Deserialize)]
        struct Wrapped {
            board: WireBoard,
            current_player: Option<Player>,
        }

        if let Ok(wire) = serde_json::from_str::<WireBoard>(content) {
            return Ok(Self {
                board: board_from_wire(&wire)?,
                current_player: None,
            });
        }

        let wrapped: Wrapped =
            serde_json::from_str(content).context("Not a board array or board request object")?;
        Ok(Self {
            board: board_from_wire(&wrapped.board)?,
            current_player: wrapped.current_player,
        })
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Invalid position in {}", path.display()))
    }
}
