//! Board geometry and the 8x8 grid

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pieces::{Piece, Player};

/// Board side length
pub const BOARD_SIZE: i8 = 8;

/// Diagonal direction vectors (drow, dcol)
/// Index: 0=up-left, 1=up-right, 2=down-left, 3=down-right
///
/// "Up" is toward row 0. The order is significant: generation walks
/// directions in this order, and the search keeps the first move on ties.
pub const DIRECTIONS: [(i8, i8); 4] = [
    (-1, -1), // UL
    (-1, 1),  // UR
    (1, -1),  // DL
    (1, 1),   // DR
];

/// A board coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if this square is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Dark squares are the only ones pieces may occupy
    pub fn is_playable(&self) -> bool {
        (self.row + self.col).rem_euclid(2) == 1
    }

    /// Square `distance` steps away along `direction`
    pub fn offset(&self, (dr, dc): (i8, i8), distance: i8) -> Square {
        Square::new(self.row + dr * distance, self.col + dc * distance)
    }

    /// Manhattan distance to the geometric centre (3.5, 3.5)
    pub fn distance_to_center(&self) -> f64 {
        (self.row as f64 - 3.5).abs() + (self.col as f64 - 3.5).abs()
    }

    fn index(&self) -> (usize, usize) {
        (self.row as usize, self.col as usize)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Iterate the 32 playable squares in row-major order
pub fn playable_squares() -> impl Iterator<Item = Square> {
    (0..BOARD_SIZE)
        .flat_map(|row| (0..BOARD_SIZE).map(move |col| Square::new(row, col)))
        .filter(Square::is_playable)
}

/// Fixed 8x8 grid of optional pieces.
///
/// `Board` is `Copy`: every move application produces a fresh value and the
/// caller's board is never touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Board with no pieces
    pub const fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    /// Standard setup: Black men on rows 0-2, White men on rows 5-7
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for sq in playable_squares() {
            match sq.row {
                0..=2 => board.set(sq, Some(Piece::man(Player::Black))),
                5..=7 => board.set(sq, Some(Piece::man(Player::White))),
                _ => {}
            }
        }
        board
    }

    /// Piece at square, `None` for empty or off-board squares
    pub fn get(&self, sq: Square) -> Option<Piece> {
        if !sq.is_valid() {
            return None;
        }
        let (r, c) = sq.index();
        self.cells[r][c]
    }

    /// Replace the contents of a square.
    ///
    /// Panics if `sq` is off the board, or if a piece is placed on a
    /// non-playable square.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        assert!(sq.is_valid(), "square {sq} is off the board");
        assert!(
            piece.is_none() || sq.is_playable(),
            "square {sq} is not playable"
        );
        let (r, c) = sq.index();
        self.cells[r][c] = piece;
    }

    /// Convenience for building positions
    pub fn with_piece(mut self, sq: Square, piece: Piece) -> Self {
        self.set(sq, Some(piece));
        self
    }

    /// Check that a square is on the board, playable and empty
    pub fn is_open(&self, sq: Square) -> bool {
        sq.is_valid() && sq.is_playable() && self.get(sq).is_none()
    }

    /// Iterate occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        playable_squares().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Number of pieces owned by `player`
    pub fn count(&self, player: Player) -> usize {
        self.pieces().filter(|(_, p)| p.owner == player).count()
    }

    /// Raw rows, used by the wire encoder
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Board {
    /// Text diagram: `b`/`w` men, `B`/`W` kings, `.` empty dark squares
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   0 1 2 3 4 5 6 7")?;
        for row in 0..BOARD_SIZE {
            write!(f, "{row} ")?;
            for col in 0..BOARD_SIZE {
                let sq = Square::new(row, col);
                let ch = match self.get(sq) {
                    Some(piece) => piece.symbol(),
                    None if sq.is_playable() => '.',
                    None => ' ',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
