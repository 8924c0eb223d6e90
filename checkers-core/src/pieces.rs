//! Players, pieces and their movement directions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::DIRECTIONS;
use crate::error::BoardError;

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Row on which this player's men are crowned
    pub fn promotion_row(self) -> i8 {
        match self {
            Player::White => 0,
            Player::Black => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Player::White => "white",
            Player::Black => "black",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Player {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Player::White),
            "black" => Ok(Player::Black),
            other => Err(BoardError::UnknownPlayer(other.to_string())),
        }
    }
}

/// Men move toward the opponent's back row
const WHITE_MAN_DIRS: &[(i8, i8)] = &[DIRECTIONS[0], DIRECTIONS[1]];
const BLACK_MAN_DIRS: &[(i8, i8)] = &[DIRECTIONS[2], DIRECTIONS[3]];

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Player,
    pub is_king: bool,
}

impl Piece {
    pub const fn man(owner: Player) -> Self {
        Self {
            owner,
            is_king: false,
        }
    }

    pub const fn king(owner: Player) -> Self {
        Self {
            owner,
            is_king: true,
        }
    }

    /// Directions this piece may step or capture in
    pub fn directions(&self) -> &'static [(i8, i8)] {
        if self.is_king {
            &DIRECTIONS
        } else {
            match self.owner {
                Player::White => WHITE_MAN_DIRS,
                Player::Black => BLACK_MAN_DIRS,
            }
        }
    }

    /// The piece after crowning, if landing on `row` crowns it
    pub fn promoted_on(self, row: i8) -> Option<Piece> {
        (!self.is_king && row == self.owner.promotion_row()).then(|| Piece::king(self.owner))
    }

    pub fn symbol(&self) -> char {
        match (self.owner, self.is_king) {
            (Player::White, false) => 'w',
            (Player::White, true) => 'W',
            (Player::Black, false) => 'b',
            (Player::Black, true) => 'B',
        }
    }
}
