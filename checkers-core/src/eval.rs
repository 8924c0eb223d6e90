//! Position evaluation

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::game::mobility;
use crate::pieces::{Piece, Player};

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Heuristics {
    /// Base value of a man
    pub man_value: f64,
    /// Base value of a king
    pub king_value: f64,
    /// Weight for king centrality
    pub center_weight: f64,
    /// Weight for how far a man has advanced toward its crowning row
    pub advance_weight: f64,
    /// Weight for mobility (legal move count)
    pub mobility_weight: f64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            man_value: 10.0,
            king_value: 30.0,
            center_weight: 0.5,
            advance_weight: 0.5,
            mobility_weight: 0.1,
        }
    }
}

impl Heuristics {
    /// Material plus positional value of a single piece on `row`, `col`
    fn piece_value(&self, piece: Piece, row: i8, distance_to_center: f64) -> f64 {
        if piece.is_king {
            return self.king_value + (7.0 - distance_to_center) * self.center_weight;
        }

        let advanced = match piece.owner {
            Player::White => 7 - row,
            Player::Black => row,
        };
        self.man_value + advanced as f64 * self.advance_weight
    }
}

/// Evaluate `board` from `player`'s point of view (positive favours `player`)
pub fn evaluate(board: &Board, player: Player, heuristics: &Heuristics) -> f64 {
    let opponent = player.opponent();
    let mut score = 0.0;

    for (sq, piece) in board.pieces() {
        let value = heuristics.piece_value(piece, sq.row, sq.distance_to_center());
        if piece.owner == player {
            score += value;
        } else {
            score -= value;
        }
    }

    let my_mobility = mobility(board, player) as f64;
    let opp_mobility = mobility(board, opponent) as f64;
    score += (my_mobility - opp_mobility) * heuristics.mobility_weight;

    score
}
