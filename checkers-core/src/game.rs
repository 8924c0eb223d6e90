//! Move generation, move application and game-over detection

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::pieces::Player;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
}

impl GameResult {
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::White => GameResult::WhiteWins,
            Player::Black => GameResult::BlackWins,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameResult::Ongoing
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::Ongoing => None,
            GameResult::WhiteWins => Some(Player::White),
            GameResult::BlackWins => Some(Player::Black),
        }
    }
}

/// A legal move.
///
/// `captures` is empty for a step and holds one square per hop, in chain
/// order, for a jump.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub captures: Vec<Square>,
}

impl Move {
    pub fn step(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captures: Vec::new(),
        }
    }

    pub fn is_jump(&self) -> bool {
        !self.captures.is_empty()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_jump() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)?;
        if self.is_jump() {
            let hops: Vec<String> = self.captures.iter().map(|sq| sq.to_string()).collect();
            write!(f, " [{}]", hops.join(" "))?;
        }
        Ok(())
    }
}

// ============================================================================
// MOVE GENERATION
// ============================================================================

/// All legal moves for `player`.
///
/// Captures are mandatory: if any piece can jump, only jumps are returned.
/// Squares are scanned row-major and directions in `DIRECTIONS` order.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let jumps: Vec<Move> = board
        .pieces()
        .filter(|(_, piece)| piece.owner == player)
        .flat_map(|(sq, _)| jump_moves(board, sq, &[]))
        .collect();

    if !jumps.is_empty() {
        return jumps;
    }

    board
        .pieces()
        .filter(|(_, piece)| piece.owner == player)
        .flat_map(|(sq, _)| step_moves(board, sq))
        .collect()
}

/// Number of legal moves for `player`
pub fn mobility(board: &Board, player: Player) -> usize {
    legal_moves(board, player).len()
}

/// One-square diagonal steps onto empty dark squares
fn step_moves(board: &Board, from: Square) -> Vec<Move> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };

    piece
        .directions()
        .iter()
        .map(|&dir| from.offset(dir, 1))
        .filter(|&to| board.is_open(to))
        .map(|to| Move::step(from, to))
        .collect()
}

/// Maximal capture chains starting at `from`.
///
/// `captured` holds the hops already taken earlier in this chain. Each
/// capture is played out on a scratch board (including a crowning on the
/// landing row) before looking for the next one, so a man that is crowned
/// mid-chain continues as a king.
fn jump_moves(board: &Board, from: Square, captured: &[Square]) -> Vec<Move> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };

    let mut jumps = Vec::new();

    for &dir in piece.directions() {
        let hop = from.offset(dir, 1);
        let landing = from.offset(dir, 2);

        let hop_is_enemy = matches!(board.get(hop), Some(victim) if victim.owner != piece.owner);
        if !hop_is_enemy || captured.contains(&hop) || !board.is_open(landing) {
            continue;
        }

        let mut scratch = *board;
        scratch.set(from, None);
        scratch.set(hop, None);
        scratch.set(landing, Some(piece.promoted_on(landing.row).unwrap_or(piece)));

        let mut chain = captured.to_vec();
        chain.push(hop);

        let continuations = jump_moves(&scratch, landing, &chain);
        if continuations.is_empty() {
            jumps.push(Move {
                from,
                to: landing,
                captures: vec![hop],
            });
            continue;
        }

        for cont in continuations {
            let mut captures = Vec::with_capacity(cont.captures.len() + 1);
            captures.push(hop);
            captures.extend(cont.captures);
            jumps.push(Move {
                from,
                to: cont.to,
                captures,
            });
        }
    }

    jumps
}

// ============================================================================
// MOVE APPLICATION
// ============================================================================

/// Play `mv` on a copy of `board`.
///
/// Returns the new board and whether the moving man was crowned.
///
/// Panics if `mv.from` is empty; the generator never produces such a move.
pub fn apply_move(board: &Board, mv: &Move) -> (Board, bool) {
    let Some(piece) = board.get(mv.from) else {
        panic!("apply_move: no piece at {}", mv.from);
    };

    let mut next = *board;
    next.set(mv.from, None);
    for &sq in &mv.captures {
        next.set(sq, None);
    }

    let promoted = piece.promoted_on(mv.to.row);
    next.set(mv.to, Some(promoted.unwrap_or(piece)));

    (next, promoted.is_some())
}

// ============================================================================
// GAME OVER
// ============================================================================

/// Decide whether the game is over with `side_to_move` on move.
///
/// Checked in order: side has no pieces, opponent has no pieces, side has
/// no moves, opponent has no moves. Running out of moves loses; there is
/// no draw rule.
pub fn check_game_over(board: &Board, side_to_move: Player) -> GameResult {
    let opponent = side_to_move.opponent();

    if board.count(side_to_move) == 0 {
        return GameResult::won_by(opponent);
    }
    if board.count(opponent) == 0 {
        return GameResult::won_by(side_to_move);
    }
    if legal_moves(board, side_to_move).is_empty() {
        return GameResult::won_by(opponent);
    }
    if legal_moves(board, opponent).is_empty() {
        return GameResult::won_by(side_to_move);
    }

    GameResult::Ongoing
}

/// Count leaf nodes of the move tree to `depth` plies, sides alternating
pub fn perft(board: &Board, player: Player, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(board, player);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|mv| {
            let (next, _) = apply_move(board, mv);
            perft(&next, player.opponent(), depth - 1)
        })
        .sum()
}

// ============================================================================
// GAME STATE
// ============================================================================

/// A board together with the side to move, for playing whole games
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub to_move: Player,
    /// Plies played since this state was created
    pub ply: u32,
}

impl GameState {
    /// Standard opening position, White to move
    pub fn new() -> Self {
        Self::from_board(Board::initial(), Player::White)
    }

    pub fn from_board(board: Board, to_move: Player) -> Self {
        Self {
            board,
            to_move,
            ply: 0,
        }
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.board, self.to_move)
    }

    /// Play a move and hand the turn over
    pub fn apply_move(&self, mv: &Move) -> Self {
        let (board, _) = apply_move(&self.board, mv);
        Self {
            board,
            to_move: self.to_move.opponent(),
            ply: self.ply + 1,
        }
    }

    pub fn result(&self) -> GameResult {
        check_game_over(&self.board, self.to_move)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
