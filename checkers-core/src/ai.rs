//! Minimax search with alpha-beta pruning

use crate::board::Board;
use crate::eval::{evaluate, Heuristics};
use crate::game::{apply_move, check_game_over, legal_moves, GameResult, GameState, Move};
use crate::pieces::Player;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Search depth used when the caller does not pick one
pub const DEFAULT_DEPTH: u32 = 4;

/// Score of a won position (from the root player's view)
pub const WIN_VALUE: f64 = f64::INFINITY;

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Outcome of a root search
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Chosen move; `None` for a decided position, depth 0, no legal
    /// moves, or when every move loses
    pub best_move: Option<Move>,
    /// Minimax score of the chosen move from the root player's view
    pub score: f64,
    /// Nodes visited, root included
    pub nodes: u64,
}

/// Alpha-Beta AI player.
///
/// Fully deterministic: identical inputs always give the identical move.
#[derive(Clone, Debug)]
pub struct AlphaBetaAI {
    pub depth: u32,
    pub heuristics: Heuristics,
    nodes: u64,
}

impl AlphaBetaAI {
    pub fn new(depth: u32) -> Self {
        Self::with_heuristics(depth, Heuristics::default())
    }

    pub fn with_heuristics(depth: u32, heuristics: Heuristics) -> Self {
        Self {
            depth,
            heuristics,
            nodes: 0,
        }
    }

    /// Get best move for `player` on `board`
    pub fn best_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        self.search(board, player).best_move
    }

    /// Search the root position to `self.depth` plies.
    ///
    /// The root is an ordinary maximizing node: a decided position or a
    /// depth of 0 yields no move, and a move is only chosen if it scores
    /// above −∞. Ties keep the first move in generation order.
    pub fn search(&mut self, board: &Board, player: Player) -> SearchResult {
        self.nodes = 0;
        let (score, best_move) =
            self.minimax(board, self.depth, -WIN_VALUE, WIN_VALUE, true, player);

        match &best_move {
            Some(mv) => tracing::debug!(
                "{} search depth={} nodes={} score={} move={}",
                player,
                self.depth,
                self.nodes,
                score,
                mv
            ),
            None => tracing::debug!(
                "{} search depth={} nodes={} score={} no move",
                player,
                self.depth,
                self.nodes,
                score
            ),
        }

        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
        }
    }

    /// Play a complete game, stopping early after `max_plies`.
    ///
    /// When the search finds no move in an ongoing game (every move loses),
    /// the first legal move is played so the game runs to its end.
    pub fn play_game(&mut self, initial: GameState, max_plies: u32) -> (GameState, Vec<Move>) {
        let mut state = initial;
        let mut history = Vec::new();

        while state.result() == GameResult::Ongoing && state.ply < max_plies {
            let chosen = self
                .best_move(&state.board, state.to_move)
                .or_else(|| state.legal_moves().into_iter().next());
            let Some(mv) = chosen else {
                break;
            };
            state = state.apply_move(&mv);
            history.push(mv);
        }

        (state, history)
    }

    /// Evaluate a position from `player`'s view
    pub fn evaluate(&self, board: &Board, player: Player) -> f64 {
        evaluate(board, player, &self.heuristics)
    }

    // ========================================================================
    // MINIMAX
    // ========================================================================

    /// Score of `board` for `root`, with `root` to move when `maximizing`,
    /// and the move that reaches it.
    ///
    /// Nodes that stop early (decided, depth exhausted, no moves) return no
    /// move. Otherwise the first move strictly improving on the starting
    /// bound of ∓∞ is kept.
    fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        root: Player,
    ) -> (f64, Option<Move>) {
        self.nodes += 1;
        let side = if maximizing { root } else { root.opponent() };

        match check_game_over(board, side).winner() {
            Some(winner) if winner == root => return (WIN_VALUE, None),
            Some(_) => return (-WIN_VALUE, None),
            None => {}
        }

        if depth == 0 {
            return (self.evaluate(board, root), None);
        }

        let mut moves = legal_moves(board, side);
        if moves.is_empty() {
            return (self.evaluate(board, root), None);
        }

        let mut best_index = None;
        let mut best = if maximizing { -WIN_VALUE } else { WIN_VALUE };

        for (i, mv) in moves.iter().enumerate() {
            let (child, _) = apply_move(board, mv);
            let (score, _) = self.minimax(&child, depth - 1, alpha, beta, !maximizing, root);

            if maximizing {
                if score > best {
                    best = score;
                    best_index = Some(i);
                }
                alpha = alpha.max(score);
            } else {
                if score < best {
                    best = score;
                    best_index = Some(i);
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        (best, best_index.map(|i| moves.swap_remove(i)))
    }
}

impl Default for AlphaBetaAI {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

/// Best move for `player` at `depth` with the default heuristics
pub fn best_move(board: &Board, player: Player, depth: u32) -> Option<Move> {
    AlphaBetaAI::new(depth).best_move(board, player)
}

// ============================================================================
// TESTS
// ============================================================================
