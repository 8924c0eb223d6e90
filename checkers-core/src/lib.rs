//! Checkers Core - Game engine and AI
//!
//! This crate provides the core game logic for 8x8 checkers:
//! - Board geometry (dark squares, diagonal directions, standard setup)
//! - Pieces, players and crowning
//! - Move generation with mandatory captures and multi-jump chains
//! - Position evaluation with a mobility heuristic
//! - Minimax alpha-beta AI
//! - JSON wire format used at the API boundary

pub mod board;
pub mod pieces;
pub mod game;
pub mod eval;
pub mod ai;
pub mod error;
pub mod wire;

// Re-exports for convenient access
pub use board::{Board, Square, BOARD_SIZE, DIRECTIONS};
pub use pieces::{Piece, Player};
pub use game::{apply_move, check_game_over, legal_moves, perft, GameResult, GameState, Move};
pub use eval::{evaluate, Heuristics};
pub use ai::{best_move, AlphaBetaAI, SearchResult, DEFAULT_DEPTH, WIN_VALUE};
pub use error::BoardError;
pub use wire::{board_from_wire, board_to_wire, Position, WireBoard, WireMove, WirePiece, WireSquare};
