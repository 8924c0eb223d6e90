//! Server state
//!
//! Requests carry the full board, so the only shared state is the engine
//! configuration used for bot moves.

use checkers_core::{AlphaBetaAI, Heuristics, DEFAULT_DEPTH};

/// Server-wide shared state
#[derive(Clone, Debug)]
pub struct ServerState {
    pub ai_depth: u32,
    pub heuristics: Heuristics,
}

impl ServerState {
    pub fn new(ai_depth: u32) -> Self {
        Self {
            ai_depth,
            heuristics: Heuristics::default(),
        }
    }

    /// A fresh searcher for one request
    pub fn ai(&self) -> AlphaBetaAI {
        AlphaBetaAI::with_heuristics(self.ai_depth, self.heuristics.clone())
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}
