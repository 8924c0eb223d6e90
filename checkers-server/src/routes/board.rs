//! Board setup endpoint

use axum::Json;
use serde::Serialize;

use checkers_core::{board_to_wire, Board, WireBoard};

#[derive(Serialize)]
pub struct InitResponse {
    pub board: WireBoard,
}

/// Standard starting position
pub async fn init_board() -> Json<InitResponse> {
    Json(InitResponse {
        board: board_to_wire(&Board::initial()),
    })
}
