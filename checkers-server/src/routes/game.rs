//! Game API endpoints
//!
//! Every request carries the whole board; nothing is stored between calls.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use checkers_core::{
    apply_move, board_from_wire, board_to_wire, check_game_over, legal_moves, wire::jumps_to_wire,
    Player, WireBoard, WireMove, WireSquare,
};

use crate::error::ApiError;
use crate::state::ServerState;

/// Board plus the side to act
#[derive(Deserialize)]
pub struct BoardRequest {
    pub board: WireBoard,
    pub current_player: Player,
}

/// A proposed move, identified by its endpoints
#[derive(Deserialize)]
pub struct MoveRequest {
    pub board: WireBoard,
    pub from_pos: WireSquare,
    pub to_pos: WireSquare,
}

#[derive(Serialize)]
pub struct MovesResponse {
    pub moves: Vec<WireMove>,
}

#[derive(Serialize)]
pub struct MoveResponse {
    pub from_pos: WireSquare,
    pub to_pos: WireSquare,
    pub jumps: Vec<[i64; 2]>,
    pub is_promotion: bool,
    pub new_board: WireBoard,
    pub game_over: bool,
    pub winner: Option<Player>,
}

#[derive(Serialize)]
pub struct BotMoveResponse {
    #[serde(rename = "move")]
    pub mv: Option<WireMove>,
    pub new_board: WireBoard,
    pub game_over: bool,
    pub winner: Option<Player>,
}

/// List every legal move for the current player
pub async fn get_available_moves(
    body: Result<Json<BoardRequest>, JsonRejection>,
) -> Result<Json<MovesResponse>, ApiError> {
    let Json(req) = body?;
    let board = board_from_wire(&req.board)?;
    let moves = legal_moves(&board, req.current_player)
        .iter()
        .map(WireMove::from)
        .collect();

    Ok(Json(MovesResponse { moves }))
}

/// Check a player's move and play it.
///
/// The mover is the owner of the piece on `from_pos`. When several capture
/// chains share the same endpoints, the first one generated is played.
pub async fn validate_move(
    body: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<MoveResponse>, ApiError> {
    let Json(req) = body?;
    let board = board_from_wire(&req.board)?;
    let from = req.from_pos.to_square()?;
    let to = req.to_pos.to_square()?;

    let piece = board
        .get(from)
        .ok_or_else(|| ApiError::BadRequest("No piece at from position".to_string()))?;
    let player = piece.owner;

    let mv = legal_moves(&board, player)
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to)
        .ok_or_else(|| ApiError::BadRequest("Invalid move".to_string()))?;

    let (new_board, is_promotion) = apply_move(&board, &mv);
    let result = check_game_over(&new_board, player.opponent());

    tracing::debug!("{} played {}", player, mv);

    Ok(Json(MoveResponse {
        from_pos: mv.from.into(),
        to_pos: mv.to.into(),
        jumps: jumps_to_wire(&mv.captures),
        is_promotion,
        new_board: board_to_wire(&new_board),
        game_over: result.is_over(),
        winner: result.winner(),
    }))
}

/// Let the engine choose and play a move for the current player
pub async fn get_bot_move(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<BoardRequest>, JsonRejection>,
) -> Result<Json<BotMoveResponse>, ApiError> {
    let Json(req) = body?;
    let board = board_from_wire(&req.board)?;
    let player = req.current_player;

    let mut ai = state.ai();
    let search = tokio::task::spawn_blocking(move || ai.search(&board, player))
        .await
        .map_err(|e| ApiError::Internal(format!("Error calculating move: {e}")))?;

    let Some(mv) = search.best_move else {
        let result = check_game_over(&board, player);
        return Ok(Json(BotMoveResponse {
            mv: None,
            new_board: board_to_wire(&board),
            game_over: result.is_over(),
            winner: result.winner(),
        }));
    };

    let (new_board, _) = apply_move(&board, &mv);
    let result = check_game_over(&new_board, player.opponent());

    tracing::info!(
        "Bot ({}) played {} (score {}, {} nodes)",
        player,
        mv,
        search.score,
        search.nodes
    );

    Ok(Json(BotMoveResponse {
        mv: Some(WireMove::from(&mv)),
        new_board: board_to_wire(&new_board),
        game_over: result.is_over(),
        winner: result.winner(),
    }))
}
