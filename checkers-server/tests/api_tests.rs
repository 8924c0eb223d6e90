//! Integration tests for checkers-server API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use checkers_core::{board_to_wire, Board, Piece, Player, Square};
use checkers_server::{create_router, ServerConfig, ServerState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> axum::Router {
    let config = ServerConfig::default();
    let state = Arc::new(ServerState::new(2));
    create_router(&config, state)
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let response = test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn wire(board: &Board) -> Value {
    serde_json::to_value(board_to_wire(board)).unwrap()
}

fn single_jump_board() -> Board {
    Board::empty()
        .with_piece(Square::new(4, 3), Piece::man(Player::White))
        .with_piece(Square::new(3, 4), Piece::man(Player::Black))
}

#[tokio::test]
async fn test_root_endpoint() {
    let (status, json) = get_json("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Checkers API");
    assert_eq!(json["status"], "running");
}

#[tokio::test]
async fn test_status_endpoint() {
    let (status, json) = get_json("/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["engine"], "rust");
    assert_eq!(json["ai_depth"], 2);
}

#[tokio::test]
async fn test_init_endpoint() {
    let (status, json) = get_json("/api/init").await;
    assert_eq!(status, StatusCode::OK);

    let board = json["board"].as_array().unwrap();
    assert_eq!(board.len(), 8);
    assert_eq!(board[0][0], Value::Null);
    assert_eq!(board[0][1], json!({"player": "black", "isKing": false}));
    assert_eq!(board[5][0], json!({"player": "white", "isKing": false}));
}

#[tokio::test]
async fn test_moves_endpoint_initial_black() {
    let body = json!({"board": wire(&Board::initial()), "current_player": "black"});
    let (status, json) = post_json("/api/moves", body).await;
    assert_eq!(status, StatusCode::OK);

    let moves = json["moves"].as_array().unwrap();
    assert_eq!(moves.len(), 7);
    assert!(moves.iter().all(|m| m["jumps"] == json!([])));
    assert_eq!(moves[0]["from"], json!({"row": 2, "col": 1}));
    assert_eq!(moves[0]["to"], json!({"row": 3, "col": 0}));
}

#[tokio::test]
async fn test_moves_endpoint_forced_jump() {
    let body = json!({"board": wire(&single_jump_board()), "current_player": "white"});
    let (status, json) = post_json("/api/moves", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["moves"],
        json!([{"from": {"row": 4, "col": 3}, "to": {"row": 2, "col": 5}, "jumps": [[3, 4]]}])
    );
}

#[tokio::test]
async fn test_validate_capture_ends_game() {
    let body = json!({
        "board": wire(&single_jump_board()),
        "from_pos": {"row": 4, "col": 3},
        "to_pos": {"row": 2, "col": 5},
    });
    let (status, json) = post_json("/api/validate", body).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["jumps"], json!([[3, 4]]));
    assert_eq!(json["is_promotion"], false);
    assert_eq!(json["new_board"][3][4], Value::Null);
    assert_eq!(json["new_board"][2][5], json!({"player": "white", "isKing": false}));
    assert_eq!(json["game_over"], true);
    assert_eq!(json["winner"], "white");
}

#[tokio::test]
async fn test_validate_rejects_step_when_jump_available() {
    let body = json!({
        "board": wire(&single_jump_board()),
        "from_pos": {"row": 4, "col": 3},
        "to_pos": {"row": 3, "col": 2},
    });
    let (status, json) = post_json("/api/validate", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["detail"], "Invalid move");
}

#[tokio::test]
async fn test_validate_empty_from_square() {
    let body = json!({
        "board": wire(&Board::initial()),
        "from_pos": {"row": 4, "col": 3},
        "to_pos": {"row": 3, "col": 2},
    });
    let (status, json) = post_json("/api/validate", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["detail"], "No piece at from position");
}

#[tokio::test]
async fn test_validate_promotion() {
    let board = Board::empty()
        .with_piece(Square::new(1, 2), Piece::man(Player::White))
        .with_piece(Square::new(5, 2), Piece::man(Player::Black));
    let body = json!({
        "board": wire(&board),
        "from_pos": {"row": 1, "col": 2},
        "to_pos": {"row": 0, "col": 1},
    });
    let (status, json) = post_json("/api/validate", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_promotion"], true);
    assert_eq!(json["new_board"][0][1], json!({"player": "white", "isKing": true}));
    assert_eq!(json["game_over"], false);
    assert_eq!(json["winner"], Value::Null);
}

#[tokio::test]
async fn test_bot_move_plays_forced_capture() {
    let body = json!({"board": wire(&single_jump_board()), "current_player": "white"});
    let (status, json) = post_json("/api/move", body).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["move"]["to"], json!({"row": 2, "col": 5}));
    assert_eq!(json["move"]["jumps"], json!([[3, 4]]));
    assert_eq!(json["game_over"], true);
    assert_eq!(json["winner"], "white");
}

#[tokio::test]
async fn test_bot_move_without_moves() {
    // Black's only man sits on row 7 and cannot move
    let board = Board::empty()
        .with_piece(Square::new(7, 0), Piece::man(Player::Black))
        .with_piece(Square::new(5, 2), Piece::man(Player::White));
    let body = json!({"board": wire(&board), "current_player": "black"});
    let (status, json) = post_json("/api/move", body).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["move"], Value::Null);
    assert_eq!(json["new_board"], wire(&board));
    assert_eq!(json["game_over"], true);
    assert_eq!(json["winner"], "white");
}

#[tokio::test]
async fn test_invalid_board_size() {
    let body = json!({"board": [[null, null]], "current_player": "white"});
    let (status, json) = post_json("/api/move", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["detail"], "Invalid board size");
}

#[tokio::test]
async fn test_piece_without_owner() {
    let mut board = wire(&Board::initial());
    board[2][1] = json!({"isKing": false});
    let body = json!({"board": board, "current_player": "white"});
    let (status, json) = post_json("/api/moves", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].as_str().unwrap().contains("no owner"));
}

#[tokio::test]
async fn test_unknown_player_is_bad_request() {
    let body = json!({"board": wire(&Board::initial()), "current_player": "red"});
    let (status, json) = post_json("/api/moves", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].as_str().unwrap().contains("red"));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/validate")
                .header("content-type", "application/json")
                .body(Body::from("{\"board\": "))
                .unwrap(),
        )
        .await
        .unwrap();
    let (status, json) = read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn test_bot_move_in_decided_position() {
    // White to move, but Black's stuck man has already lost
    let board = Board::empty()
        .with_piece(Square::new(7, 0), Piece::man(Player::Black))
        .with_piece(Square::new(5, 2), Piece::man(Player::White));
    let body = json!({"board": wire(&board), "current_player": "white"});
    let (status, json) = post_json("/api/move", body).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["move"], Value::Null);
    assert_eq!(json["new_board"], wire(&board));
    assert_eq!(json["game_over"], true);
    assert_eq!(json["winner"], "white");
}
