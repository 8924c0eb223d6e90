//! Status endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::ServerState;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
}

pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Checkers API",
        status: "running",
    })
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub engine: &'static str,
    pub ai_depth: u32,
}

pub async fn status_handler(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        engine: "rust",
        ai_depth: state.ai_depth,
    })
}
