//! Checkers Server - HTTP API for the checkers frontend
//!
//! This crate provides the web backend:
//! - REST API for move listing, move validation and bot moves
//! - CORS for the development frontends
//! - Optional static file serving for a built frontend

mod error;
mod routes;
mod state;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;

use checkers_core::DEFAULT_DEPTH;

pub use error::ApiError;
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory with a built frontend, served for unknown paths
    pub static_dir: Option<String>,
    /// Search depth for bot moves
    pub ai_depth: u32,
    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            static_dir: None,
            ai_depth: DEFAULT_DEPTH,
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

/// Build the CORS layer from the configured origins
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let router = Router::new()
        // Status endpoints
        .route("/", get(routes::status::root_handler))
        .route("/api/status", get(routes::status::status_handler))
        // Board setup
        .route("/api/init", get(routes::board::init_board))
        // Game API
        .route("/api/moves", post(routes::game::get_available_moves))
        .route("/api/validate", post(routes::game::validate_move))
        .route("/api/move", post(routes::game::get_bot_move))
        // Shared state
        .with_state(state)
        .layer(cors_layer(config));

    // Static file serving (must be last)
    match &config.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new(config.ai_depth));
    let router = create_router(&config, state);

    tracing::info!("Checkers Server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Bot search depth: {}", config.ai_depth);
    if let Some(dir) = &config.static_dir {
        tracing::info!("Static files served from: {}", dir);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
