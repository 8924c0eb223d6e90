//! Example to run the checkers server standalone
//!
//! Run with: cargo run -p checkers-server --example run_server

use checkers_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig::default();

    println!("Starting checkers server on port {}", config.port);
    println!("Bot search depth: {}", config.ai_depth);
    println!("Try http://localhost:{}/api/init", config.port);

    run_server(config).await
}
