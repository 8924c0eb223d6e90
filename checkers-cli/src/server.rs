//! Server command - start the HTTP API
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to checkers-server crate)
//! - Level 4: configuration validation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use checkers_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8000")]
    pub port: u16,

    /// Search depth for bot moves
    #[arg(long, default_value = "4")]
    pub depth: u32,

    /// Directory containing a built frontend to serve
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Allowed CORS origin (repeatable; replaces the development defaults)
    #[arg(long = "allow-origin", value_name = "ORIGIN")]
    pub allowed_origins: Vec<String>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// This function reads like a table of contents:
/// 1. Configure server
/// 2. Start server (blocking)
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;

    tracing::info!("Starting checkers API server on port {}", config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    validate_depth(args.depth)?;
    if let Some(dir) = &args.static_dir {
        validate_static_dir(dir)?;
    }

    let defaults = ServerConfig::default();
    Ok(ServerConfig {
        port: args.port,
        static_dir: args
            .static_dir
            .as_ref()
            .map(|dir| dir.to_string_lossy().to_string()),
        ai_depth: args.depth,
        allowed_origins: if args.allowed_origins.is_empty() {
            defaults.allowed_origins
        } else {
            args.allowed_origins.clone()
        },
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    // Create tokio runtime for async server
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn validate_depth(depth: u32) -> Result<()> {
    if depth == 0 {
        anyhow::bail!("Search depth must be at least 1");
    }
    Ok(())
}

/// Validate that static directory exists
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory {} not found; only the API will be served",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "--static-dir must point at a directory: {}",
            path.display()
        );
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
