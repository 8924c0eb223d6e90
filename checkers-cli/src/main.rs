//! Checkers CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the HTTP API
//! - best: Search a position for the engine's move
//! - moves: List legal moves for a position
//! - perft: Count move-tree leaves
//! - selfplay: Play engine-vs-engine games

mod analyze;
mod selfplay;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "checkers")]
#[command(about = "Checkers engine: bot moves, analysis and self-play")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve(server::ServerArgs),
    /// Find the engine's move for a position
    Best(analyze::BestArgs),
    /// List legal moves for a position
    Moves(analyze::MovesArgs),
    /// Count leaf nodes of the move tree
    Perft(analyze::PerftArgs),
    /// Play engine-vs-engine games
    Selfplay(selfplay::SelfPlayArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Serve(args) => server::run(args),
        Commands::Best(args) => analyze::run_best(args),
        Commands::Moves(args) => analyze::run_moves(args),
        Commands::Perft(args) => analyze::run_perft(args),
        Commands::Selfplay(args) => selfplay::run(args),
    }
}

/// Initialize logging, defaulting to `info` (`debug` with --verbose)
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
