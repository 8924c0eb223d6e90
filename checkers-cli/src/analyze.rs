//! Analysis commands - best move, legal moves and perft for one position
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_best(), run_moves(), run_perft() - orchestration
//! - Level 2: load_position(), report_*()
//! - Level 3: (delegated to checkers-core)
//! - Level 4: side-to-move resolution

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use checkers_core::{
    apply_move, board_to_wire, check_game_over, legal_moves, perft, AlphaBetaAI, Board, Player,
    Position, SearchResult, WireMove,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Where the position comes from
#[derive(Args)]
pub struct PositionArgs {
    /// Board JSON file (a bare 8x8 board or a `{board, current_player}` request).
    /// Defaults to the standard starting position.
    #[arg(long, value_name = "FILE")]
    pub board: Option<PathBuf>,

    /// Side to move (white or black); overrides `current_player` in the file
    #[arg(long)]
    pub player: Option<Player>,
}

#[derive(Args)]
pub struct BestArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    /// Search depth in plies
    #[arg(long, default_value = "4")]
    pub depth: u32,

    /// Output result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct MovesArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    /// Output moves as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PerftArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    /// Maximum perft depth
    #[arg(long, default_value = "6")]
    pub depth: u32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Search a position and print the chosen move
pub fn run_best(args: BestArgs) -> Result<()> {
    let (board, player) = load_position(&args.position)?;

    tracing::info!("Searching for {} at depth {}", player, args.depth);

    let mut ai = AlphaBetaAI::new(args.depth);
    let result = ai.search(&board, player);

    report_best(&board, player, &result, args.json)
}

/// Print every legal move for a position
pub fn run_moves(args: MovesArgs) -> Result<()> {
    let (board, player) = load_position(&args.position)?;
    let moves = legal_moves(&board, player);

    if args.json {
        let wire: Vec<WireMove> = moves.iter().map(WireMove::from).collect();
        println!("{}", serde_json::to_string_pretty(&json!({ "moves": wire }))?);
    } else {
        println!("{} legal moves for {}:", moves.len(), player);
        for mv in &moves {
            println!("  {}", mv);
        }
    }

    Ok(())
}

/// Count move-tree leaves at each depth up to `args.depth`
pub fn run_perft(args: PerftArgs) -> Result<()> {
    let (board, player) = load_position(&args.position)?;

    for depth in 1..=args.depth {
        let start = std::time::Instant::now();
        let leaves = perft(&board, player, depth);
        println!(
            "perft({}) = {} ({:.1}ms)",
            depth,
            leaves,
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load the board and decide who is to move
fn load_position(args: &PositionArgs) -> Result<(Board, Player)> {
    let Some(path) = &args.board else {
        return Ok((Board::initial(), args.player.unwrap_or(Player::White)));
    };

    let position = Position::load(path)?;
    let player = resolve_player(args.player, position.current_player)
        .with_context(|| format!("No side to move for {}", path.display()))?;

    Ok((position.board, player))
}

fn report_best(board: &Board, player: Player, result: &SearchResult, as_json: bool) -> Result<()> {
    let outcome = result.best_move.as_ref().map(|mv| {
        let (next, promoted) = apply_move(board, mv);
        (mv, next, promoted, check_game_over(&next, player.opponent()))
    });

    if as_json {
        let output = match &outcome {
            Some((mv, next, promoted, over)) => json!({
                "move": WireMove::from(*mv),
                "score": result.score,
                "nodes": result.nodes,
                "is_promotion": promoted,
                "new_board": board_to_wire(next),
                "game_over": over.is_over(),
                "winner": over.winner(),
            }),
            None => {
                let over = check_game_over(board, player);
                json!({
                    "move": null,
                    "score": result.score,
                    "nodes": result.nodes,
                    "new_board": board_to_wire(board),
                    "game_over": over.is_over(),
                    "winner": over.winner(),
                })
            }
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match outcome {
        Some((mv, next, promoted, over)) => {
            println!("Best move for {}: {}", player, mv);
            println!("Score: {}  Nodes: {}", result.score, result.nodes);
            if promoted {
                println!("Piece is crowned");
            }
            println!("\n{}", next);
            if let Some(winner) = over.winner() {
                println!("Game over: {} wins", winner);
            }
        }
        None => {
            println!("No move for {} (score {})", player, result.score);
            if let Some(winner) = check_game_over(board, player).winner() {
                println!("Game over: {} wins", winner);
            }
        }
    }

    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Command line wins over the file; one of them must name a side
fn resolve_player(flag: Option<Player>, from_file: Option<Player>) -> Result<Player> {
    flag.or(from_file)
        .ok_or_else(|| anyhow::anyhow!("pass --player or include current_player in the file"))
}

// ============================================================================
// TESTS
// ============================================================================
