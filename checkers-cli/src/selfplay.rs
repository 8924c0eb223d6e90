//! Self-play command - engine vs engine games from the starting position
//!
//! The engine is deterministic, so each game opens with a few seeded random
//! plies to vary the positions it sees.
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), random_opening(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use checkers_core::{AlphaBetaAI, GameResult, GameState, Move};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SelfPlayArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// AI search depth
    #[arg(long, default_value = "4")]
    pub depth: u32,

    /// Random plies played before the engines take over
    #[arg(long, default_value = "4")]
    pub random_plies: u32,

    /// Maximum plies per game; games reaching it are reported unfinished
    #[arg(long, default_value = "200")]
    pub max_plies: u32,

    /// Random seed for the openings
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    result: GameResult,
    plies: u32,
    moves: Vec<Move>,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    white_wins: usize,
    black_wins: usize,
    unfinished: usize,
    avg_plies: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run self-play command
///
/// This function reads like a table of contents:
/// 1. Pick the base seed
/// 2. Play the games (in parallel)
/// 3. Report results
pub fn run(args: SelfPlayArgs) -> Result<()> {
    if args.depth == 0 {
        anyhow::bail!("Search depth must be at least 1");
    }

    let seed = args.seed.unwrap_or_else(rand::random);

    tracing::info!(
        "Starting self-play: {} games, depth={}, random plies={}, seed={}",
        args.games,
        args.depth,
        args.random_plies,
        seed
    );

    let results = play_match(&args, seed);

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games; game `i` uses seed `seed + i`
fn play_match(args: &SelfPlayArgs, seed: u64) -> MatchResults {
    let games: Vec<GameRecord> = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let record = play_single_game(
                i + 1,
                args.depth,
                args.random_plies,
                args.max_plies,
                seed.wrapping_add(i as u64),
            );
            tracing::info!(
                "Game {}: {:?} ({} plies)",
                record.game_number,
                record.result,
                record.plies
            );
            record
        })
        .collect();

    compute_match_statistics(games)
}

/// Report match results
fn report_results(results: &MatchResults, args: &SelfPlayArgs) -> Result<()> {
    if args.json {
        print_json_results(results)?;
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game: a random opening, then engine against engine
fn play_single_game(
    game_number: usize,
    depth: u32,
    random_plies: u32,
    max_plies: u32,
    seed: u64,
) -> GameRecord {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (state, mut moves) = random_opening(GameState::new(), random_plies, &mut rng);

    let mut ai = AlphaBetaAI::new(depth);
    let (final_state, engine_moves) = ai.play_game(state, max_plies);
    moves.extend(engine_moves);

    GameRecord {
        game_number,
        result: final_state.result(),
        plies: final_state.ply,
        moves,
    }
}

/// Play up to `plies` uniformly random legal moves
fn random_opening(initial: GameState, plies: u32, rng: &mut ChaCha8Rng) -> (GameState, Vec<Move>) {
    let mut state = initial;
    let mut moves = Vec::new();

    for _ in 0..plies {
        if state.result().is_over() {
            break;
        }
        let Some(mv) = state.legal_moves().choose(rng).cloned() else {
            break;
        };
        state = state.apply_move(&mv);
        moves.push(mv);
    }

    (state, moves)
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let count = |result: GameResult| games.iter().filter(|g| g.result == result).count();
    let white_wins = count(GameResult::WhiteWins);
    let black_wins = count(GameResult::BlackWins);
    let unfinished = count(GameResult::Ongoing);

    let total_plies: u32 = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };

    MatchResults {
        games,
        white_wins,
        black_wins,
        unfinished,
        avg_plies,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        result: GameResult,
        plies: u32,
        moves: Vec<String>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        white_wins: usize,
        black_wins: usize,
        unfinished: usize,
        avg_plies: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        white_wins: results.white_wins,
        black_wins: results.black_wins,
        unfinished: results.unfinished,
        avg_plies: results.avg_plies,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: g.result,
                plies: g.plies,
                moves: g.moves.iter().map(|m| m.to_string()).collect(),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Self-Play Results ===");
    println!("Total games: {}", total);
    println!(
        "White wins:  {} ({:.1}%)",
        results.white_wins,
        percent(results.white_wins, total)
    );
    println!(
        "Black wins:  {} ({:.1}%)",
        results.black_wins,
        percent(results.black_wins, total)
    );
    println!(
        "Unfinished:  {} ({:.1}%)",
        results.unfinished,
        percent(results.unfinished, total)
    );
    println!("Avg plies:   {:.1}", results.avg_plies);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} in {} plies",
            game.game_number, game.result, game.plies
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
