//! Integration tests for the checkers engine
//!
//! Tests the full stack: wire format, move generation, move application,
//! game-over detection and the alpha-beta AI, over seeded random games.

use checkers_core::{
    apply_move, board_to_wire, check_game_over, evaluate, legal_moves, AlphaBetaAI, Board,
    GameResult, GameState, Heuristics, Move, Piece, Player, Position, Square,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Positions reached by random play, with the side to move
fn random_positions(seed: u64, games: usize, max_plies: u32) -> Vec<(Board, Player)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut positions = Vec::new();

    for _ in 0..games {
        let mut state = GameState::new();
        while state.ply < max_plies && !state.result().is_over() {
            positions.push((state.board, state.to_move));
            let moves = state.legal_moves();
            let Some(mv) = moves.choose(&mut rng) else {
                break;
            };
            state = state.apply_move(mv);
        }
    }

    positions
}

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col)
}

/// Plain minimax without pruning, same terminal and leaf rules as the AI
fn plain_minimax(board: &Board, depth: u32, maximizing: bool, root: Player, h: &Heuristics) -> f64 {
    let side = if maximizing { root } else { root.opponent() };
    match check_game_over(board, side).winner() {
        Some(w) if w == root => return f64::INFINITY,
        Some(_) => return f64::NEG_INFINITY,
        None => {}
    }
    if depth == 0 {
        return evaluate(board, root, h);
    }
    let moves = legal_moves(board, side);
    if moves.is_empty() {
        return evaluate(board, root, h);
    }
    let scores = moves.iter().map(|mv| {
        let (child, _) = apply_move(board, mv);
        plain_minimax(&child, depth - 1, !maximizing, root, h)
    });
    if maximizing {
        scores.fold(f64::NEG_INFINITY, f64::max)
    } else {
        scores.fold(f64::INFINITY, f64::min)
    }
}

/// Root of `plain_minimax`: first move scoring strictly above −∞ and above
/// every earlier move
fn plain_best(board: &Board, player: Player, depth: u32) -> (Option<Move>, f64) {
    let h = Heuristics::default();
    match check_game_over(board, player).winner() {
        Some(w) if w == player => return (None, f64::INFINITY),
        Some(_) => return (None, f64::NEG_INFINITY),
        None => {}
    }
    let moves = legal_moves(board, player);
    if depth == 0 || moves.is_empty() {
        return (None, evaluate(board, player, &h));
    }

    let mut best: Option<Move> = None;
    let mut best_score = f64::NEG_INFINITY;
    for mv in moves {
        let (child, _) = apply_move(board, &mv);
        let score = plain_minimax(&child, depth - 1, false, player, &h);
        if score > best_score {
            best_score = score;
            best = Some(mv);
        }
    }
    (best, best_score)
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_initial_black_has_seven_steps() {
    let moves = legal_moves(&Board::initial(), Player::Black);
    assert_eq!(moves.len(), 7);
    assert!(moves.iter().all(|m| m.captures.is_empty()));
}

#[test]
fn test_single_capture_scenario_through_wire() {
    let board = Board::empty()
        .with_piece(sq(4, 3), Piece::man(Player::White))
        .with_piece(sq(3, 4), Piece::man(Player::Black));
    let json = serde_json::json!({
        "board": board_to_wire(&board),
        "current_player": "white",
    })
    .to_string();

    let position = Position::from_json(&json).unwrap();
    let player = position.current_player.unwrap();
    let moves = legal_moves(&position.board, player);

    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].from, sq(4, 3));
    assert_eq!(moves[0].to, sq(2, 5));
    assert_eq!(moves[0].captures, vec![sq(3, 4)]);
}

#[test]
fn test_black_without_moves_loses() {
    // Black men wedged against White's back pieces
    let board = Board::empty()
        .with_piece(sq(6, 1), Piece::man(Player::Black))
        .with_piece(sq(7, 0), Piece::man(Player::White))
        .with_piece(sq(7, 2), Piece::man(Player::White))
        .with_piece(sq(2, 5), Piece::man(Player::White));

    assert!(legal_moves(&board, Player::Black).is_empty());
    let result = check_game_over(&board, Player::Black);
    assert_eq!(result, GameResult::WhiteWins);
}

#[test]
fn test_no_white_pieces_means_black_wins() {
    let board = Board::empty()
        .with_piece(sq(0, 1), Piece::man(Player::Black))
        .with_piece(sq(3, 2), Piece::king(Player::Black));

    for side in [Player::White, Player::Black] {
        let result = check_game_over(&board, side);
        assert!(result.is_over());
        assert_eq!(result.winner(), Some(Player::Black));
    }
}

// ============================================================================
// INVARIANTS OVER RANDOM PLAY
// ============================================================================

#[test]
fn test_mandatory_capture_invariant() {
    for (board, player) in random_positions(1, 40, 120) {
        let moves = legal_moves(&board, player);
        if moves.iter().any(|m| !m.captures.is_empty()) {
            assert!(
                moves.iter().all(|m| !m.captures.is_empty()),
                "step offered alongside a capture:\n{board}"
            );
        }
    }
}

#[test]
fn test_apply_move_invariants() {
    for (board, player) in random_positions(2, 40, 120) {
        for mv in legal_moves(&board, player) {
            let before = board;
            let (next, promoted) = apply_move(&board, &mv);

            // Input untouched
            assert_eq!(board, before);

            // Chain captures remove exactly one opposing piece per hop
            let k = mv.captures.len();
            assert_eq!(
                next.count(player.opponent()),
                board.count(player.opponent()) - k
            );
            assert_eq!(next.count(player), board.count(player));

            let mut hops = mv.captures.clone();
            hops.sort_by_key(|s| (s.row, s.col));
            hops.dedup();
            assert_eq!(hops.len(), k, "square captured twice in {mv}");

            // Mover lands on `to`, crowned on its far row
            let moved = next.get(mv.to).expect("moved piece missing");
            assert_eq!(moved.owner, player);
            if mv.to.row == player.promotion_row() {
                assert!(moved.is_king);
            }
            let was_king = board.get(mv.from).map(|p| p.is_king).unwrap_or(false);
            assert_eq!(promoted, !was_king && moved.is_king);

            assert!(next.pieces().all(|(s, _)| s.is_playable()));
        }
    }
}

#[test]
fn test_game_state_results_are_consistent() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..20 {
        let mut state = GameState::new();
        while !state.result().is_over() && state.ply < 300 {
            let moves = state.legal_moves();
            let mv = moves.choose(&mut rng).expect("ongoing game without moves");
            state = state.apply_move(mv);
        }

        if let Some(winner) = state.result().winner() {
            let loser = winner.opponent();
            let board = &state.board;
            assert!(
                board.count(loser) == 0
                    || legal_moves(board, loser).is_empty()
                    || legal_moves(board, winner).is_empty()
                    || board.count(winner) == 0
            );
        }
    }
}

// ============================================================================
// ALPHA-BETA TESTS
// ============================================================================

#[test]
fn test_alphabeta_matches_plain_minimax() {
    let positions = random_positions(4, 6, 40);
    for (board, player) in positions.into_iter().step_by(7) {
        let result = AlphaBetaAI::new(3).search(&board, player);
        let (expected_move, expected_score) = plain_best(&board, player, 3);

        assert_eq!(result.best_move, expected_move, "position:\n{board}");
        assert_eq!(result.score, expected_score, "position:\n{board}");
    }
}

#[test]
fn test_alphabeta_no_move_for_decided_position() {
    // White to move, but Black's stuck man has already lost the game
    let board = Board::empty()
        .with_piece(sq(7, 0), Piece::man(Player::Black))
        .with_piece(sq(5, 2), Piece::man(Player::White));

    assert!(!legal_moves(&board, Player::White).is_empty());
    assert_eq!(AlphaBetaAI::new(4).best_move(&board, Player::White), None);
    assert_eq!(AlphaBetaAI::new(0).best_move(&Board::initial(), Player::White), None);
}

#[test]
fn test_alphabeta_deterministic() {
    for (board, player) in random_positions(5, 3, 30).into_iter().step_by(5) {
        let first = AlphaBetaAI::new(3).best_move(&board, player);
        let second = AlphaBetaAI::new(3).best_move(&board, player);
        assert_eq!(first, second);
    }
}

#[test]
fn test_alphabeta_move_is_legal() {
    for (board, player) in random_positions(6, 4, 60).into_iter().step_by(9) {
        let moves = legal_moves(&board, player);
        let result = AlphaBetaAI::new(2).search(&board, player);
        match result.best_move {
            Some(mv) => assert!(moves.contains(&mv)),
            None => assert!(moves.is_empty() || result.score == f64::NEG_INFINITY),
        }
    }
}

#[test]
fn test_alphabeta_plays_game() {
    let mut ai = AlphaBetaAI::new(2);
    let (final_state, history) = ai.play_game(GameState::new(), 60);

    assert!(!history.is_empty());
    assert_eq!(history.len() as u32, final_state.ply);
    println!("Game ended: {:?}, moves: {}", final_state.result(), history.len());
}
