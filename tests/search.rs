mod common;

use common::*;
use hal_chess::move_generator::generate_legal;
use hal_chess::repetition::RepetitionTable;
use hal_chess::evaluation::{Evaluator, PieceSquareEvaluator};
use hal_chess::search::MATE_SCORE;
use hal_chess::transposition::Bound;
use hal_chess::types::Square;
use hal_chess::{Board, EngineConfig, Move, SearchEngine};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn engine() -> SearchEngine {
    SearchEngine::new(&EngineConfig::default().with_tt_size_bytes(4 << 20))
}

fn history_of(position: &Board) -> RepetitionTable {
    let mut table = RepetitionTable::new();
    table.add(position.hash());
    table
}

fn sq(name: &str) -> Square {
    Square::parse(name).unwrap()
}

#[test]
fn finds_mate_in_one() {
    // Fool's mate: Qh4#
    let position = board("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2");
    let result = engine().search_depth(&position, &history_of(&position), 3);

    assert_eq!(result.best_move, Some(Move::new(sq("d8"), sq("h4"))));
    assert_eq!(result.score, MATE_SCORE - 2);
}

#[test]
fn finds_back_rank_mate() {
    let position = board("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
    let result = engine().search_depth(&position, &history_of(&position), 4);
    assert_eq!(result.best_move, Some(Move::new(sq("a1"), sq("a8"))));
    assert!(result.score >= MATE_SCORE - 100);
}

#[test]
fn stalemate_has_no_move_and_scores_zero() {
    let position = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    let result = engine().iterative_deepen(&position, &history_of(&position), 1.0);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, 0);
}

#[test]
fn checkmated_side_has_no_move() {
    let position = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    let result = engine().search_depth(&position, &history_of(&position), 2);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, -MATE_SCORE + 1);
}

#[test]
fn fixed_depth_search_is_deterministic() {
    for fen in [hal_chess::STARTING_FEN, KIWIPETE, POSITION_4] {
        let position = board(fen);
        let first = engine().search_depth(&position, &history_of(&position), 3);
        let second = engine().search_depth(&position, &history_of(&position), 3);
        assert_eq!(first, second, "{fen}");
        assert!(first.best_move.is_some());
    }
}

#[test]
fn search_leaves_the_position_untouched() {
    let position = board(KIWIPETE);
    let snapshot = position.clone();
    engine().search_depth(&position, &history_of(&position), 3);
    assert_eq!(position, snapshot);
}

#[test]
fn zero_budget_still_returns_a_legal_move() {
    let position = board(KIWIPETE);
    let result = engine().iterative_deepen(&position, &history_of(&position), 0.0);
    let mv = result.best_move.expect("a move is always returned when one exists");
    assert!(generate_legal(&position, true).contains(&mv));
}

#[test]
fn timed_search_completes_at_least_one_depth() {
    let position = Board::new();
    let result = engine().iterative_deepen(&position, &history_of(&position), 0.5);
    assert!(result.depth >= 1);
    assert!(result.nodes > 0);
    assert!(generate_legal(&position, true).contains(&result.best_move.unwrap()));
}

#[test]
fn wins_hanging_queen() {
    let position = board("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    let result = engine().search_depth(&position, &history_of(&position), 2);
    assert_eq!(result.best_move, Some(Move::new(sq("e4"), sq("d5"))));
}

#[test]
fn repeated_position_inside_search_is_a_draw() {
    // Black is a queen down; every line that returns to an earlier position scores 0
    let position = board("4k3/8/8/8/8/8/8/3QK3 b - - 0 1");
    let mut history = history_of(&position);
    let mut after = position.clone();
    after.make_move(&Move::new(sq("e8"), sq("f8")));
    history.add(after.hash());

    let result = engine().search_depth(&position, &history, 1);
    assert_eq!(result.best_move, Some(Move::new(sq("e8"), sq("f8"))));
    assert_eq!(result.score, 0);
}

#[test]
fn mate_scores_are_not_cached() {
    let position = board("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
    let mut engine = engine();
    let result = engine.search_depth(&position, &history_of(&position), 4);
    assert!(result.score >= MATE_SCORE - 100);

    if let Some(entry) = engine.tt().peek(position.hash()) {
        assert!(entry.score.abs() < MATE_SCORE - 100, "{entry:?}");
    }
}

#[test]
fn root_result_is_cached_as_exact() {
    let position = Board::new();
    let mut engine = engine();
    let result = engine.search_depth(&position, &history_of(&position), 3);

    let entry = engine.tt().peek(position.hash()).expect("root entry");
    assert_eq!(entry.bound, Bound::Exact);
    assert_eq!(entry.best_move, result.best_move);
    assert_eq!(entry.depth, result.depth);
    assert_eq!(entry.score, result.score);
}

/// Scores normally, but every evaluation after the first `fast` ones stalls
struct StallingEvaluator {
    calls: Arc<AtomicUsize>,
    fast: usize,
    stall: Duration,
}

impl Evaluator for StallingEvaluator {
    fn evaluate(&self, board: &Board, endgame_weight: f32) -> i32 {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.fast {
            thread::sleep(self.stall);
        }
        PieceSquareEvaluator.evaluate(board, endgame_weight)
    }
}

#[test]
fn interrupted_depth_keeps_the_previous_result() {
    let position = Board::new();
    let expected = engine().search_depth(&position, &history_of(&position), 1);

    // Depth 1 from the start position evaluates each of the 20 replies once
    let calls = Arc::new(AtomicUsize::new(0));
    let evaluator = StallingEvaluator {
        calls: Arc::clone(&calls),
        fast: 20,
        stall: Duration::from_millis(50),
    };
    let config = EngineConfig::default().with_tt_size_bytes(1 << 20);
    let mut engine = SearchEngine::with_evaluator(&config, Box::new(evaluator));
    let result = engine.iterative_deepen(&position, &history_of(&position), 0.3);

    assert!(calls.load(Ordering::SeqCst) > 20);
    assert_eq!(result.depth, 1);
    assert_eq!(result.best_move, expected.best_move);
    assert_eq!(result.score, expected.score);
}
