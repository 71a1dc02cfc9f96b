//! HalChess - Search Engine Module
//!
//! This module implements the chess search algorithm using:
//! - Iterative deepening under a wall-clock budget
//! - Negamax with alpha-beta pruning
//! - Transposition table probes and hash-move-first ordering
//! - Quiescence search over captures
//! - MVV-LVA move ordering
//!
//! The board is searched in place. Every node clones it before trying moves
//! and restores that snapshot after each one, so a fully unwound call leaves
//! the board exactly as it found it.

use std::cmp::Reverse;
use std::time::Instant;

use log::{debug, info};

use crate::board::{Board, Move};
use crate::config::EngineConfig;
use crate::evaluation::{endgame_weight, move_score, Evaluator, PieceSquareEvaluator};
use crate::move_generator::{generate_legal, generate_pseudo_legal};
use crate::repetition::RepetitionTable;
use crate::transposition::{Bound, TranspositionTable};

// Constants for search
pub const INFINITY: i32 = 100000;
pub const MATE_SCORE: i32 = 50000;

/// Scores this close to `MATE_SCORE` are mate scores
const MATE_THRESHOLD: i32 = MATE_SCORE - 100;

/// Outcome of one call to the search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the side to move has no legal move
    pub best_move: Option<Move>,
    /// Score of the deepest completed iteration, mover's point of view
    pub score: i32,
    /// Deepest completed iteration (0 if none completed)
    pub depth: i32,
    pub nodes: u64,
}

// ============================================================================
// SEARCH ENGINE
// ============================================================================

pub struct SearchEngine {
    tt: TranspositionTable,
    evaluator: Box<dyn Evaluator>,
    max_depth: i32,

    // Per-search state
    start_time: Instant,
    time_budget: Option<f64>,
    stopped: bool,
    nodes: u64,
    root_endgame_weight: f32,
    root_best: Option<Move>,
}

impl SearchEngine {
    pub fn new(config: &EngineConfig) -> Self {
        SearchEngine::with_evaluator(config, Box::new(PieceSquareEvaluator))
    }

    /// Engine scoring leaves with a custom evaluator
    pub fn with_evaluator(config: &EngineConfig, evaluator: Box<dyn Evaluator>) -> Self {
        SearchEngine {
            tt: TranspositionTable::new(config.tt_size_bytes),
            evaluator,
            max_depth: config.max_depth.max(1),
            start_time: Instant::now(),
            time_budget: None,
            stopped: false,
            nodes: 0,
            root_endgame_weight: 0.0,
            root_best: None,
        }
    }

    /// Search `board` for at most `seconds`, deepening one ply at a time.
    ///
    /// An iteration cut short by the clock never replaces the result of the
    /// previous one. If not even depth 1 completes, the first legal move in
    /// ordering order is returned instead.
    pub fn iterative_deepen(
        &mut self,
        board: &Board,
        repetitions: &RepetitionTable,
        seconds: f64,
    ) -> SearchResult {
        self.run(board, repetitions, Some(seconds), self.max_depth)
    }

    /// Search to exactly `depth` plies with no time limit
    pub fn search_depth(
        &mut self,
        board: &Board,
        repetitions: &RepetitionTable,
        depth: i32,
    ) -> SearchResult {
        self.run(board, repetitions, None, depth.max(1))
    }

    /// Forget everything learned in earlier searches
    pub fn clear(&mut self) {
        self.tt.clear();
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    fn run(
        &mut self,
        board: &Board,
        repetitions: &RepetitionTable,
        budget: Option<f64>,
        max_depth: i32,
    ) -> SearchResult {
        self.start_time = Instant::now();
        self.time_budget = budget;
        self.stopped = false;
        self.nodes = 0;
        self.root_endgame_weight = endgame_weight(board);

        let mut result = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
        };
        let mut work = board.clone();

        for depth in 1..=max_depth {
            self.root_best = None;
            let score = self.negamax(&mut work, repetitions, -INFINITY, INFINITY, depth, 0);
            debug_assert_eq!(&work, board, "board not restored after depth {}", depth);

            if self.stopped {
                debug!("depth {} interrupted after {} nodes", depth, self.nodes);
                break;
            }

            result.best_move = self.root_best;
            result.score = score;
            result.depth = depth;

            debug!(
                "depth {} score {} move {} nodes {} hashfull {} tt hits {} writes {}",
                depth,
                score,
                result.best_move.map_or_else(|| "none".to_string(), |m| m.notation()),
                self.nodes,
                self.tt.hashfull(),
                self.tt.hits,
                self.tt.writes
            );

            // No legal move, or a forced mate is already proven
            if result.best_move.is_none() || score.abs() >= MATE_THRESHOLD {
                break;
            }
        }

        if result.best_move.is_none() {
            let mut moves = generate_legal(board, true);
            self.order_moves(board, &mut moves);
            result.best_move = moves.first().copied();
        }
        result.nodes = self.nodes;

        info!(
            "search finished: move {} score {} depth {} nodes {} in {:.2}s",
            result.best_move.map_or_else(|| "none".to_string(), |m| m.notation()),
            result.score,
            result.depth,
            result.nodes,
            self.start_time.elapsed().as_secs_f64()
        );

        result
    }

    #[inline]
    fn out_of_time(&self) -> bool {
        match self.time_budget {
            Some(budget) => self.start_time.elapsed().as_secs_f64() > budget,
            None => false,
        }
    }

    fn store(&mut self, hash: u64, best_move: Option<Move>, depth: i32, score: i32, bound: Bound) {
        // Mate scores depend on the distance to the root they were found at
        if score.abs() < MATE_THRESHOLD {
            self.tt.store(hash, best_move, depth, score, bound);
        }
    }

    fn negamax(
        &mut self,
        board: &mut Board,
        repetitions: &RepetitionTable,
        mut alpha: i32,
        beta: i32,
        depth: i32,
        root_distance: i32,
    ) -> i32 {
        if self.out_of_time() {
            self.stopped = true;
        }
        if self.stopped {
            return 0;
        }
        self.nodes += 1;

        // Draw detection
        if root_distance > 0
            && (repetitions.contains(board.hash()) || board.total_piece_count() == 2)
        {
            return 0;
        }

        if depth == 0 {
            return self.quiescence(board, alpha, beta);
        }

        let mut moves = generate_pseudo_legal(board, true);
        self.order_moves(board, &mut moves);
        let snapshot = board.clone();
        let hash = board.hash();
        let mover = board.white_to_move();

        // Probe TT. A stored move we did not generate means another position
        // owns this hash.
        if let Some(entry) = self.tt.probe(hash) {
            let usable = entry.best_move.map_or(true, |mv| moves.contains(&mv));
            if usable {
                if entry.depth >= depth {
                    match entry.bound {
                        Bound::Exact if root_distance > 0 || entry.best_move.is_some() => {
                            if root_distance == 0 {
                                self.root_best = entry.best_move;
                            }
                            return entry.score;
                        }
                        Bound::Upper if entry.score <= alpha => return entry.score,
                        Bound::Lower if entry.score >= beta => return entry.score,
                        _ => {}
                    }
                }
                if let Some(hash_move) = entry.best_move {
                    if let Some(pos) = moves.iter().position(|m| *m == hash_move) {
                        let mv = moves.remove(pos);
                        moves.insert(0, mv);
                    }
                }
            }
        }

        let mut bound = Bound::Upper;
        let mut best_move = None;
        let mut legal_moves = 0;

        for mv in moves {
            board.make_move(&mv);
            if board.is_in_check(mover) {
                board.unmake_move(&snapshot);
                continue;
            }
            legal_moves += 1;

            let score =
                -self.negamax(board, repetitions, -beta, -alpha, depth - 1, root_distance + 1);
            board.unmake_move(&snapshot);

            if self.stopped {
                return 0;
            }

            if score > alpha {
                alpha = score;
                best_move = Some(mv);
                bound = Bound::Exact;
            }

            if score >= beta {
                self.store(hash, Some(mv), depth, beta, Bound::Lower);
                return beta;
            }
        }

        if root_distance == 0 {
            self.root_best = best_move;
        }

        if legal_moves == 0 {
            return if board.is_in_check(mover) {
                -MATE_SCORE + root_distance + 1
            } else {
                0
            };
        }

        self.store(hash, best_move, depth, alpha, bound);
        alpha
    }

    fn quiescence(&mut self, board: &mut Board, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        let stand_pat = self.evaluator.evaluate(board, self.root_endgame_weight);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut captures = generate_pseudo_legal(board, false);
        self.order_moves(board, &mut captures);
        let snapshot = board.clone();
        let mover = board.white_to_move();

        for mv in captures {
            board.make_move(&mv);
            if board.is_in_check(mover) {
                board.unmake_move(&snapshot);
                continue;
            }

            let score = -self.quiescence(board, -beta, -alpha);
            board.unmake_move(&snapshot);

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    /// Stable sort, best ordering score first
    fn order_moves(&self, board: &Board, moves: &mut [Move]) {
        moves.sort_by_cached_key(|mv| Reverse(move_score(board, mv)));
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new(&EngineConfig::default())
    }
}
