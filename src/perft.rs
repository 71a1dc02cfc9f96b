//! HalChess - Perft Module
//!
//! Leaf-node counting for move generator verification. Uses the same
//! pseudo-legal generation, attack test and snapshot restore as the search.

use crate::board::{Board, Move};
use crate::move_generator::generate_pseudo_legal;

/// Number of leaf positions `depth` plies below `board`
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_pseudo_legal(board, true);
    let snapshot = board.clone();
    let mover = board.white_to_move();
    let mut nodes = 0;

    for mv in moves {
        board.make_move(&mv);
        if !board.is_in_check(mover) {
            nodes += if depth == 1 { 1 } else { perft(board, depth - 1) };
        }
        board.unmake_move(&snapshot);
    }

    nodes
}

/// Perft split by root move, in generation order
pub fn divide(board: &mut Board, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let moves = generate_pseudo_legal(board, true);
    let snapshot = board.clone();
    let mover = board.white_to_move();
    let mut counts = Vec::with_capacity(moves.len());

    for mv in moves {
        board.make_move(&mv);
        if !board.is_in_check(mover) {
            counts.push((mv, perft(board, depth - 1)));
        }
        board.unmake_move(&snapshot);
    }

    counts
}
