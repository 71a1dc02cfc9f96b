//! HalChess - Position Evaluation Module
//!
//! This module provides static evaluation of chess positions considering:
//! - Material balance
//! - Piece positioning (piece-square tables, pawn and king tables blended by game phase)
//! - Mop-up: driving a lone king to the edge once a side is clearly ahead
//!
//! Scoring sits behind the `Evaluator` trait so the search can be handed a
//! different function.

use crate::board::{Board, Move};
use crate::types::*;

// ============================================================================
// PIECE VALUES
// ============================================================================

/// Indexed by `PieceKind as usize`
pub const PIECE_VALUES: [i32; 7] = [
    0,      // NONE
    20000,  // KING
    900,    // QUEEN
    500,    // ROOK
    330,    // BISHOP
    320,    // KNIGHT
    100,    // PAWN
];

#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind as usize]
}

/// Mop-up only kicks in above this material lead
const MOP_UP_MARGIN: i32 = 2 * PIECE_VALUES[PieceKind::Pawn as usize];

/// Non-pawn, non-king piece count at which the endgame begins
const ENDGAME_PIECE_COUNT: usize = 7;

// ============================================================================
// PIECE-SQUARE TABLES
// ============================================================================

// Pawn PST - encourages central control and advancement
const PAWN_PST: [i32; 64] = [
    0,   0,   0,   0,   0,   0,   0,   0,   // Rank 1
    5,  10,  10, -20, -20,  10,  10,   5,   // Rank 2
    5,  -5, -10,   0,   0, -10,  -5,   5,   // Rank 3
    0,   0,   0,  20,  20,   0,   0,   0,   // Rank 4
    5,   5,  10,  25,  25,  10,   5,   5,   // Rank 5
   10,  10,  20,  30,  30,  20,  10,  10,   // Rank 6
   50,  50,  50,  50,  50,  50,  50,  50,   // Rank 7
    0,   0,   0,   0,   0,   0,   0,   0,   // Rank 8
];

// Pawn endgame PST - pushing matters more than structure
const PAWN_ENDGAME_PST: [i32; 64] = [
    0,   0,   0,   0,   0,   0,   0,   0,
   10,  10,  10,  10,  10,  10,  10,  10,
   10,  10,  10,  10,  10,  10,  10,  10,
   20,  20,  20,  20,  20,  20,  20,  20,
   35,  35,  35,  35,  35,  35,  35,  35,
   60,  60,  60,  60,  60,  60,  60,  60,
   90,  90,  90,  90,  90,  90,  90,  90,
    0,   0,   0,   0,   0,   0,   0,   0,
];

const KNIGHT_PST: [i32; 64] = [
   -50, -40, -30, -30, -30, -30, -40, -50,
   -40, -20,   0,   5,   5,   0, -20, -40,
   -30,   5,  10,  15,  15,  10,   5, -30,
   -30,   0,  15,  20,  20,  15,   0, -30,
   -30,   5,  15,  20,  20,  15,   5, -30,
   -30,   0,  10,  15,  15,  10,   0, -30,
   -40, -20,   0,   0,   0,   0, -20, -40,
   -50, -40, -30, -30, -30, -30, -40, -50,
];

const BISHOP_PST: [i32; 64] = [
   -20, -10, -10, -10, -10, -10, -10, -20,
   -10,   5,   0,   0,   0,   0,   5, -10,
   -10,  10,  10,  10,  10,  10,  10, -10,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -10,   5,   5,  10,  10,   5,   5, -10,
   -10,   0,   5,  10,  10,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10, -10, -10, -10, -10, -20,
];

const ROOK_PST: [i32; 64] = [
    0,   0,   0,   5,   5,   0,   0,   0,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
    5,  10,  10,  10,  10,  10,  10,   5,
    0,   0,   0,   0,   0,   0,   0,   0,
];

const QUEEN_PST: [i32; 64] = [
   -20, -10, -10,  -5,  -5, -10, -10, -20,
   -10,   0,   5,   0,   0,   0,   0, -10,
   -10,   5,   5,   5,   5,   5,   0, -10,
     0,   0,   5,   5,   5,   5,   0,  -5,
    -5,   0,   5,   5,   5,   5,   0,  -5,
   -10,   0,   5,   5,   5,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10,  -5,  -5, -10, -10, -20,
];

// King middlegame PST - stay behind the pawns
const KING_MIDDLEGAME_PST: [i32; 64] = [
    20,  30,  10,   0,   0,  10,  30,  20,
    20,  20,   0,   0,   0,   0,  20,  20,
   -10, -20, -20, -20, -20, -20, -20, -10,
   -20, -30, -30, -40, -40, -30, -30, -20,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
];

// King endgame PST - walk to the centre
const KING_ENDGAME_PST: [i32; 64] = [
   -50, -30, -30, -30, -30, -30, -30, -50,
   -30, -30,   0,   0,   0,   0, -30, -30,
   -30, -10,  20,  30,  30,  20, -10, -30,
   -30, -10,  30,  40,  40,  30, -10, -30,
   -30, -10,  30,  40,  40,  30, -10, -30,
   -30, -10,  20,  30,  30,  20, -10, -30,
   -30, -20, -10,   0,   0, -10, -20, -30,
   -50, -40, -30, -20, -20, -30, -40, -50,
];

/// Manhattan distance to the nearest of d4, e4, d5, e5
const CENTER_MANHATTAN_DISTANCE: [i32; 64] = [
    6, 5, 4, 3, 3, 4, 5, 6,
    5, 4, 3, 2, 2, 3, 4, 5,
    4, 3, 2, 1, 1, 2, 3, 4,
    3, 2, 1, 0, 0, 1, 2, 3,
    3, 2, 1, 0, 0, 1, 2, 3,
    4, 3, 2, 1, 1, 2, 3, 4,
    5, 4, 3, 2, 2, 3, 4, 5,
    6, 5, 4, 3, 3, 4, 5, 6,
];

// ============================================================================
// EVALUATOR
// ============================================================================

/// A static scoring function
pub trait Evaluator {
    /// Score `board` from the side to move's point of view
    fn evaluate(&self, board: &Board, endgame_weight: f32) -> i32;
}

/// Material, piece-square tables and mop-up
#[derive(Clone, Copy, Debug, Default)]
pub struct PieceSquareEvaluator;

impl Evaluator for PieceSquareEvaluator {
    fn evaluate(&self, board: &Board, endgame_weight: f32) -> i32 {
        evaluate(board, endgame_weight)
    }
}

/// Game phase in [0, 1]: 0 while seven or more non-pawn, non-king pieces
/// remain on the board, then rising linearly as they come off.
pub fn endgame_weight(board: &Board) -> f32 {
    let count = board.count_non_pawn_pieces();
    if count < ENDGAME_PIECE_COUNT {
        1.0 - count as f32 / ENDGAME_PIECE_COUNT as f32
    } else {
        0.0
    }
}

#[inline]
fn lerp(middlegame: i32, endgame: i32, weight: f32) -> i32 {
    (middlegame as f32 + (endgame - middlegame) as f32 * weight) as i32
}

/// Positional bonus for `piece` standing on `sq`
fn square_bonus(piece: Piece, sq: Square, endgame_weight: f32) -> i32 {
    let index = sq.mirrored_table_index(piece.white);
    match piece.kind {
        PieceKind::Pawn => lerp(PAWN_PST[index], PAWN_ENDGAME_PST[index], endgame_weight),
        PieceKind::Knight => KNIGHT_PST[index],
        PieceKind::Bishop => BISHOP_PST[index],
        PieceKind::Rook => ROOK_PST[index],
        PieceKind::Queen => QUEEN_PST[index],
        PieceKind::King => lerp(
            KING_MIDDLEGAME_PST[index],
            KING_ENDGAME_PST[index],
            endgame_weight,
        ),
        PieceKind::None => 0,
    }
}

/// Material plus square bonuses for one side
fn side_material(board: &Board, white: bool, endgame_weight: f32) -> i32 {
    board
        .piece_squares(white)
        .iter()
        .map(|sq| {
            let piece = board.piece_at(sq);
            piece_value(piece.kind) + square_bonus(piece, sq, endgame_weight)
        })
        .sum()
}

/// Bonus for the side that is well ahead in the endgame: push the enemy king
/// away from the centre and bring the own king closer.
///
/// The king distance adds the two rank indices instead of subtracting them.
/// It is not a true Manhattan distance; engine strength was tuned with it.
pub(crate) fn mop_up(board: &Board, white: bool, own: i32, enemy: i32, endgame_weight: f32) -> i32 {
    if own <= enemy + MOP_UP_MARGIN || endgame_weight <= 0.0 {
        return 0;
    }

    let own_king = board.king_square(white);
    let enemy_king = board.king_square(!white);

    let center_distance = CENTER_MANHATTAN_DISTANCE[enemy_king.mirrored_table_index(!white)];
    let king_distance = (own_king.file() as i32 - enemy_king.file() as i32).abs()
        + (own_king.rank() as i32 + enemy_king.rank() as i32).abs();

    let bonus = 4.7 * center_distance as f32 + 1.6 * (14 - king_distance) as f32;
    (bonus * 10.0 * endgame_weight).round() as i32
}

/// Evaluate the position from the side to move's perspective
pub fn evaluate(board: &Board, endgame_weight: f32) -> i32 {
    let white = side_material(board, true, endgame_weight);
    let black = side_material(board, false, endgame_weight);
    let white_mop_up = mop_up(board, true, white, black, endgame_weight);
    let black_mop_up = mop_up(board, false, black, white, endgame_weight);

    let score = (white + white_mop_up) - (black + black_mop_up);
    if board.white_to_move() { score } else { -score }
}

/// Ordering score for a move: MVV-LVA for captures plus the promoted piece
pub fn move_score(board: &Board, mv: &Move) -> i32 {
    let mut score = 0;

    let victim = board.piece_at(mv.end);
    if victim.is_some() {
        let attacker = board.piece_at(mv.start);
        score += 10 * piece_value(victim.kind) - piece_value(attacker.kind);
    }

    if mv.is_promotion() {
        score += piece_value(mv.special_piece.kind);
    }

    score
}
