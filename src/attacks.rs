//! HalChess - Attack Detection Module
//!
//! Square attack queries. `is_square_attacked` is the only legality test in
//! the engine: a move is legal exactly when the mover's king is not attacked
//! after it has been made.

use crate::board::Board;
use crate::types::*;

/// Direction deltas as (file, rank) steps
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1), (0, -1), (-1, 0), (1, 0),
    (-1, 1), (1, 1), (1, -1), (-1, -1),
];
pub const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRECTIONS;
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2), (-1, 2), (2, 1), (-2, 1),
    (2, -1), (-2, -1), (1, -2), (-1, -2),
];

/// True if stepping `(df, dr)` from `sq` would leave the board
#[inline]
pub fn is_over_edge(sq: Square, df: i8, dr: i8) -> bool {
    sq.offset(df, dr).is_none()
}

/// Is `sq` attacked by the side opposite to `king_white`
pub fn is_square_attacked(board: &Board, sq: Square, king_white: bool) -> bool {
    let enemy = !king_white;

    // Sliding piece attacks (rook, queen)
    for &(df, dr) in &ROOK_DIRECTIONS {
        if first_on_ray(board, sq, df, dr, enemy, PieceKind::Rook) {
            return true;
        }
    }

    // Sliding piece attacks (bishop, queen)
    for &(df, dr) in &BISHOP_DIRECTIONS {
        if first_on_ray(board, sq, df, dr, enemy, PieceKind::Bishop) {
            return true;
        }
    }

    if any_at_offsets(board, sq, &KNIGHT_OFFSETS, enemy, PieceKind::Knight) {
        return true;
    }
    if any_at_offsets(board, sq, &KING_OFFSETS, enemy, PieceKind::King) {
        return true;
    }

    // Enemy pawns sit one rank towards their own side of the target
    let dr = if enemy { -1 } else { 1 };
    any_at_offsets(board, sq, &[(-1, dr), (1, dr)], enemy, PieceKind::Pawn)
}

/// Walk a ray until the first occupant; true if it is an enemy `slider` or queen
fn first_on_ray(
    board: &Board,
    from: Square,
    df: i8,
    dr: i8,
    enemy: bool,
    slider: PieceKind,
) -> bool {
    let mut current = from;
    while let Some(next) = current.offset(df, dr) {
        let piece = board.piece_at(next);
        if piece.is_some() {
            return piece.white == enemy
                && (piece.kind == slider || piece.kind == PieceKind::Queen);
        }
        current = next;
    }
    false
}

fn any_at_offsets(
    board: &Board,
    from: Square,
    offsets: &[(i8, i8)],
    enemy: bool,
    kind: PieceKind,
) -> bool {
    offsets.iter().any(|&(df, dr)| {
        from.offset(df, dr)
            .map(|sq| board.piece_at(sq) == Piece::new(kind, enemy))
            .unwrap_or(false)
    })
}
