//! HalChess - Move Generator Module
//!
//! This module handles the generation of chess moves, including all special
//! moves (castling, en passant, pawn promotion). Generation is pseudo-legal;
//! `generate_legal` filters the result with make/unmake and the attack test.

use crate::attacks::{
    is_square_attacked, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS,
    ROOK_DIRECTIONS,
};
use crate::board::{Board, Move};
use crate::types::*;

/// Generate all pseudo-legal moves for the side to move (may leave the king
/// in check). With `include_quiet == false` only captures, en passant and
/// capturing promotions are produced.
pub fn generate_pseudo_legal(board: &Board, include_quiet: bool) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    let white = board.white_to_move();

    for sq in board.piece_squares(white) {
        match board.piece_at(sq).kind {
            PieceKind::Pawn => generate_pawn_moves(board, sq, include_quiet, &mut moves),
            PieceKind::Knight => {
                generate_step_moves(board, sq, &KNIGHT_OFFSETS, include_quiet, &mut moves)
            }
            PieceKind::Bishop => {
                generate_sliding_moves(board, sq, &BISHOP_DIRECTIONS, include_quiet, &mut moves)
            }
            PieceKind::Rook => {
                generate_sliding_moves(board, sq, &ROOK_DIRECTIONS, include_quiet, &mut moves)
            }
            PieceKind::Queen => {
                generate_sliding_moves(board, sq, &QUEEN_DIRECTIONS, include_quiet, &mut moves)
            }
            PieceKind::King => {
                generate_step_moves(board, sq, &KING_OFFSETS, include_quiet, &mut moves);
                if include_quiet {
                    generate_castling_moves(board, sq, &mut moves);
                }
            }
            PieceKind::None => {}
        }
    }

    moves
}

/// Generate all legal moves for the side to move
pub fn generate_legal(board: &Board, include_quiet: bool) -> Vec<Move> {
    let white = board.white_to_move();
    let mut scratch = board.clone();

    generate_pseudo_legal(board, include_quiet)
        .into_iter()
        .filter(|mv| {
            scratch.make_move(mv);
            let legal = !scratch.is_in_check(white);
            scratch.unmake_move(board);
            legal
        })
        .collect()
}

/// Add a move to `target` unless it holds an own piece. Returns true if the
/// square was empty (a sliding ray may continue past it).
#[inline]
fn push_if_available(
    board: &Board,
    from: Square,
    target: Square,
    include_quiet: bool,
    moves: &mut Vec<Move>,
) -> bool {
    let piece = board.piece_at(target);
    if piece.is_none() {
        if include_quiet {
            moves.push(Move::new(from, target));
        }
        true
    } else {
        if piece.white != board.white_to_move() {
            moves.push(Move::new(from, target));
        }
        false
    }
}

/// Generate moves for sliding pieces (bishop, rook, queen)
fn generate_sliding_moves(
    board: &Board,
    sq: Square,
    directions: &[(i8, i8)],
    include_quiet: bool,
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in directions {
        let mut current = sq;
        while let Some(next) = current.offset(df, dr) {
            if !push_if_available(board, sq, next, include_quiet, moves) {
                break;
            }
            current = next;
        }
    }
}

/// Generate single-step moves (knight, king)
fn generate_step_moves(
    board: &Board,
    sq: Square,
    offsets: &[(i8, i8)],
    include_quiet: bool,
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in offsets {
        if let Some(target) = sq.offset(df, dr) {
            push_if_available(board, sq, target, include_quiet, moves);
        }
    }
}

/// Generate castling moves for the king on `sq`
fn generate_castling_moves(board: &Board, sq: Square, moves: &mut Vec<Move>) {
    let white = board.white_to_move();
    let rights = board.castling_rights();
    let (home, rank, kingside, queenside) = if white {
        (Square::E1, 0, rights.white_kingside, rights.white_queenside)
    } else {
        (Square::E8, 7, rights.black_kingside, rights.black_queenside)
    };

    if sq != home || !(kingside || queenside) {
        return;
    }
    if is_square_attacked(board, home, white) {
        return;
    }

    let rook = Piece::new(PieceKind::Rook, white);
    let empty = |file: u8| board.piece_at(Square::new(file, rank)).is_none();
    let safe = |file: u8| !is_square_attacked(board, Square::new(file, rank), white);

    // Kingside (O-O)
    if kingside
        && board.piece_at(Square::new(7, rank)) == rook
        && empty(5)
        && empty(6)
        && safe(5)
        && safe(6)
    {
        moves.push(Move::castling(
            home,
            Square::new(6, rank),
            Square::new(7, rank),
            Square::new(5, rank),
        ));
    }

    // Queenside (O-O-O)
    if queenside
        && board.piece_at(Square::new(0, rank)) == rook
        && empty(1)
        && empty(2)
        && empty(3)
        && safe(3)
        && safe(2)
    {
        moves.push(Move::castling(
            home,
            Square::new(2, rank),
            Square::new(0, rank),
            Square::new(3, rank),
        ));
    }
}

/// Generate pawn moves from the given square
fn generate_pawn_moves(board: &Board, sq: Square, include_quiet: bool, moves: &mut Vec<Move>) {
    let white = board.white_to_move();
    let (forward, start_rank, promo_rank) = if white { (1, 1, 7) } else { (-1, 6, 0) };

    // Pushes
    if include_quiet {
        if let Some(one) = sq.offset(0, forward) {
            if board.piece_at(one).is_none() {
                push_pawn_move(sq, one, promo_rank, white, moves);

                if sq.rank() == start_rank {
                    if let Some(two) = one.offset(0, forward) {
                        if board.piece_at(two).is_none() {
                            moves.push(Move::new(sq, two));
                        }
                    }
                }
            }
        }
    }

    // Captures
    for df in [-1, 1] {
        let Some(target) = sq.offset(df, forward) else {
            continue;
        };

        if board.piece_at(target).is_color(!white) {
            push_pawn_move(sq, target, promo_rank, white, moves);
        } else if board.en_passant() == Some(target) {
            let captured = Square::new(target.file(), sq.rank());
            moves.push(Move::en_passant(sq, target, captured));
        }
    }
}

/// Push a pawn move, fanning out to the four promotions on the last rank
#[inline]
fn push_pawn_move(from: Square, to: Square, promo_rank: u8, white: bool, moves: &mut Vec<Move>) {
    if to.rank() == promo_rank {
        for kind in PROMOTION_KINDS {
            moves.push(Move::promotion(from, to, Piece::new(kind, white)));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    fn legal(fen: &str) -> Vec<Move> {
        generate_legal(&Board::from_fen(fen).unwrap(), true)
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let board = Board::new();
        assert_eq!(generate_legal(&board, true).len(), 20);
        assert!(generate_pseudo_legal(&board, false).is_empty());
    }

    #[test]
    fn captures_only_mode() {
        let board =
            Board::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2")
                .unwrap();
        let captures = generate_pseudo_legal(&board, false);
        assert_eq!(captures, vec![Move::new(sq("e4"), sq("d5"))]);
    }

    #[test]
    fn promotion_fans_out_in_fixed_order() {
        let moves = legal("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let promotions: Vec<PieceKind> = moves
            .iter()
            .filter(|m| m.is_promotion())
            .map(|m| m.special_piece.kind)
            .collect();
        assert_eq!(promotions, PROMOTION_KINDS.to_vec());
    }

    #[test]
    fn en_passant_is_generated_as_a_special_capture() {
        let moves = legal("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let ep: Vec<&Move> = moves.iter().filter(|m| m.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].start, sq("e5"));
        assert_eq!(ep[0].end, sq("d6"));
        assert_eq!(ep[0].special_target, sq("d5"));
    }

    #[test]
    fn castling_both_sides_when_clear() {
        let moves = legal("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let castles: Vec<String> = moves
            .iter()
            .filter(|m| m.is_castling())
            .map(|m| m.notation())
            .collect();
        assert_eq!(castles, vec!["e1g1", "e1c1"]);
    }

    #[test]
    fn castling_rejected_when_blocked_or_attacked() {
        // Blocked by a knight on b1: queenside only needs b1 empty, not safe
        let moves = legal("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1");
        assert_eq!(moves.iter().filter(|m| m.is_castling()).count(), 1);

        // King in check
        let moves = legal("r3k2r/8/8/8/8/8/4r3/R3K2R w KQ - 0 1");
        assert!(moves.iter().all(|m| !m.is_castling()));

        // Passing through f1
        let moves = legal("r3k2r/8/8/8/8/8/5r2/R3K2R w KQ - 0 1");
        let castles: Vec<String> = moves
            .iter()
            .filter(|m| m.is_castling())
            .map(|m| m.notation())
            .collect();
        assert_eq!(castles, vec!["e1c1"]);

        // Landing on c1
        let moves = legal("r3k2r/8/8/8/8/8/2r5/R3K2R w KQ - 0 1");
        let castles: Vec<String> = moves
            .iter()
            .filter(|m| m.is_castling())
            .map(|m| m.notation())
            .collect();
        assert_eq!(castles, vec!["e1g1"]);

        // b1 attacked does not matter
        let moves = legal("r3k2r/8/8/8/8/8/1r6/R3K2R w KQ - 0 1");
        assert_eq!(moves.iter().filter(|m| m.is_castling()).count(), 2);
    }

    #[test]
    fn castling_needs_the_rook_at_home() {
        let moves = legal("4k3/8/8/8/8/8/8/4K2R w KQ - 0 1");
        let castles: Vec<String> = moves
            .iter()
            .filter(|m| m.is_castling())
            .map(|m| m.notation())
            .collect();
        assert_eq!(castles, vec!["e1g1"]);
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let moves = legal("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
        assert!(moves.iter().all(|m| m.start != sq("e2")));
    }

    #[test]
    fn no_moves_in_checkmate() {
        let board =
            Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(board.side_to_move_in_check());
        assert!(generate_legal(&board, true).is_empty());
    }
}
