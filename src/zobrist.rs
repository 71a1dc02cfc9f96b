//! HalChess - Zobrist Hashing Module
//!
//! Position keys for the transposition and repetition tables. The key table
//! is built once per process from a fixed seed, so hashes are reproducible
//! between runs.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, CastlingRights, Move};
use crate::types::*;

const SEED: u64 = 902_756_003;

pub struct ZobristKeys {
    /// Indexed by square, then `Piece::zobrist_index`
    pub pieces: [[u64; 12]; 64],
    /// XORed in when white is to move
    pub white_to_move: u64,
    /// White kingside, white queenside, black kingside, black queenside
    pub castling: [u64; 4],
    /// En passant target file
    pub en_passant: [u64; 8],
}

static KEYS: Lazy<ZobristKeys> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut pieces = [[0u64; 12]; 64];
    for square in pieces.iter_mut() {
        for key in square.iter_mut() {
            *key = rng.gen();
        }
    }
    let white_to_move = rng.gen();
    let castling = [rng.gen(), rng.gen(), rng.gen(), rng.gen()];
    let mut en_passant = [0u64; 8];
    for key in en_passant.iter_mut() {
        *key = rng.gen();
    }
    ZobristKeys {
        pieces,
        white_to_move,
        castling,
        en_passant,
    }
});

/// Process-wide key table
#[inline]
pub fn keys() -> &'static ZobristKeys {
    &KEYS
}

#[inline]
fn piece_key(sq: Square, piece: Piece) -> u64 {
    keys().pieces[sq.index()][piece.zobrist_index()]
}

fn castling_key(board: &Board) -> u64 {
    castling_key_of(board.castling_rights())
}

fn castling_key_of(rights: CastlingRights) -> u64 {
    let k = &keys().castling;
    let mut hash = 0;
    if rights.white_kingside {
        hash ^= k[0];
    }
    if rights.white_queenside {
        hash ^= k[1];
    }
    if rights.black_kingside {
        hash ^= k[2];
    }
    if rights.black_queenside {
        hash ^= k[3];
    }
    hash
}

#[inline]
fn en_passant_key(target: Option<Square>) -> u64 {
    target.map_or(0, |sq| keys().en_passant[sq.file() as usize])
}

/// Hash of a position computed from scratch
pub fn full_hash(board: &Board) -> u64 {
    let mut hash = 0u64;

    for white in [true, false] {
        for sq in board.piece_squares(white) {
            hash ^= piece_key(sq, board.piece_at(sq));
        }
    }

    if board.white_to_move() {
        hash ^= keys().white_to_move;
    }
    hash ^= castling_key(board);
    hash ^= en_passant_key(board.en_passant());

    hash
}

/// Hash of the position reached by playing `mv` on `before`, whose hash is `hash`.
///
/// Castling and en passant state come from the same helpers `make_move` uses.
pub fn hash_after(hash: u64, mv: &Move, before: &Board) -> u64 {
    let mut hash = hash;
    let piece = before.piece_at(mv.start);
    let captured = before.piece_at(mv.end);

    hash ^= piece_key(mv.start, piece);
    hash ^= piece_key(mv.end, piece);
    if captured.is_some() {
        hash ^= piece_key(mv.end, captured);
    }

    if mv.is_special {
        if mv.affects_piece {
            let replaced = if mv.special_target == mv.end {
                piece
            } else {
                before.piece_at(mv.special_target)
            };
            if replaced.is_some() {
                hash ^= piece_key(mv.special_target, replaced);
            }
            if mv.special_piece.is_some() {
                hash ^= piece_key(mv.special_target, mv.special_piece);
            }
        } else {
            let rook = before.piece_at(mv.special_start);
            hash ^= piece_key(mv.special_start, rook);
            hash ^= piece_key(mv.special_target, rook);
        }
    }

    hash ^= keys().white_to_move;

    hash ^= castling_key(before);
    hash ^= castling_key_of(before.castling_rights().after_move(mv));

    hash ^= en_passant_key(before.en_passant());
    hash ^= en_passant_key(before.en_passant_after(mv));

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_stable_and_distinct() {
        let k = keys();
        assert_eq!(k.pieces[0][0], keys().pieces[0][0]);
        assert_ne!(k.pieces[0][0], k.pieces[0][1]);
        assert_ne!(k.white_to_move, 0);
        assert_ne!(k.castling[0], k.castling[1]);
    }

    #[test]
    fn side_to_move_changes_the_hash() {
        let white = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let black = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(white.hash() ^ black.hash(), keys().white_to_move);
    }

    #[test]
    fn incremental_hash_matches_full_hash_for_special_moves() {
        let cases = [
            // castling both ways
            (
                "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
                Move::castling(Square::E1, Square::G1, Square::H1, Square::F1),
            ),
            (
                "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1",
                Move::castling(Square::E8, Square::C8, Square::A8, Square::D8),
            ),
            // en passant
            (
                "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
                Move::en_passant(
                    Square::parse("e5").unwrap(),
                    Square::parse("d6").unwrap(),
                    Square::parse("d5").unwrap(),
                ),
            ),
            // capture promotion onto a rook corner
            (
                "r3k3/1P6/8/8/8/8/8/4K3 w q - 0 1",
                Move::promotion(
                    Square::parse("b7").unwrap(),
                    Square::A8,
                    Piece::new(PieceKind::Queen, true),
                ),
            ),
            // double push
            (
                "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
                Move::new(Square::parse("e2").unwrap(), Square::parse("e4").unwrap()),
            ),
        ];

        for (fen, mv) in cases {
            let board = Board::from_fen(fen).unwrap();
            let incremental = hash_after(board.hash(), &mv, &board);
            let mut played = board.clone();
            played.make_move(&mv);
            assert_eq!(incremental, full_hash(&played), "{} {}", fen, mv);
            assert_eq!(played.hash(), incremental);
        }
    }
}
