//! HalChess - Board Representation Module
//!
//! This module provides the position (`Board`) and move (`Move`) types. It
//! includes FEN parsing and generation, move execution, snapshot-based undo
//! and the read-only occupancy queries used by evaluation and draw checks.
//!
//! Undo works by value: callers clone the board before `make_move` and hand
//! the clone back to `unmake_move`. There is no per-move inverse.

use std::fmt;

use crate::attacks::is_square_attacked;
use crate::bitboard::SquareSet;
use crate::error::{ChessError, ChessResult};
use crate::types::*;
use crate::zobrist;

/// Starting position FEN
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Represents a chess move.
///
/// Plain moves only use `start` and `end`. Special moves carry a secondary
/// effect:
/// - promotion: `affects_piece`, `special_piece` is the new piece, `special_target == end`
/// - en passant: `affects_piece`, `special_piece` is `Piece::NONE`, `special_target`
///   is the captured pawn
/// - castling: `special_start`/`special_target` are the rook's origin and destination
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    pub is_special: bool,
    pub special_target: Square,
    pub affects_piece: bool,
    pub special_piece: Piece,
    pub special_start: Square,
}

impl Move {
    /// Create a plain move
    pub fn new(start: Square, end: Square) -> Self {
        Move {
            start,
            end,
            ..Move::default()
        }
    }

    /// Create a promotion move placing `piece` on `end`
    pub fn promotion(start: Square, end: Square, piece: Piece) -> Self {
        Move {
            start,
            end,
            is_special: true,
            special_target: end,
            affects_piece: true,
            special_piece: piece,
            special_start: Square::default(),
        }
    }

    /// Create an en passant capture removing the pawn on `captured`
    pub fn en_passant(start: Square, end: Square, captured: Square) -> Self {
        Move {
            start,
            end,
            is_special: true,
            special_target: captured,
            affects_piece: true,
            special_piece: Piece::NONE,
            special_start: Square::default(),
        }
    }

    /// Create a castling move; the rook travels from `rook_start` to `rook_end`
    pub fn castling(start: Square, end: Square, rook_start: Square, rook_end: Square) -> Self {
        Move {
            start,
            end,
            is_special: true,
            special_target: rook_end,
            affects_piece: false,
            special_piece: Piece::NONE,
            special_start: rook_start,
        }
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.is_special && self.affects_piece && self.special_piece.is_some()
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.is_special && self.affects_piece && self.special_piece.is_none()
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        self.is_special && !self.affects_piece
    }

    /// Long algebraic notation (e.g., "e2e4", "e7e8q")
    pub fn notation(&self) -> String {
        let mut text = format!("{}{}", self.start, self.end);
        if self.is_promotion() {
            if let Some(c) = Piece::new(self.special_piece.kind, false).to_fen_char() {
                text.push(c);
            }
        }
        text
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}

/// The four castling rights. Rights are only ever revoked by moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    /// Rights left after `mv`: touching a rook corner (as start or end) drops
    /// that side's right, moving off a king home square drops both of them.
    pub fn after_move(self, mv: &Move) -> CastlingRights {
        let touches = |sq: Square| mv.start == sq || mv.end == sq;
        let mut rights = self;

        if touches(Square::H1) {
            rights.white_kingside = false;
        }
        if touches(Square::A1) {
            rights.white_queenside = false;
        }
        if mv.start == Square::E1 {
            rights.white_kingside = false;
            rights.white_queenside = false;
        }

        if touches(Square::H8) {
            rights.black_kingside = false;
        }
        if touches(Square::A8) {
            rights.black_queenside = false;
        }
        if mv.start == Square::E8 {
            rights.black_kingside = false;
            rights.black_queenside = false;
        }

        rights
    }

    pub fn is_empty(&self) -> bool {
        !(self.white_kingside
            || self.white_queenside
            || self.black_kingside
            || self.black_queenside)
    }
}

/// Chess position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// 64-element array representing the board (0=a1, 1=b1, ..., 63=h8)
    squares: [Piece; 64],
    white_to_move: bool,
    castling: CastlingRights,
    /// Square a pawn may capture onto en passant this ply
    en_passant: Option<Square>,
    white_king: Square,
    black_king: Square,
    white_pieces: SquareSet,
    black_pieces: SquareSet,
    /// Zobrist hash, kept in step with every mutation
    hash: u64,
}

impl Board {
    /// Create a new board with the starting position
    pub fn new() -> Self {
        Board::from_fen(STARTING_FEN).expect("starting FEN is well formed")
    }

    /// Create a board from a FEN string.
    ///
    /// The four leading fields (placement, side, castling, en passant) are
    /// required; move counters are accepted and ignored.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().ok_or(ChessError::MissingField { field: "piece placement" })?;
        let side = parts.next().ok_or(ChessError::MissingField { field: "side to move" })?;
        let castling = parts.next().ok_or(ChessError::MissingField { field: "castling" })?;
        let en_passant = parts.next().ok_or(ChessError::MissingField { field: "en passant" })?;

        let mut squares = [Piece::NONE; 64];

        // Parse piece placement, rank 8 first
        let ranks: Vec<&str> = placement.split('/').collect();
        for (i, rank_text) in ranks.iter().enumerate() {
            if i >= 8 {
                return Err(ChessError::BadRank { rank: 8usize.saturating_sub(i) });
            }
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as u8;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if file >= 8 {
                        return Err(ChessError::BadRank { rank: rank as usize + 1 });
                    }
                    squares[Square::new(file, rank).index()] = piece;
                    file += 1;
                } else {
                    return Err(ChessError::InvalidPiece { character: c });
                }
                if file > 8 {
                    return Err(ChessError::BadRank { rank: rank as usize + 1 });
                }
            }
            if file != 8 {
                return Err(ChessError::BadRank { rank: rank as usize + 1 });
            }
        }
        if ranks.len() != 8 {
            return Err(ChessError::BadRank { rank: 8 - ranks.len().min(8) });
        }

        // Parse active color
        let white_to_move = match side {
            "w" => true,
            "b" => false,
            other => return Err(ChessError::InvalidSideToMove { value: other.to_string() }),
        };

        // Parse castling rights
        let mut rights = CastlingRights::default();
        if castling != "-" {
            for c in castling.chars() {
                match c {
                    'K' => rights.white_kingside = true,
                    'Q' => rights.white_queenside = true,
                    'k' => rights.black_kingside = true,
                    'q' => rights.black_queenside = true,
                    other => return Err(ChessError::InvalidCastling { character: other }),
                }
            }
        }

        // Parse en passant square. It must sit behind an enemy pawn that has
        // just made a double push.
        let en_passant = if en_passant == "-" {
            None
        } else {
            let (target_rank, pawn_rank) = if white_to_move { (5, 4) } else { (2, 3) };
            let pushed_pawn = Piece::new(PieceKind::Pawn, !white_to_move);
            match Square::parse(en_passant) {
                Some(sq)
                    if sq.rank() == target_rank
                        && squares[Square::new(sq.file(), pawn_rank).index()] == pushed_pawn =>
                {
                    Some(sq)
                }
                _ => {
                    return Err(ChessError::InvalidEnPassant {
                        value: en_passant.to_string(),
                    })
                }
            }
        };

        let mut white_pieces = SquareSet::EMPTY;
        let mut black_pieces = SquareSet::EMPTY;
        let mut white_kings = Vec::new();
        let mut black_kings = Vec::new();
        for (index, piece) in squares.iter().enumerate() {
            if piece.is_none() {
                continue;
            }
            let sq = Square::from_index(index);
            if piece.white {
                white_pieces.insert(sq);
            } else {
                black_pieces.insert(sq);
            }
            if piece.kind == PieceKind::King {
                if piece.white {
                    white_kings.push(sq);
                } else {
                    black_kings.push(sq);
                }
            }
        }
        if white_kings.len() != 1 {
            return Err(ChessError::KingCount { color: "white" });
        }
        if black_kings.len() != 1 {
            return Err(ChessError::KingCount { color: "black" });
        }

        let mut board = Board {
            squares,
            white_to_move,
            castling: rights,
            en_passant,
            white_king: white_kings[0],
            black_king: black_kings[0],
            white_pieces,
            black_pieces,
            hash: 0,
        };
        board.hash = zobrist::full_hash(&board);

        Ok(board)
    }

    /// Generate FEN string from current board state
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        // Piece placement
        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                match self.piece_at(Square::new(file, rank)).to_fen_char() {
                    None => empty_count += 1,
                    Some(c) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(c);
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        // Active color
        fen.push(' ');
        fen.push(if self.white_to_move { 'w' } else { 'b' });

        // Castling rights
        fen.push(' ');
        if self.castling.is_empty() {
            fen.push('-');
        } else {
            if self.castling.white_kingside {
                fen.push('K');
            }
            if self.castling.white_queenside {
                fen.push('Q');
            }
            if self.castling.black_kingside {
                fen.push('k');
            }
            if self.castling.black_queenside {
                fen.push('q');
            }
        }

        // En passant
        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.name()),
            None => fen.push('-'),
        }

        fen.push_str(" 0 1");
        fen
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Squares holding a piece of the given colour
    #[inline]
    pub fn piece_squares(&self, white: bool) -> SquareSet {
        if white { self.white_pieces } else { self.black_pieces }
    }

    #[inline]
    pub fn king_square(&self, white: bool) -> Square {
        if white { self.white_king } else { self.black_king }
    }

    /// Number of pieces on the board, kings included
    #[inline]
    pub fn total_piece_count(&self) -> usize {
        self.white_pieces.len() + self.black_pieces.len()
    }

    /// Pieces of both colours that are neither pawns nor kings (game phase)
    pub fn count_non_pawn_pieces(&self) -> usize {
        self.white_pieces
            .iter()
            .chain(self.black_pieces.iter())
            .filter(|&sq| !matches!(self.piece_at(sq).kind, PieceKind::Pawn | PieceKind::King))
            .count()
    }

    /// Is the king of the given colour attacked
    pub fn is_in_check(&self, white: bool) -> bool {
        is_square_attacked(self, self.king_square(white), white)
    }

    /// Is the side to move in check
    pub fn side_to_move_in_check(&self) -> bool {
        self.is_in_check(self.white_to_move)
    }

    /// En passant target created by `mv`, read from the pre-move position
    pub(crate) fn en_passant_after(&self, mv: &Move) -> Option<Square> {
        if self.piece_at(mv.start).kind != PieceKind::Pawn {
            return None;
        }
        match (mv.start.rank(), mv.end.rank()) {
            (1, 3) => Some(Square::new(mv.start.file(), 2)),
            (6, 4) => Some(Square::new(mv.start.file(), 5)),
            _ => None,
        }
    }

    /// Execute a move on the board.
    ///
    /// The order matters: the hash and the castling/en passant updates are all
    /// derived from the pre-move state before the grid changes.
    pub fn make_move(&mut self, mv: &Move) {
        let next_hash = zobrist::hash_after(self.hash, mv, self);
        self.hash = next_hash;

        let piece = self.piece_at(mv.start);
        let captured = self.piece_at(mv.end);
        debug_assert!(piece.is_some(), "no piece on {}", mv.start);

        // Occupancy and king squares
        let (own, enemy) = if piece.white {
            (&mut self.white_pieces, &mut self.black_pieces)
        } else {
            (&mut self.black_pieces, &mut self.white_pieces)
        };
        own.remove(mv.start);
        own.insert(mv.end);
        if captured.is_some() {
            enemy.remove(mv.end);
        }
        if mv.is_special {
            if mv.affects_piece {
                if mv.special_piece.is_none() {
                    enemy.remove(mv.special_target);
                }
            } else {
                own.remove(mv.special_start);
                own.insert(mv.special_target);
            }
        }
        if piece.kind == PieceKind::King {
            if piece.white {
                self.white_king = mv.end;
            } else {
                self.black_king = mv.end;
            }
        }

        // Castling rights and en passant
        self.castling = self.castling.after_move(mv);
        self.en_passant = self.en_passant_after(mv);

        // Move the piece
        self.squares[mv.end.index()] = piece;
        self.squares[mv.start.index()] = Piece::NONE;
        self.white_to_move = !self.white_to_move;

        // Secondary effect of special moves
        if mv.is_special {
            if mv.affects_piece {
                self.squares[mv.special_target.index()] = mv.special_piece;
            } else {
                let rook = self.piece_at(mv.special_start);
                self.squares[mv.special_target.index()] = rook;
                self.squares[mv.special_start.index()] = Piece::NONE;
            }
        }

        debug_assert_eq!(self.hash, zobrist::full_hash(self), "hash desync after {}", mv);
    }

    /// Restore the position saved before `make_move`, hash included
    #[inline]
    pub fn unmake_move(&mut self, snapshot: &Board) {
        self.clone_from(snapshot);
    }

    /// Display the board as a string
    pub fn display(&self) -> String {
        let mut lines = Vec::new();
        lines.push("  +---+---+---+---+---+---+---+---+".to_string());

        for rank in (0..8).rev() {
            let mut row = format!("{} |", rank + 1);
            for file in 0..8 {
                match self.piece_at(Square::new(file, rank)).to_fen_char() {
                    Some(c) => row.push_str(&format!(" {} |", c)),
                    None => row.push_str("   |"),
                }
            }
            lines.push(row);
            lines.push("  +---+---+---+---+---+---+---+---+".to_string());
        }
        lines.push("    a   b   c   d   e   f   g   h".to_string());

        lines.join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
