//! HalChess - Type definitions and constants
//!
//! This module provides the core type definitions for representing chess
//! pieces and squares, plus the notation helpers used by FEN parsing and
//! move display.

use std::fmt;

/// Piece classes. The discriminants are stable and index the Zobrist table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PieceKind {
    #[default]
    None = 0,
    King = 1,
    Queen = 2,
    Rook = 3,
    Bishop = 4,
    Knight = 5,
    Pawn = 6,
}

/// Promotion targets in generation order
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// A piece on the board. `Piece::NONE` is the only representation of an empty square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Piece {
    pub kind: PieceKind,
    pub white: bool,
}

impl Piece {
    pub const NONE: Piece = Piece { kind: PieceKind::None, white: false };

    pub const fn new(kind: PieceKind, white: bool) -> Self {
        Piece { kind, white }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.kind == PieceKind::None
    }

    #[inline]
    pub fn is_some(&self) -> bool {
        self.kind != PieceKind::None
    }

    /// True if this is a piece belonging to the given side
    #[inline]
    pub fn is_color(&self, white: bool) -> bool {
        self.is_some() && self.white == white
    }

    /// Index into the 12 piece/colour Zobrist slots (white first)
    #[inline]
    pub fn zobrist_index(&self) -> usize {
        debug_assert!(self.is_some());
        (self.kind as usize - 1) + if self.white { 0 } else { 6 }
    }

    /// FEN piece character to piece
    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => return None,
        };
        Some(Piece::new(kind, c.is_ascii_uppercase()))
    }

    /// Piece to FEN character
    pub fn to_fen_char(&self) -> Option<char> {
        let c = match self.kind {
            PieceKind::None => return None,
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        Some(if self.white { c.to_ascii_uppercase() } else { c })
    }
}

/// File and rank names for square notation
pub const FILE_NAMES: &[u8; 8] = b"abcdefgh";
pub const RANK_NAMES: &[u8; 8] = b"12345678";

/// A board square, stored as `rank * 8 + file` (0=a1, 1=b1, ..., 63=h8)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);

    /// Build a square from file and rank, both 0..8
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Square(rank * 8 + file)
    }

    /// Build a square from a raw 0..64 index
    #[inline]
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < 64);
        Square(index as u8)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Step by a (file, rank) delta, `None` if that leaves the board
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Index into a piece-square table. Tables are written from white's point
    /// of view with a1 first; black reads them mirrored vertically.
    #[inline]
    pub fn mirrored_table_index(self, white: bool) -> usize {
        if white {
            self.index()
        } else {
            (7 - self.rank() as usize) * 8 + self.file() as usize
        }
    }

    /// Parse algebraic notation (e.g., "e4")
    pub fn parse(name: &str) -> Option<Self> {
        let bytes = name.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match bytes[0] {
            b'a'..=b'h' => bytes[0] - b'a',
            _ => return None,
        };
        let rank = match bytes[1] {
            b'1'..=b'8' => bytes[1] - b'1',
            _ => return None,
        };
        Some(Square::new(file, rank))
    }

    /// Algebraic notation (e.g., "e4")
    pub fn name(self) -> String {
        format!(
            "{}{}",
            FILE_NAMES[self.file() as usize] as char,
            RANK_NAMES[self.rank() as usize] as char
        )
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
