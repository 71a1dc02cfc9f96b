//! Error types for the engine
//!
//! The only recoverable failure in the core is malformed input: a FEN string
//! that cannot be turned into a position. Illegal move requests are reported
//! with `Option::None`, and running out of search time is ordinary control flow.

use thiserror::Error;

/// Errors that can occur when loading a position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// FEN is missing one of its four mandatory fields
    #[error("FEN is missing the {field} field")]
    MissingField { field: &'static str },

    /// Unexpected character in the piece placement field
    #[error("invalid piece placement character '{character}'")]
    InvalidPiece { character: char },

    /// A rank does not describe exactly eight squares, or there are not eight ranks
    #[error("piece placement has a malformed rank {rank}")]
    BadRank { rank: usize },

    /// Side to move is neither `w` nor `b`
    #[error("invalid side to move '{value}'")]
    InvalidSideToMove { value: String },

    /// Castling field contains something other than `KQkq` or `-`
    #[error("invalid castling character '{character}'")]
    InvalidCastling { character: char },

    /// En passant field is not `-` or the square behind an enemy pawn that just double-pushed
    #[error("invalid en passant square '{value}'")]
    InvalidEnPassant { value: String },

    /// One of the sides has no king, or more than one
    #[error("position must contain exactly one {color} king")]
    KingCount { color: &'static str },
}

/// Result type alias for engine operations
pub type ChessResult<T> = Result<T, ChessError>;
