//! HalChess - Chess Engine Core
//!
//! A single-threaded chess engine written in Rust with support for:
//! - Full FIDE move rules (castling, en passant, promotion)
//! - FEN position loading and output
//! - Incremental Zobrist hashing
//! - Direct-mapped transposition table
//! - Iterative-deepening alpha-beta search with quiescence
//! - Threefold repetition, stalemate and bare-kings draw detection
//!
//! Front ends drive the engine through [`game::Game`].

pub mod types;
pub mod bitboard;
pub mod error;
pub mod board;
pub mod attacks;
pub mod move_generator;
pub mod zobrist;
pub mod transposition;
pub mod repetition;
pub mod evaluation;
pub mod search;
pub mod perft;
pub mod config;
pub mod game;

pub use board::{Board, Move, STARTING_FEN};
pub use config::EngineConfig;
pub use error::{ChessError, ChessResult};
pub use game::{Game, GameStatus};
pub use search::{SearchEngine, SearchResult};
