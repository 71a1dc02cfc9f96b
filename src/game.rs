//! HalChess - Game Module
//!
//! `Game` is the entry point for front ends: it owns the current position,
//! the repetition history of the game actually played and the search engine,
//! and reports the game status after every move.

use std::fmt;

use log::{debug, info};

use crate::board::{Board, Move};
use crate::config::EngineConfig;
use crate::error::ChessResult;
use crate::move_generator::generate_legal;
use crate::repetition::RepetitionTable;
use crate::search::SearchEngine;
use crate::types::{PieceKind, Square};

/// State of the game after the last move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { white_wins: bool },
    Stalemate,
    ThreefoldRepetition,
    InsufficientMaterial,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        *self != GameStatus::Ongoing
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Checkmate { white_wins: true } => write!(f, "checkmate, white wins"),
            GameStatus::Checkmate { white_wins: false } => write!(f, "checkmate, black wins"),
            GameStatus::Stalemate => write!(f, "draw by stalemate"),
            GameStatus::ThreefoldRepetition => write!(f, "draw by threefold repetition"),
            GameStatus::InsufficientMaterial => write!(f, "draw by insufficient material"),
        }
    }
}

pub struct Game {
    config: EngineConfig,
    board: Board,
    /// Legal moves of `board`, refreshed after every ply
    legal_moves: Vec<Move>,
    repetitions: RepetitionTable,
    engine: SearchEngine,
    status: GameStatus,
    moves_played: Vec<Move>,
}

impl Game {
    /// New game from the starting position
    pub fn new(config: EngineConfig) -> Self {
        let engine = SearchEngine::new(&config);
        let mut game = Game {
            config,
            board: Board::new(),
            legal_moves: Vec::new(),
            repetitions: RepetitionTable::new(),
            engine,
            status: GameStatus::Ongoing,
            moves_played: Vec::new(),
        };
        game.reset_to(Board::new());
        game
    }

    /// Back to the starting position; clears the transposition table
    pub fn new_game(&mut self) {
        self.reset_to(Board::new());
    }

    /// Start a game from `fen`. On error the current game is left untouched.
    pub fn load_fen(&mut self, fen: &str) -> ChessResult<()> {
        let board = Board::from_fen(fen)?;
        self.reset_to(board);
        Ok(())
    }

    fn reset_to(&mut self, board: Board) {
        self.board = board;
        self.repetitions.clear();
        self.repetitions.add(self.board.hash());
        self.engine.clear();
        self.moves_played.clear();
        self.refresh();
        info!("new game: {}", self.board.to_fen());
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Moves played since the game started, oldest first
    pub fn moves_played(&self) -> &[Move] {
        &self.moves_played
    }

    pub fn is_engine_turn(&self) -> bool {
        !self.status.is_over() && self.board.white_to_move() == self.config.engine_is_white
    }

    /// Look up the legal move going from `start` to `end`. For promotions
    /// `promotion` picks the piece (queen when `None`); it is ignored otherwise.
    pub fn find_legal_move(
        &self,
        start: Square,
        end: Square,
        promotion: Option<PieceKind>,
    ) -> Option<Move> {
        let wanted = promotion.unwrap_or(PieceKind::Queen);
        self.legal_moves
            .iter()
            .find(|mv| {
                mv.start == start
                    && mv.end == end
                    && (!mv.is_promotion() || mv.special_piece.kind == wanted)
            })
            .copied()
    }

    /// Play `mv` if it is legal here. Returns the resulting status, or `None`
    /// when the move was rejected (illegal, or the game is already over).
    pub fn apply_move(&mut self, mv: &Move) -> Option<GameStatus> {
        if self.status.is_over() || !self.legal_moves.contains(mv) {
            debug!("rejected move {}", mv);
            return None;
        }

        let side = if self.board.white_to_move() { "white" } else { "black" };
        self.board.make_move(mv);
        self.repetitions.add(self.board.hash());
        self.moves_played.push(*mv);
        self.refresh();

        info!("{} plays {} ({})", side, mv, self.status);
        debug!("\n{}", self.board);

        Some(self.status)
    }

    /// Search the current position for `seconds`. `None` once the game is over.
    pub fn request_best_move(&mut self, seconds: f64) -> Option<Move> {
        if self.status.is_over() {
            return None;
        }
        self.engine
            .iterative_deepen(&self.board, &self.repetitions, seconds)
            .best_move
    }

    /// Let the engine search with the configured time and play its choice
    pub fn play_engine_move(&mut self) -> Option<GameStatus> {
        let mv = self.request_best_move(self.config.search_seconds as f64)?;
        self.apply_move(&mv)
    }

    fn refresh(&mut self) {
        self.legal_moves = generate_legal(&self.board, true);
        self.status = self.compute_status();
    }

    fn compute_status(&self) -> GameStatus {
        if self.legal_moves.is_empty() {
            return if self.board.side_to_move_in_check() {
                GameStatus::Checkmate { white_wins: !self.board.white_to_move() }
            } else {
                GameStatus::Stalemate
            };
        }
        if self.repetitions.count(self.board.hash()) >= 3 {
            return GameStatus::ThreefoldRepetition;
        }
        if self.board.total_piece_count() == 2 {
            return GameStatus::InsufficientMaterial;
        }
        GameStatus::Ongoing
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new(EngineConfig::default())
    }
}
