#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited

pub mod types;
pub mod topology;
pub mod board;
pub mod state;
pub mod notation;
pub mod error;
pub mod config;
pub mod rng;
pub mod game;

pub mod engine {
    pub mod movegen;
    pub mod score;
}

pub mod search;

// Re-exports: stable minimal API surface for external callers
pub use crate::board::Board;
pub use crate::config::{load_config_from_json, EngineConfig};
pub use crate::engine::score::{material, score};
pub use crate::error::{EngineError, EngineResult};
pub use crate::game::{play_selfplay, Game, GameRecord, Phase};
pub use crate::notation::{find_move, name_of_move, parse_square, square_name, try_parse_square};
pub use crate::rng::rng_for_ply;
pub use crate::search::{
    best_move, best_random_move, goodness, BestMove, RatedMove, SearchConfig, SearchOutcome, SearchStats, Searcher,
    WIN_SCORE,
};
pub use crate::state::{is_terminal, legal_moves, status, GameStatus, LegalMoves, Move, MovePath};
pub use crate::types::{Color, Dir, Piece};
