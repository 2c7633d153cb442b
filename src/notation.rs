//! Square names and move names.
//!
//! Squares are named by file and rank (`b8`, `d8`, ... `g1`) in index order.

use crate::board::Board;
use crate::error::{EngineError, EngineResult};
use crate::state::{legal_moves, Move};
use crate::topology::SQUARES;

const SQUARE_NAMES: [&str; SQUARES as usize] = [
    "b8", "d8", "f8", "h8", //
    "a7", "c7", "e7", "g7", //
    "b6", "d6", "f6", "h6", //
    "a5", "c5", "e5", "g5", //
    "b4", "d4", "f4", "h4", //
    "a3", "c3", "e3", "g3", //
    "b2", "d2", "f2", "h2", //
    "a1", "c1", "e1", "g1", //
];

/// # Panics
/// When `square` is not a playable square index.
#[inline]
pub fn square_name(square: u8) -> &'static str {
    assert!(square < SQUARES, "invalid square index {square}");
    SQUARE_NAMES[square as usize]
}

/// Index of a square name, `None` for light squares and anything malformed.
pub fn try_parse_square(name: &str) -> Option<u8> {
    SQUARE_NAMES
        .iter()
        .position(|n| *n == name)
        .and_then(|i| u8::try_from(i).ok())
}

/// # Panics
/// When `name` is not one of the 32 square names.
pub fn parse_square(name: &str) -> u8 {
    match try_parse_square(name) {
        Some(sq) => sq,
        None => panic!("invalid square name '{name}'"),
    }
}

/// Name of the ply that turns `board` into `target`.
///
/// Fails with [`EngineError::MoveNotFound`] when `target` is not reachable in one ply.
pub fn name_of_move(board: &Board, target: &Board) -> EngineResult<String> {
    legal_moves(board)
        .iter()
        .find(|m| m.board == *target)
        .map(Move::name)
        .ok_or(EngineError::MoveNotFound)
}

/// Legal move with the given name, e.g. `c3-d4` or `c3:e5:g7`.
pub fn find_move(board: &Board, name: &str) -> EngineResult<Move> {
    let wanted = name.trim();
    legal_moves(board)
        .into_iter()
        .find(|m| m.name() == wanted)
        .ok_or_else(|| EngineError::UnknownMove(wanted.to_string()))
}
