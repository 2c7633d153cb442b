use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::engine::movegen;
use crate::notation::square_name;
use crate::types::Color;

/// Longest path a single ply can record: the start square plus one landing
/// square per captured piece (a side never has more than 12).
pub const MAX_PATH: usize = 16;

/// Squares visited by one ply, in order. Simple moves have two entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovePath {
    squares: [u8; MAX_PATH],
    len: u8,
    capture: bool,
}

impl MovePath {
    /// Path of a capture chain that has not jumped yet.
    #[inline]
    pub fn start(from: u8) -> Self {
        let mut squares = [0u8; MAX_PATH];
        squares[0] = from;
        Self {
            squares,
            len: 1,
            capture: false,
        }
    }

    /// Non-capturing step or slide.
    #[inline]
    pub fn step(from: u8, to: u8) -> Self {
        let mut p = Self::start(from);
        p.push(to);
        p
    }

    /// This path extended by one capture landing on `to`.
    #[inline]
    #[must_use]
    pub fn jump(&self, to: u8) -> Self {
        let mut p = *self;
        p.push(to);
        p.capture = true;
        p
    }

    #[inline]
    fn push(&mut self, sq: u8) {
        assert!((self.len as usize) < MAX_PATH, "move path overflow");
        self.squares[self.len as usize] = sq;
        self.len += 1;
    }

    #[inline]
    pub fn squares(&self) -> &[u8] {
        &self.squares[..self.len as usize]
    }

    #[inline]
    pub fn from(&self) -> u8 {
        self.squares[0]
    }

    #[inline]
    pub fn to(&self) -> u8 {
        self.squares[self.len as usize - 1]
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture
    }

    /// Number of pieces taken along this path.
    #[inline]
    pub fn captured(&self) -> usize {
        if self.capture {
            self.len as usize - 1
        } else {
            0
        }
    }
}

impl fmt::Display for MovePath {
    /// `c3-d4` for a step, `c3:e5:g7` for a capture chain.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.capture { ':' } else { '-' };
        for (i, sq) in self.squares().iter().enumerate() {
            if i > 0 {
                write!(f, "{sep}")?;
            }
            f.write_str(square_name(*sq))?;
        }
        Ok(())
    }
}

/// One legal ply: the resulting position and how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub board: Board,
    pub path: MovePath,
}

impl Move {
    #[inline]
    pub fn name(&self) -> String {
        self.path.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.path, f)
    }
}

/// Output of the move generator.
///
/// `forced_capture` is set when the side to move has at least one capture, in
/// which case `moves` holds capture chains only.
#[derive(Debug, Clone, Default)]
pub struct LegalMoves {
    pub moves: Vec<Move>,
    pub forced_capture: bool,
}

impl LegalMoves {
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Names in generation order, as offered to a player.
    pub fn names(&self) -> Vec<String> {
        self.moves.iter().map(Move::name).collect()
    }
}

impl IntoIterator for LegalMoves {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl<'a> IntoIterator for &'a LegalMoves {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

/// Where a game stands. Reaching a terminal state is a normal result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    InProgress,
    Draw,
    Won(Color),
}

impl GameStatus {
    #[inline]
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => f.write_str("in progress"),
            GameStatus::Draw => f.write_str("draw"),
            GameStatus::Won(c) => write!(f, "{c} wins"),
        }
    }
}

/// All legal plies for the side to move, captures only when one exists.
#[inline]
pub fn legal_moves(board: &Board) -> LegalMoves {
    movegen::generate(board)
}

/// A side with no legal move has lost; otherwise the progress counter decides a draw.
pub fn status(board: &Board) -> GameStatus {
    status_with(board, &legal_moves(board))
}

/// [`status`] for callers that already generated the move list.
#[inline]
pub fn status_with(board: &Board, moves: &LegalMoves) -> GameStatus {
    if moves.is_empty() {
        GameStatus::Won(board.turn().other())
    } else if board.is_draw() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

#[inline]
pub fn is_terminal(board: &Board) -> bool {
    status(board).is_over()
}
