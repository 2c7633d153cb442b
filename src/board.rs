use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use crate::topology::SQUARES;
use crate::types::{rc_to_idx, Color, Piece};

const TURN_BIT: u64 = 1 << 63;
const COUNTER_SHIFT: u32 = 59;
const COUNTER_MASK: u64 = 0b11111 << COUNTER_SHIFT;

/// Largest value the packed progress counter can hold.
pub const MAX_PROGRESS: u8 = 31;

/// Consecutive quiet king slides allowed before the game is drawn.
pub const DRAW_THRESHOLD: u8 = 30;

/// Packed position: 3 bits per square, squares 0..16 in `lo` and 16..32 in `hi`.
/// The side to move lives in the top bit of `lo` (set = Black) and the progress
/// counter in the top five bits of `hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    lo: u64,
    hi: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    /// Standard opening: Black men on squares 0..12, White men on 20..32, White to move.
    pub const fn initial() -> Self {
        Self {
            lo: 49_085_340_525,
            hi: 160_842_843_832_320,
        }
    }

    /// Empty board with White to move.
    #[inline]
    pub const fn empty() -> Self {
        Self { lo: 0, hi: 0 }
    }

    /// Build a position from explicit placements. Later entries win on duplicates.
    pub fn from_pieces(turn: Color, pieces: &[(u8, Piece)]) -> Self {
        let mut b = Self::empty().with_turn(turn);
        for &(sq, piece) in pieces {
            b = b.with_piece(sq, piece);
        }
        b
    }

    #[inline]
    fn slot(square: u8) -> (bool, u32) {
        assert!(square < SQUARES, "invalid square index {square}");
        if square < 16 {
            (false, u32::from(square) * 3)
        } else {
            (true, u32::from(square - 16) * 3)
        }
    }

    #[inline]
    pub fn get(&self, square: u8) -> Piece {
        let (high, shift) = Self::slot(square);
        let word = if high { self.hi } else { self.lo };
        #[allow(clippy::cast_possible_truncation)]
        let code = ((word >> shift) & 0b111) as u8;
        Piece::from_code(code)
    }

    /// Copy of this board with `piece` placed on `square`.
    ///
    /// # Panics
    /// When `square` is outside 0..32.
    #[inline]
    #[must_use]
    pub fn with_piece(&self, square: u8, piece: Piece) -> Self {
        let (high, shift) = Self::slot(square);
        let mut b = *self;
        let word = if high { &mut b.hi } else { &mut b.lo };
        *word = (*word & !(0b111 << shift)) | (u64::from(piece.code()) << shift);
        b
    }

    #[inline]
    pub fn is_empty(&self, square: u8) -> bool {
        self.get(square).is_empty()
    }

    /// True when `square` holds a piece of the side not to move.
    #[inline]
    pub fn is_enemy(&self, square: u8) -> bool {
        self.get(square).color() == Some(self.turn().other())
    }

    #[inline]
    pub fn turn(&self) -> Color {
        if self.lo & TURN_BIT == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// "white" or "black".
    #[inline]
    pub fn turn_name(&self) -> &'static str {
        self.turn().name()
    }

    #[inline]
    #[must_use]
    pub fn with_turn(&self, turn: Color) -> Self {
        let mut b = *self;
        match turn {
            Color::White => b.lo &= !TURN_BIT,
            Color::Black => b.lo |= TURN_BIT,
        }
        b
    }

    /// Consecutive non-capturing king slides played so far.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn progress(&self) -> u8 {
        (self.hi >> COUNTER_SHIFT) as u8
    }

    /// # Panics
    /// When `n` exceeds [`MAX_PROGRESS`].
    #[inline]
    #[must_use]
    pub fn with_progress(&self, n: u8) -> Self {
        assert!(n <= MAX_PROGRESS, "invalid progress counter {n}");
        let mut b = *self;
        b.hi = (b.hi & !COUNTER_MASK) | (u64::from(n) << COUNTER_SHIFT);
        b
    }

    /// Pass the turn. A quiet king slide bumps the progress counter, anything
    /// else resets it.
    #[inline]
    #[must_use]
    pub fn advance_turn(&self, was_king_slide: bool) -> Self {
        let next = if was_king_slide {
            self.progress().saturating_add(1).min(MAX_PROGRESS)
        } else {
            0
        };
        self.with_turn(self.turn().other()).with_progress(next)
    }

    #[inline]
    pub fn is_draw(&self) -> bool {
        self.progress() > DRAW_THRESHOLD
    }

    /// Mirror the position end to end and swap colors: square `i` moves to
    /// `31 - i`, each piece changes color and the other side is to move.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut t = Self::empty()
            .with_turn(self.turn().other())
            .with_progress(self.progress());
        for sq in 0..SQUARES {
            t = t.with_piece(SQUARES - 1 - sq, self.get(sq).swapped());
        }
        t
    }

    /// Iterate `(square, piece)` over occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (u8, Piece)> + '_ {
        (0..SQUARES)
            .map(|sq| (sq, self.get(sq)))
            .filter(|(_, p)| !p.is_empty())
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color() == Some(color)).count()
    }

    /// Raw packed words, mostly for debugging.
    #[inline]
    pub fn bits(&self) -> (u64, u64) {
        (self.lo, self.hi)
    }

    /// Compact one-line form: 32 glyphs in square order, side to move, counter.
    pub fn to_code(&self) -> String {
        let mut s: String = (0..SQUARES).map(|sq| self.get(sq).glyph()).collect();
        s.push(' ');
        s.push(match self.turn() {
            Color::White => 'w',
            Color::Black => 'b',
        });
        s.push(' ');
        s.push_str(&self.progress().to_string());
        s
    }
}

impl FromStr for Board {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let squares = parts
            .next()
            .ok_or_else(|| EngineError::InvalidPosition("empty position".into()))?;
        if squares.chars().count() != SQUARES as usize {
            return Err(EngineError::InvalidPosition(format!(
                "expected {SQUARES} squares, got {}",
                squares.chars().count()
            )));
        }
        let turn = match parts.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => {
                return Err(EngineError::InvalidPosition(format!(
                    "side to move must be 'w' or 'b', got '{other}'"
                )))
            }
        };
        let progress = match parts.next() {
            None => 0,
            Some(n) => n
                .parse::<u8>()
                .ok()
                .filter(|n| *n <= MAX_PROGRESS)
                .ok_or_else(|| EngineError::InvalidPosition(format!("bad counter '{n}'")))?,
        };
        if parts.next().is_some() {
            return Err(EngineError::InvalidPosition("trailing input".into()));
        }

        let mut b = Self::empty().with_turn(turn).with_progress(progress);
        for (sq, c) in (0..SQUARES).zip(squares.chars()) {
            let piece = Piece::from_glyph(c)
                .ok_or_else(|| EngineError::InvalidPosition(format!("unknown glyph '{c}'")))?;
            b = b.with_piece(sq, piece);
        }
        Ok(b)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for row in 0u8..8 {
            let rank = 8 - row;
            write!(f, "{rank}")?;
            for col in 0u8..8 {
                match rc_to_idx(row, col) {
                    Some(sq) => write!(f, " {}", self.get(sq).glyph())?,
                    None => f.write_str("  ")?,
                }
            }
            writeln!(f, " {rank}")?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(
            f,
            "{} to move, quiet king moves {}/{}",
            self.turn_name(),
            self.progress(),
            DRAW_THRESHOLD
        )
    }
}
