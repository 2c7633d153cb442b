use serde::{Deserialize, Serialize};
use std::fmt;

/// Side to move. White starts at the bottom (ranks 1–3) and moves up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Lowercase name used by the prompt and the CLI ("white" / "black").
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    /// The two diagonals a man of this color steps along.
    #[inline]
    pub fn forward(self) -> [Dir; 2] {
        match self {
            Color::White => [Dir::UpLeft, Dir::UpRight],
            Color::Black => [Dir::DownLeft, Dir::DownRight],
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Diagonal directions in White's orientation ("up" is towards rank 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Dir {
    /// Fixed iteration order used by the move generator.
    pub const ALL: [Dir; 4] = [Dir::UpLeft, Dir::UpRight, Dir::DownLeft, Dir::DownRight];

    #[inline]
    pub fn all() -> [Dir; 4] {
        Self::ALL
    }

    #[inline]
    pub fn opposite(self) -> Dir {
        match self {
            Dir::UpLeft => Dir::DownRight,
            Dir::UpRight => Dir::DownLeft,
            Dir::DownLeft => Dir::UpRight,
            Dir::DownRight => Dir::UpLeft,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Row and column step on the 8x8 grid.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Dir::UpLeft => (-1, -1),
            Dir::UpRight => (-1, 1),
            Dir::DownLeft => (1, -1),
            Dir::DownRight => (1, 1),
        }
    }
}

/// Contents of one playable square, stored on the board as a 3-bit code:
/// bit 2 = occupied, bit 1 = king, bit 0 = black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Empty = 0b000,
    WhiteMan = 0b100,
    BlackMan = 0b101,
    WhiteKing = 0b110,
    BlackKing = 0b111,
}

impl Piece {
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a 3-bit code.
    ///
    /// # Panics
    /// Codes `0b001..=0b011` never appear on a well-formed board.
    #[inline]
    pub fn from_code(code: u8) -> Self {
        match code {
            0b000 => Piece::Empty,
            0b100 => Piece::WhiteMan,
            0b101 => Piece::BlackMan,
            0b110 => Piece::WhiteKing,
            0b111 => Piece::BlackKing,
            _ => panic!("invalid piece code {code:#05b}"),
        }
    }

    #[inline]
    pub fn man(color: Color) -> Self {
        match color {
            Color::White => Piece::WhiteMan,
            Color::Black => Piece::BlackMan,
        }
    }

    #[inline]
    pub fn king(color: Color) -> Self {
        match color {
            Color::White => Piece::WhiteKing,
            Color::Black => Piece::BlackKing,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    #[inline]
    pub fn is_white(self) -> bool {
        matches!(self, Piece::WhiteMan | Piece::WhiteKing)
    }

    #[inline]
    pub fn is_black(self) -> bool {
        matches!(self, Piece::BlackMan | Piece::BlackKing)
    }

    #[inline]
    pub fn is_man(self) -> bool {
        matches!(self, Piece::WhiteMan | Piece::BlackMan)
    }

    #[inline]
    pub fn is_king(self) -> bool {
        matches!(self, Piece::WhiteKing | Piece::BlackKing)
    }

    #[inline]
    pub fn color(self) -> Option<Color> {
        match self {
            Piece::Empty => None,
            Piece::WhiteMan | Piece::WhiteKing => Some(Color::White),
            Piece::BlackMan | Piece::BlackKing => Some(Color::Black),
        }
    }

    /// Same rank of piece in the other color. Empty stays empty.
    #[inline]
    pub fn swapped(self) -> Self {
        match self {
            Piece::Empty => Piece::Empty,
            Piece::WhiteMan => Piece::BlackMan,
            Piece::BlackMan => Piece::WhiteMan,
            Piece::WhiteKing => Piece::BlackKing,
            Piece::BlackKing => Piece::WhiteKing,
        }
    }

    /// Board glyph: `.` empty, `o`/`O` white man/king, `x`/`X` black man/king.
    #[inline]
    pub fn glyph(self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::WhiteMan => 'o',
            Piece::BlackMan => 'x',
            Piece::WhiteKing => 'O',
            Piece::BlackKing => 'X',
        }
    }

    #[inline]
    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            '.' => Some(Piece::Empty),
            'o' => Some(Piece::WhiteMan),
            'x' => Some(Piece::BlackMan),
            'O' => Some(Piece::WhiteKing),
            'X' => Some(Piece::BlackKing),
            _ => None,
        }
    }
}

/// Playable squares are indexed 0..=31, row-major from the top (b8 = 0, g1 = 31).
/// Returns (row, column) on the 8x8 grid, row 0 being rank 8.
#[inline]
pub const fn idx_to_rc(idx: u8) -> (u8, u8) {
    debug_assert!(idx < 32);
    let row = idx / 4;
    let col = 2 * (idx % 4) + if row % 2 == 0 { 1 } else { 0 };
    (row, col)
}

/// Inverse of [`idx_to_rc`]; `None` for light squares and off-board coordinates.
#[inline]
pub const fn rc_to_idx(r: u8, c: u8) -> Option<u8> {
    if r < 8 && c < 8 && (r + c) % 2 == 1 {
        Some(r * 4 + c / 2)
    } else {
        None
    }
}
