use crate::board::Board;
use crate::types::{Color, Piece};

/// Material weight of a king relative to a man.
pub const KING_VALUE: i32 = 3;

#[inline]
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Empty => 0,
        Piece::WhiteMan => 1,
        Piece::BlackMan => -1,
        Piece::WhiteKing => KING_VALUE,
        Piece::BlackKing => -KING_VALUE,
    }
}

/// Material balance: men count 1, kings [`KING_VALUE`]; positive favors White.
#[inline]
pub fn material(board: &Board) -> i32 {
    board.pieces().map(|(_, p)| piece_value(p)).sum()
}

/// Material balance seen from `perspective`.
#[inline]
pub fn score(board: &Board, perspective: Color) -> i32 {
    match perspective {
        Color::White => material(board),
        Color::Black => -material(board),
    }
}
