use crate::types::{idx_to_rc, rc_to_idx, Dir};

/// Number of playable (dark) squares.
pub const SQUARES: u8 = 32;

/// Diagonal neighbors of every square in [`Dir::ALL`] order; `None` off the board.
pub static NEIGHBORS: [[Option<u8>; 4]; SQUARES as usize] = build_neighbors();

const fn build_neighbors() -> [[Option<u8>; 4]; SQUARES as usize] {
    let mut table = [[None; 4]; SQUARES as usize];
    let mut sq = 0u8;
    while sq < SQUARES {
        let (r, c) = idx_to_rc(sq);
        let mut d = 0;
        while d < 4 {
            let (dr, dc) = Dir::ALL[d].delta();
            let nr = r as i8 + dr;
            let nc = c as i8 + dc;
            if nr >= 0 && nc >= 0 {
                table[sq as usize][d] = rc_to_idx(nr as u8, nc as u8);
            }
            d += 1;
        }
        sq += 1;
    }
    table
}

/// Square one diagonal step away from `square`, or `None` at the edge.
///
/// # Panics
/// When `square` is not a playable square index.
#[inline]
pub fn neighbor(square: u8, dir: Dir) -> Option<u8> {
    assert!(square < SQUARES, "invalid square index {square}");
    NEIGHBORS[square as usize][dir.index()]
}

/// Squares along the diagonal from `square` (exclusive) to the board edge.
pub fn ray(square: u8, dir: Dir) -> impl Iterator<Item = u8> {
    std::iter::successors(neighbor(square, dir), move |&sq| neighbor(sq, dir))
}
