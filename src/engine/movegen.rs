use crate::board::Board;
use crate::state::{LegalMoves, Move, MovePath};
use crate::topology::{neighbor, ray, SQUARES};
use crate::types::{Dir, Piece};

#[inline]
fn bit(square: u8) -> u32 {
    1u32 << square
}

/// Piece that ends up on `to`: men reaching the far rank are crowned.
#[inline]
fn crowned(piece: Piece, to: u8) -> Piece {
    match piece {
        Piece::WhiteMan if to < 4 => Piece::WhiteKing,
        Piece::BlackMan if to >= SQUARES - 4 => Piece::BlackKing,
        other => other,
    }
}

/// Collects simple moves and finished capture chains separately; the forced
/// capture rule is applied once every piece has been visited.
#[derive(Default)]
struct Generator {
    simple: Vec<Move>,
    captures: Vec<Move>,
}

impl Generator {
    fn man_steps(&mut self, board: &Board, from: u8, piece: Piece) {
        let Some(color) = piece.color() else { return };
        for dir in color.forward() {
            let Some(to) = neighbor(from, dir) else { continue };
            if !board.is_empty(to) {
                continue;
            }
            let next = board
                .advance_turn(false)
                .with_piece(from, Piece::Empty)
                .with_piece(to, crowned(piece, to));
            self.simple.push(Move {
                board: next,
                path: MovePath::step(from, to),
            });
        }
    }

    fn king_slides(&mut self, board: &Board, from: u8, piece: Piece) {
        let moved = board.advance_turn(true).with_piece(from, Piece::Empty);
        for dir in Dir::ALL {
            for to in ray(from, dir).take_while(|&sq| board.is_empty(sq)) {
                self.simple.push(Move {
                    board: moved.with_piece(to, piece),
                    path: MovePath::step(from, to),
                });
            }
        }
    }

    /// Single jumps over an adjacent enemy, in any direction. Returns whether a
    /// capture was possible from `from`.
    fn man_captures(&mut self, board: &Board, from: u8, piece: Piece, path: MovePath, eaten: u32) -> bool {
        let mut found = false;
        for dir in Dir::ALL {
            let Some(enemy) = neighbor(from, dir) else { continue };
            if !board.is_enemy(enemy) {
                continue;
            }
            let Some(to) = neighbor(enemy, dir) else { continue };
            if !board.is_empty(to) {
                continue;
            }
            let landed = crowned(piece, to);
            let next = board
                .with_piece(from, Piece::Empty)
                .with_piece(enemy, Piece::Empty)
                .with_piece(to, landed);
            self.continue_chain(&next, to, landed, path.jump(to), eaten | bit(enemy));
            found = true;
        }
        found
    }

    /// Flying captures: slide over empty squares not taken earlier in this
    /// chain, jump the first enemy and land on any empty square behind it.
    fn king_captures(&mut self, board: &Board, from: u8, piece: Piece, path: MovePath, eaten: u32) -> bool {
        let mut found = false;
        for dir in Dir::ALL {
            let Some(enemy) = ray(from, dir).find(|&sq| !board.is_empty(sq) || eaten & bit(sq) != 0) else {
                continue;
            };
            if !board.is_enemy(enemy) {
                continue;
            }
            let eaten = eaten | bit(enemy);
            let jumped = board.with_piece(from, Piece::Empty).with_piece(enemy, Piece::Empty);
            for to in ray(enemy, dir).take_while(|&sq| board.is_empty(sq)) {
                self.continue_chain(&jumped.with_piece(to, piece), to, piece, path.jump(to), eaten);
                found = true;
            }
        }
        found
    }

    /// Keep capturing from `at` with whatever the piece is now; only a chain
    /// that cannot be extended becomes a legal move.
    fn continue_chain(&mut self, board: &Board, at: u8, piece: Piece, path: MovePath, eaten: u32) {
        let more = if piece.is_king() {
            self.king_captures(board, at, piece, path, eaten)
        } else {
            self.man_captures(board, at, piece, path, eaten)
        };
        if !more {
            self.captures.push(Move {
                board: board.advance_turn(false),
                path,
            });
        }
    }

    fn finish(self) -> LegalMoves {
        if self.captures.is_empty() {
            LegalMoves {
                moves: self.simple,
                forced_capture: false,
            }
        } else {
            LegalMoves {
                moves: self.captures,
                forced_capture: true,
            }
        }
    }
}

/// Generate every legal ply for the side to move.
///
/// Squares are visited in index order and directions in [`Dir::ALL`] order, so
/// the output order is stable for a given board.
pub fn generate(board: &Board) -> LegalMoves {
    let turn = board.turn();
    let mut gen = Generator::default();
    for (from, piece) in board.pieces() {
        if piece.color() != Some(turn) {
            continue;
        }
        let start = MovePath::start(from);
        if piece.is_king() {
            if gen.captures.is_empty() {
                gen.king_slides(board, from, piece);
            }
            gen.king_captures(board, from, piece, start, 0);
        } else {
            if gen.captures.is_empty() {
                gen.man_steps(board, from, piece);
            }
            gen.man_captures(board, from, piece, start, 0);
        }
    }
    gen.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn names(b: &Board) -> Vec<String> {
        generate(b).names()
    }

    #[test]
    fn opening_moves() {
        let moves = generate(&Board::initial());
        assert!(!moves.forced_capture);
        assert_eq!(
            moves.names(),
            vec!["a3-b4", "c3-b4", "c3-d4", "e3-d4", "e3-f4", "g3-f4", "g3-h4"]
        );
    }

    #[test]
    fn black_men_move_down() {
        let b = Board::initial().with_turn(Color::Black);
        let n = names(&b);
        assert_eq!(n.len(), 7);
        assert_eq!(n[0], "b6-a5");
        assert!(n.iter().all(|m| m.contains('5')));
    }

    #[test]
    fn man_captures_backwards() {
        // white man on d4, black man behind it on c3
        let b = Board::from_pieces(Color::White, &[(17, Piece::WhiteMan), (21, Piece::BlackMan)]);
        assert_eq!(names(&b), vec!["d4:b2"]);
    }

    #[test]
    fn king_slides_stop_before_pieces() {
        // white king on a1, own man on e5 blocks the long diagonal
        let b = Board::from_pieces(Color::White, &[(28, Piece::WhiteKing), (14, Piece::WhiteMan)]);
        let n = names(&b);
        assert!(n.contains(&"a1-b2".to_string()));
        assert!(n.contains(&"a1-c3".to_string()));
        assert!(n.contains(&"a1-d4".to_string()));
        assert!(!n.contains(&"a1-e5".to_string()));
        assert!(!n.contains(&"a1-f6".to_string()));
    }

    #[test]
    fn king_with_no_landing_square_does_not_block_chain() {
        // man jumps c7 from b6, lands on d8 as a king; the king then faces
        // e7 (black) backed by f6 (black) with nowhere to land, so the chain ends on d8
        let b = Board::from_pieces(
            Color::White,
            &[
                (8, Piece::WhiteMan),
                (5, Piece::BlackMan),
                (6, Piece::BlackMan),
                (10, Piece::BlackMan),
            ],
        );
        let moves = generate(&b);
        assert_eq!(moves.names(), vec!["b6:d8"]);
        assert_eq!(moves.moves[0].board.get(1), Piece::WhiteKing);
    }
}
