use rand::Rng;

use draughtcargo::board::DRAW_THRESHOLD;
use draughtcargo::topology::{neighbor, ray, SQUARES};
use draughtcargo::{
    find_move, legal_moves, material, parse_square, rng_for_ply, status, Board, Color, Dir, GameStatus, Piece,
};

fn sq(name: &str) -> u8 {
    parse_square(name)
}

fn board(turn: Color, pieces: &[(&str, Piece)]) -> Board {
    let placed: Vec<(u8, Piece)> = pieces.iter().map(|(n, p)| (sq(n), *p)).collect();
    Board::from_pieces(turn, &placed)
}

#[test]
fn initial_position_layout() {
    let b = Board::initial();
    assert_eq!(b.turn(), Color::White);
    assert_eq!(b.progress(), 0);
    assert_eq!(b.count(Color::White), 12);
    assert_eq!(b.count(Color::Black), 12);
    assert_eq!(b.get(sq("a1")), Piece::WhiteMan);
    assert_eq!(b.get(sq("h8")), Piece::BlackMan);
    assert_eq!(b.get(sq("d4")), Piece::Empty);
    assert_eq!(b.bits(), (49_085_340_525, 160_842_843_832_320));
    assert_eq!(b.to_code(), "xxxxxxxxxxxx........oooooooooooo w 0");
}

#[test]
fn capture_is_mandatory() {
    let b = board(
        Color::White,
        &[("e3", Piece::WhiteMan), ("a1", Piece::WhiteMan), ("d4", Piece::BlackMan)],
    );
    let moves = legal_moves(&b);
    assert!(moves.forced_capture);
    assert_eq!(moves.names(), vec!["e3:c5"]);
    let after = moves.moves[0].board;
    assert_eq!(after.get(sq("d4")), Piece::Empty);
    assert_eq!(after.get(sq("c5")), Piece::WhiteMan);
    assert_eq!(after.turn(), Color::Black);
}

#[test]
fn multi_jump_must_be_completed() {
    let b = board(
        Color::White,
        &[("c3", Piece::WhiteMan), ("d4", Piece::BlackMan), ("f6", Piece::BlackMan)],
    );
    let moves = legal_moves(&b);
    assert_eq!(moves.names(), vec!["c3:e5:g7"]);
    let after = moves.moves[0].board;
    assert_eq!(after.count(Color::Black), 0);
    assert_eq!(after.get(sq("g7")), Piece::WhiteMan);
    assert_eq!(moves.moves[0].path.captured(), 2);
}

#[test]
fn man_crowned_mid_chain_continues_as_king() {
    let b = board(
        Color::White,
        &[("b6", Piece::WhiteMan), ("c7", Piece::BlackMan), ("f6", Piece::BlackMan)],
    );
    let moves = legal_moves(&b);
    assert_eq!(moves.names(), vec!["b6:d8:g5", "b6:d8:h4"]);
    for mv in &moves {
        assert_eq!(mv.board.get(mv.path.to()), Piece::WhiteKing);
        assert_eq!(mv.board.count(Color::Black), 0);
    }
}

#[test]
fn black_man_crowned_on_first_rank() {
    let b = board(Color::Black, &[("c3", Piece::BlackMan), ("h8", Piece::WhiteMan)]);
    let mv = find_move(&b, "c3-d2").expect("legal");
    assert_eq!(mv.board.get(sq("d2")), Piece::BlackMan);
    let mv = find_move(&mv.board.with_turn(Color::Black), "d2-e1").expect("legal");
    assert_eq!(mv.board.get(sq("e1")), Piece::BlackKing);
}

#[test]
fn flying_king_lands_anywhere_behind_captured_piece() {
    let b = board(Color::White, &[("a1", Piece::WhiteKing), ("d4", Piece::BlackMan)]);
    let moves = legal_moves(&b);
    assert_eq!(moves.names(), vec!["a1:e5", "a1:f6", "a1:g7", "a1:h8"]);
    assert!(moves.iter().all(|m| m.board.count(Color::Black) == 0));
}

#[test]
fn king_cannot_cross_square_emptied_in_same_chain() {
    // from h8 or g7 the king would otherwise slide back through f6 onto b2
    let b = board(
        Color::White,
        &[("d4", Piece::WhiteKing), ("f6", Piece::BlackMan), ("b2", Piece::BlackMan)],
    );
    let moves = legal_moves(&b);
    assert_eq!(moves.names(), vec!["d4:g7", "d4:h8", "d4:a1"]);
    assert!(moves.iter().all(|m| m.path.captured() == 1));
}

#[test]
fn quiet_king_moves_count_towards_a_draw() {
    let b = board(Color::White, &[("a1", Piece::WhiteKing), ("b8", Piece::BlackMan)]).with_progress(DRAW_THRESHOLD);
    assert_eq!(status(&b), GameStatus::InProgress);
    let mv = find_move(&b, "a1-c3").expect("legal");
    assert_eq!(mv.board.progress(), DRAW_THRESHOLD + 1);
    assert_eq!(status(&mv.board), GameStatus::Draw);
}

#[test]
fn man_move_resets_progress() {
    let b = Board::initial().with_progress(12);
    let mv = find_move(&b, "c3-d4").expect("legal");
    assert_eq!(mv.board.progress(), 0);
}

#[test]
fn side_without_moves_loses() {
    let b = board(Color::Black, &[("a1", Piece::WhiteMan)]);
    assert_eq!(status(&b), GameStatus::Won(Color::White));
}

#[test]
fn transpose_mirrors_and_swaps() {
    let b = Board::initial();
    assert_eq!(b.transpose(), b.with_turn(Color::Black));

    let p = board(
        Color::White,
        &[("c3", Piece::WhiteMan), ("d4", Piece::BlackMan), ("f6", Piece::BlackKing)],
    );
    let t = p.transpose();
    assert_eq!(t.transpose(), p);
    assert_eq!(material(&t), -material(&p));
    assert_eq!(legal_moves(&t).len(), legal_moves(&p).len());
}

#[test]
fn position_code_parses_back() {
    let b = board(
        Color::Black,
        &[("c3", Piece::WhiteKing), ("d4", Piece::BlackMan)],
    )
    .with_progress(7);
    let code = b.to_code();
    assert_eq!(code.parse::<Board>(), Ok(b));
    assert!("xyz w 0".parse::<Board>().is_err());
    assert!("xxxxxxxxxxxx........oooooooooooo q 0".parse::<Board>().is_err());
}

/// Positions reached by seeded random play from the initial board.
fn random_positions() -> Vec<Board> {
    let mut out = Vec::new();
    for game in 0..24u64 {
        let mut b = Board::initial();
        for ply in 0..160u16 {
            let moves = legal_moves(&b);
            if moves.is_empty() || b.is_draw() {
                break;
            }
            out.push(b);
            let mut rng = rng_for_ply(0x5EED, game, ply);
            b = moves.moves[rng.gen_range(0..moves.len())].board;
        }
    }
    out
}

/// Whether the piece on `from` can jump an enemy of the side to move.
/// Squares in `vacated` were emptied earlier in the same chain and block a king's approach.
fn can_jump(b: &Board, from: u8, vacated: u32) -> bool {
    let piece = b.get(from);
    Dir::ALL.iter().any(|&dir| {
        let mut squares = ray(from, dir);
        let hit = if piece.is_king() {
            squares.find(|&s| !b.is_empty(s) || vacated & (1 << s) != 0)
        } else {
            squares.next()
        };
        match hit {
            Some(s) if vacated & (1 << s) == 0 && b.is_enemy(s) => {
                neighbor(s, dir).is_some_and(|t| b.is_empty(t))
            }
            _ => false,
        }
    })
}

#[test]
fn random_play_respects_forced_capture() {
    let positions = random_positions();
    let mut capture_positions = 0;
    for b in &positions {
        let moves = legal_moves(b);
        let mover = b.turn();
        let any_jump = b
            .pieces()
            .filter(|(_, p)| p.color() == Some(mover))
            .any(|(sq, _)| can_jump(b, sq, 0));
        assert_eq!(moves.forced_capture, any_jump, "{}", b.to_code());
        assert!(
            moves.iter().all(|m| m.path.is_capture() == any_jump),
            "simple and capture moves mixed in {}",
            b.to_code()
        );
        if any_jump {
            capture_positions += 1;
        }
    }
    assert!(capture_positions > 50, "only {capture_positions} capture positions");
}

#[test]
fn random_play_captures_are_maximal() {
    for b in random_positions() {
        let moves = legal_moves(&b);
        if !moves.forced_capture {
            continue;
        }
        let mover = b.turn();
        for mv in &moves {
            let vacated = (0..SQUARES)
                .filter(|&s| b.get(s).color() == Some(mover.other()) && mv.board.is_empty(s))
                .fold(0u32, |m, s| m | (1 << s));
            assert_eq!(vacated.count_ones() as usize, mv.path.captured(), "{} {}", b.to_code(), mv);
            let landed = mv.board.with_turn(mover);
            assert!(
                !can_jump(&landed, mv.path.to(), vacated),
                "chain {} from {} stops early",
                mv,
                b.to_code()
            );
        }
    }
}
