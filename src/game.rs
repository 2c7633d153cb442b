//! A game in progress: the current board, who the human is, and the moves played so far.

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{EngineError, EngineResult};
use crate::notation::find_move;
use crate::rng::rng_for_ply;
use crate::search::{BestMove, SearchConfig, SearchOutcome, Searcher};
use crate::state::{status, GameStatus, Move};
use crate::types::Color;

/// Whose input the game is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingHuman,
    AwaitingEngine,
    Finished(GameStatus),
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    human: Option<Color>,
    history: Vec<String>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Game {
    /// New game from the initial position. `human: None` means the engine plays both sides.
    pub fn new(human: Option<Color>) -> Self {
        Self::from_board(Board::initial(), human)
    }

    pub fn from_board(board: Board, human: Option<Color>) -> Self {
        Self {
            board,
            human,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn human(&self) -> Option<Color> {
        self.human
    }

    /// Names of the plies played so far, oldest first.
    #[inline]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    #[inline]
    pub fn plies(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn outcome(&self) -> GameStatus {
        status(&self.board)
    }

    pub fn phase(&self) -> Phase {
        let st = self.outcome();
        if st.is_over() {
            Phase::Finished(st)
        } else if self.human == Some(self.board.turn()) {
            Phase::AwaitingHuman
        } else {
            Phase::AwaitingEngine
        }
    }

    /// Play the human's move by name.
    pub fn play_named(&mut self, name: &str) -> EngineResult<Move> {
        match self.phase() {
            Phase::Finished(st) => return Err(EngineError::GameOver(st)),
            Phase::AwaitingEngine => return Err(EngineError::NotYourTurn),
            Phase::AwaitingHuman => {}
        }
        let mv = find_move(&self.board, name)?;
        self.apply(&mv);
        Ok(mv)
    }

    /// Let the engine pick a move for the side to move, breaking ties with `rng`.
    pub fn play_engine<R: Rng>(&mut self, searcher: &mut Searcher, rng: &mut R) -> EngineResult<BestMove> {
        match self.phase() {
            Phase::Finished(st) => return Err(EngineError::GameOver(st)),
            Phase::AwaitingHuman => return Err(EngineError::NotYourTurn),
            Phase::AwaitingEngine => {}
        }
        match searcher.best_random_move(&self.board, rng) {
            SearchOutcome::Move(best) => {
                self.apply(&best.mv);
                Ok(best)
            }
            SearchOutcome::GameOver(st) => Err(EngineError::GameOver(st)),
        }
    }

    fn apply(&mut self, mv: &Move) {
        self.board = mv.board;
        self.history.push(mv.name());
        if let Phase::Finished(st) = self.phase() {
            info!("game over after {} plies: {st}", self.history.len());
        }
    }
}

/// Summary of one engine-versus-engine game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: u64,
    pub status: GameStatus,
    /// Set when the ply limit stopped the game before it finished.
    pub truncated: bool,
    pub plies: usize,
    pub moves: Vec<String>,
    /// Position code of the last board.
    pub final_position: String,
}

/// Engine-versus-engine game from the initial position.
///
/// Each color searches with its own settings. Every decision draws from
/// `rng_for_ply(seed, game_id, ply)`, so a (seed, game_id) pair always replays the same game.
///
/// Fails only if the engine reports an error other than the game ending.
pub fn play_selfplay(
    white: SearchConfig,
    black: SearchConfig,
    seed: u64,
    game_id: u64,
    max_plies: Option<usize>,
) -> EngineResult<GameRecord> {
    let mut game = Game::new(None);
    let mut white = Searcher::with_config(white);
    let mut black = Searcher::with_config(black);
    let mut truncated = false;

    while !game.outcome().is_over() {
        if max_plies.is_some_and(|m| game.plies() >= m) {
            truncated = true;
            break;
        }
        let ply = u16::try_from(game.plies()).unwrap_or(u16::MAX);
        let mut rng = rng_for_ply(seed, game_id, ply);
        let searcher = match game.board().turn() {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        match game.play_engine(searcher, &mut rng) {
            Ok(_) => {}
            Err(EngineError::GameOver(_)) => break,
            Err(e) => return Err(e),
        }
    }

    Ok(GameRecord {
        game_id,
        status: game.outcome(),
        truncated,
        plies: game.plies(),
        moves: game.history().to_vec(),
        final_position: game.board().to_code(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_follow_the_side_to_move() {
        let mut g = Game::new(Some(Color::White));
        assert_eq!(g.phase(), Phase::AwaitingHuman);
        g.play_named("c3-d4").unwrap();
        assert_eq!(g.phase(), Phase::AwaitingEngine);
        assert_eq!(g.history(), ["c3-d4".to_string()]);
    }

    #[test]
    fn human_cannot_move_for_the_engine() {
        let mut g = Game::new(Some(Color::Black));
        assert_eq!(g.play_named("c3-d4"), Err(EngineError::NotYourTurn));
        assert_eq!(g.plies(), 0);
    }

    #[test]
    fn unknown_name_leaves_game_untouched() {
        let mut g = Game::new(Some(Color::White));
        assert_eq!(g.play_named("c3-e5"), Err(EngineError::UnknownMove("c3-e5".into())));
        assert_eq!(*g.board(), Board::initial());
    }

    #[test]
    fn finished_game_rejects_moves() {
        let b = Board::initial().with_progress(31);
        let mut g = Game::from_board(b, None);
        assert_eq!(g.phase(), Phase::Finished(GameStatus::Draw));
        let mut rng = rng_for_ply(1, 0, 0);
        let err = g.play_engine(&mut Searcher::new(1), &mut rng).unwrap_err();
        assert_eq!(err, EngineError::GameOver(GameStatus::Draw));
    }

    #[test]
    fn selfplay_to_the_end_is_ok() {
        let cfg = SearchConfig::with_depth(1);
        let rec = play_selfplay(cfg, cfg, 9, 4, None).expect("game ends without engine errors");
        assert!(!rec.truncated);
        assert!(rec.status.is_over());
        assert_eq!(rec.plies, rec.moves.len());
    }
}
