use log::debug;
use rand::Rng;
use rayon::prelude::*;

use crate::board::Board;
use crate::engine::score::material;
use crate::state::{legal_moves, status_with, GameStatus, Move};
use crate::types::Color;

use super::{goodness, BestMove, RatedMove, SearchConfig, SearchOutcome, SearchStats, DRAW_SCORE, WIN_SCORE};

/// Rate of a subtree and the plies it took to reach the deciding position.
#[derive(Debug, Clone, Copy)]
struct Line {
    rate: i32,
    plies: u32,
}

/// Fixed-depth minimax with alpha-beta pruning.
///
/// White maximizes, Black minimizes. Terminal positions are checked before
/// the depth limit, forced single replies do not consume depth, and captures
/// are always resolved before the static evaluation is taken.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    config: SearchConfig,
    stats: SearchStats,
    last: SearchStats,
}

impl Searcher {
    #[inline]
    pub fn new(max_depth: u8) -> Self {
        Self::with_config(SearchConfig::with_depth(max_depth))
    }

    #[inline]
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
            last: SearchStats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Counters accumulated since construction or the last [`Self::clear_stats`].
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Counters of the most recent root search alone.
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.last
    }

    #[inline]
    pub fn clear_stats(&mut self) {
        self.stats = SearchStats::default();
        self.last = SearchStats::default();
    }

    /// Minimax rate of every top-level move, in generation order. Empty when
    /// the game is already over.
    pub fn rate_moves(&mut self, board: &Board) -> Vec<RatedMove> {
        let moves = legal_moves(board);
        if status_with(board, &moves).is_over() {
            return Vec::new();
        }
        self.rate_all(moves.moves)
    }

    /// Each top-level move gets a full window so its rate is exact.
    fn rate_all(&mut self, moves: Vec<Move>) -> Vec<RatedMove> {
        let config = self.config;
        let depth = config.max_depth;
        if config.parallel {
            let rated: Vec<(RatedMove, SearchStats)> = moves
                .par_iter()
                .map(|mv| {
                    let mut worker = Searcher::with_config(config);
                    let line = worker.minimax(&mv.board, depth, i32::MIN, i32::MAX);
                    (
                        RatedMove {
                            mv: *mv,
                            rate: line.rate,
                            plies: line.plies,
                        },
                        worker.stats,
                    )
                })
                .collect();
            rated
                .into_iter()
                .map(|(r, stats)| {
                    self.stats.merge(&stats);
                    r
                })
                .collect()
        } else {
            moves
                .into_iter()
                .map(|mv| {
                    let line = self.minimax(&mv.board, depth, i32::MIN, i32::MAX);
                    RatedMove {
                        mv,
                        rate: line.rate,
                        plies: line.plies,
                    }
                })
                .collect()
        }
    }

    fn minimax(&mut self, board: &Board, depth: u8, mut alpha: i32, mut beta: i32) -> Line {
        self.stats.nodes += 1;
        let moves = legal_moves(board);
        if moves.is_empty() {
            let rate = match board.turn() {
                Color::White => -WIN_SCORE,
                Color::Black => WIN_SCORE,
            };
            return Line { rate, plies: 0 };
        }
        if board.is_draw() {
            return Line {
                rate: DRAW_SCORE,
                plies: 0,
            };
        }

        // A forced reply is free: same depth, one more ply on the line.
        if moves.len() == 1 {
            let line = self.minimax(&moves.moves[0].board, depth, alpha, beta);
            return Line {
                rate: line.rate,
                plies: line.plies + 1,
            };
        }

        if depth == 0 && !moves.forced_capture {
            self.stats.evaluated += 1;
            return Line {
                rate: material(board),
                plies: 0,
            };
        }

        let maximizing = board.turn() == Color::White;
        let mut best = Line {
            rate: if maximizing { i32::MIN } else { i32::MAX },
            plies: 0,
        };
        for mv in &moves {
            let line = self.minimax(&mv.board, depth.saturating_sub(1), alpha, beta);
            let improves = if maximizing {
                line.rate > best.rate
            } else {
                line.rate < best.rate
            };
            if improves || (line.rate == best.rate && line.plies < best.plies) {
                best = line;
            }
            if maximizing {
                alpha = alpha.max(line.rate);
            } else {
                beta = beta.min(line.rate);
            }
            if self.config.pruning && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }
        Line {
            rate: best.rate,
            plies: best.plies + 1,
        }
    }

    /// Deterministic best move: the top-level move with the best rate for the
    /// side to move, reached in the fewest plies; the first such move on a tie.
    pub fn best_move(&mut self, board: &Board) -> SearchOutcome {
        let before = self.stats;
        let moves = legal_moves(board);
        let status = status_with(board, &moves);
        if status.is_over() {
            return SearchOutcome::GameOver(status);
        }

        let turn = board.turn();
        let rated = self.rate_all(moves.moves);
        log_rates(board, &rated);

        let mut iter = rated.iter();
        let Some(mut best) = iter.next().copied() else {
            return SearchOutcome::GameOver(GameStatus::Won(turn.other()));
        };
        for r in iter {
            let (g, b) = (goodness(turn, r.rate), goodness(turn, best.rate));
            if g > b || (g == b && r.plies < best.plies) {
                best = *r;
            }
        }
        let top = goodness(turn, best.rate);
        let tied = rated.iter().filter(|r| goodness(turn, r.rate) == top).count();
        self.log_summary(&best.mv, &before);
        SearchOutcome::Move(BestMove {
            mv: best.mv,
            rate: best.rate,
            plies: best.plies,
            goodness: top,
            tied,
        })
    }

    /// Uniform pick among every top-level move whose goodness equals the maximum.
    pub fn best_random_move<R: Rng>(&mut self, board: &Board, rng: &mut R) -> SearchOutcome {
        let before = self.stats;
        let moves = legal_moves(board);
        let status = status_with(board, &moves);
        if status.is_over() {
            return SearchOutcome::GameOver(status);
        }

        let turn = board.turn();
        let rated = self.rate_all(moves.moves);
        log_rates(board, &rated);

        let Some(top) = rated.iter().map(|r| goodness(turn, r.rate)).max() else {
            return SearchOutcome::GameOver(GameStatus::Won(turn.other()));
        };
        let tied: Vec<&RatedMove> = rated
            .iter()
            .filter(|r| goodness(turn, r.rate) == top)
            .collect();
        let pick = tied[rng.gen_range(0..tied.len())];
        self.log_summary(&pick.mv, &before);
        SearchOutcome::Move(BestMove {
            mv: pick.mv,
            rate: pick.rate,
            plies: pick.plies,
            goodness: top,
            tied: tied.len(),
        })
    }

    fn log_summary(&mut self, chosen: &Move, before: &SearchStats) {
        self.last = self.stats.since(before);
        debug!(
            "depth={} chose {} evaluated={} cutoffs={} nodes={}",
            self.config.max_depth,
            chosen.name(),
            self.last.evaluated,
            self.last.cutoffs,
            self.last.nodes
        );
    }
}

fn log_rates(board: &Board, rated: &[RatedMove]) {
    if log::log_enabled!(log::Level::Debug) {
        for r in rated {
            debug!("{} {}: ({})", board.turn_name(), r.mv.name(), r.rate);
        }
    }
}

/// [`Searcher::best_move`] with a throwaway searcher.
pub fn best_move(board: &Board, max_depth: u8) -> SearchOutcome {
    Searcher::new(max_depth).best_move(board)
}

/// [`Searcher::best_random_move`] with a throwaway searcher.
pub fn best_random_move<R: Rng>(board: &Board, max_depth: u8, rng: &mut R) -> SearchOutcome {
    Searcher::new(max_depth).best_random_move(board, rng)
}
