use serde::{Deserialize, Serialize};

use crate::state::{GameStatus, Move};
use crate::types::Color;

pub mod minimax;

pub use minimax::{best_move, best_random_move, Searcher};

/// Rate of a position where the side to move has no legal move, from White's
/// side: `-WIN_SCORE` when White is stuck, `WIN_SCORE` when Black is.
/// Larger than any material balance.
pub const WIN_SCORE: i32 = 144;

/// Rate of a drawn position.
pub const DRAW_SCORE: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Nominal depth in plies. Forced replies and pending captures extend it.
    pub max_depth: u8,
    /// Alpha-beta cutoffs; switching them off gives plain minimax.
    pub pruning: bool,
    /// Search top-level moves on the rayon pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            pruning: true,
            parallel: false,
        }
    }
}

impl SearchConfig {
    #[inline]
    pub fn with_depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }
}

/// Diagnostic counters, not part of the search result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Static evaluations at the search frontier.
    pub evaluated: u64,
    /// Sibling lists abandoned by an alpha-beta cutoff.
    pub cutoffs: u64,
    /// Positions visited.
    pub nodes: u64,
}

impl SearchStats {
    #[inline]
    pub fn merge(&mut self, other: &SearchStats) {
        self.evaluated = self.evaluated.saturating_add(other.evaluated);
        self.cutoffs = self.cutoffs.saturating_add(other.cutoffs);
        self.nodes = self.nodes.saturating_add(other.nodes);
    }

    /// Work done since the `earlier` snapshot was taken.
    #[inline]
    #[must_use]
    pub fn since(&self, earlier: &SearchStats) -> SearchStats {
        SearchStats {
            evaluated: self.evaluated.saturating_sub(earlier.evaluated),
            cutoffs: self.cutoffs.saturating_sub(earlier.cutoffs),
            nodes: self.nodes.saturating_sub(earlier.nodes),
        }
    }
}

/// A top-level move with its minimax rate (positive favors White) and the
/// number of plies to the position that produced the rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatedMove {
    pub mv: Move,
    pub rate: i32,
    pub plies: u32,
}

/// Move picked by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMove {
    pub mv: Move,
    /// Minimax rate, positive favors White.
    pub rate: i32,
    /// Plies from the move to the position that decided `rate`.
    pub plies: u32,
    /// [`goodness`] of `rate` for the side that moved.
    pub goodness: i32,
    /// How many top-level moves share that goodness.
    pub tied: usize,
}

/// Result of a root search: a move to play, or the reason there is none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Move(BestMove),
    GameOver(GameStatus),
}

impl SearchOutcome {
    #[inline]
    pub fn best(&self) -> Option<&BestMove> {
        match self {
            SearchOutcome::Move(best) => Some(best),
            SearchOutcome::GameOver(_) => None,
        }
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        match self {
            SearchOutcome::Move(_) => GameStatus::InProgress,
            SearchOutcome::GameOver(status) => *status,
        }
    }
}

/// A rate re-oriented to the side to move: `1 + rate` for White, `1 - rate` for Black.
#[inline]
pub fn goodness(turn: Color, rate: i32) -> i32 {
    match turn {
        Color::White => 1 + rate,
        Color::Black => 1 - rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goodness_is_oriented_to_mover() {
        assert_eq!(goodness(Color::White, 3), 4);
        assert_eq!(goodness(Color::Black, 3), -2);
        assert_eq!(goodness(Color::Black, -WIN_SCORE), 1 + WIN_SCORE);
    }

    #[test]
    fn stats_merge_adds_up() {
        let mut a = SearchStats {
            evaluated: 3,
            cutoffs: 1,
            nodes: 10,
        };
        a.merge(&SearchStats {
            evaluated: 2,
            cutoffs: 0,
            nodes: 5,
        });
        assert_eq!(
            a,
            SearchStats {
                evaluated: 5,
                cutoffs: 1,
                nodes: 15
            }
        );
        let later = SearchStats {
            evaluated: 9,
            cutoffs: 4,
            nodes: 30,
        };
        assert_eq!(
            later.since(&a),
            SearchStats {
                evaluated: 4,
                cutoffs: 3,
                nodes: 15
            }
        );
    }
}
