//! Negamax alpha-beta search with transposition table
//!
//! This module implements the core search algorithm for the Gobang AI: a
//! fixed-depth negamax with fail-hard alpha-beta pruning. Candidate moves come
//! from the position's frontier, ordered by their point score, and the number
//! visited shrinks by one per ply below the root.
//!
//! # Example
//!
//! ```
//! use gobang::board::{Pos, Stone};
//! use gobang::config::EngineConfig;
//! use gobang::position::Position;
//! use gobang::search::Searcher;
//!
//! let config = EngineConfig { max_depth: 2, tt_size_mb: 1, ..EngineConfig::default() };
//! let mut searcher = Searcher::new(config);
//! let mut position = Position::new();
//! position.play(Pos::CENTER, Stone::Black);
//!
//! let result = searcher.search(&mut position, Stone::White);
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: {best_move}");
//! }
//! assert_eq!(position.board().stone_count(), 1);
//! ```

use log::debug;

use crate::board::{Pos, Stone};
use crate::config::EngineConfig;
use crate::eval::ShapeScore;
use crate::position::Position;

use super::{EntryType, TTStats, TranspositionTable};

/// Margin kept between a decided game and the search bounds. Shorter wins
/// score higher, so the distance to the bound grows with the ply.
const MATE_MARGIN: i32 = 1_000;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Total beta cutoffs (fail-high)
    pub beta_cutoffs: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes that returned a usable score
    pub tt_hits: u64,
    /// Entries written to the TT
    pub tt_stores: u64,
}

impl SearchStats {
    /// TT hit rate in percent
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_hits as f64 / self.tt_probes as f64 * 100.0
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Score of the root from the mover's point of view
    pub score: i32,
    /// Total nodes searched
    pub nodes: u64,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Search context: configuration, transposition table and per-search counters.
///
/// The table persists across searches; the counters are reset by each
/// [`search`](Self::search).
pub struct Searcher {
    config: EngineConfig,
    tt: TranspositionTable,
    nodes: u64,
    stats: SearchStats,
    best_move: Option<Pos>,
}

impl Searcher {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            tt: TranspositionTable::new(config.tt_size_mb),
            nodes: 0,
            stats: SearchStats::default(),
            best_move: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Search `position` to the configured depth with `color` to move.
    ///
    /// The position is returned exactly as it was given. When the root is
    /// already decided no move improves on the window, so the best-ordered
    /// candidate is reported instead.
    pub fn search(&mut self, position: &mut Position, color: Stone) -> SearchResult {
        self.nodes = 0;
        self.stats = SearchStats::default();
        self.best_move = None;

        let depth = self.config.max_depth;
        let score = self.negamax(position, color, depth, ShapeScore::MIN, ShapeScore::MAX);

        let best_move = self
            .best_move
            .or_else(|| position.candidates().first().map(|&(pos, _)| pos));

        debug!(
            "search {} depth={} score={} best={:?} nodes={} cutoffs={} tt={}/{}",
            color,
            depth,
            score,
            best_move,
            self.nodes,
            self.stats.beta_cutoffs,
            self.stats.tt_hits,
            self.stats.tt_probes
        );

        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
            stats: self.stats.clone(),
        }
    }

    /// Negamax with fail-hard alpha-beta.
    ///
    /// `depth` is the remaining depth; the root is the node with
    /// `depth == max_depth`. Every move played here is taken back before
    /// returning, on every path.
    fn negamax(
        &mut self,
        position: &mut Position,
        color: Stone,
        depth: u8,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;

        let max_depth = self.config.max_depth;
        let ply = i32::from(max_depth - depth);
        let key = position.key(color);

        // TT probe, never at the root so a best move is always produced
        if self.config.use_transposition && depth != max_depth {
            self.stats.tt_probes += 1;
            if let Some(score) = self.tt.probe(key, depth).and_then(|e| e.cutoff(alpha, beta)) {
                self.stats.tt_hits += 1;
                return score;
            }
        }

        let own = position.evaluate(color);
        let other = position.evaluate(color.opponent());
        if own >= ShapeScore::FIVE {
            return ShapeScore::MAX - MATE_MARGIN - ply;
        }
        if other >= ShapeScore::FIVE {
            return ShapeScore::MIN + MATE_MARGIN + ply;
        }

        if depth == 0 {
            let score = own - other;
            self.store(key, depth, score, EntryType::Exact);
            return score;
        }

        let mut limit = self.config.branch_base as i32 - ply;
        let mut bound = EntryType::UpperBound;

        for (pos, _) in position.candidates() {
            let score = {
                let mut child = position.play_scoped(pos, color);
                -self.negamax(&mut child, color.opponent(), depth - 1, -beta, -alpha)
            };

            if score >= beta {
                self.stats.beta_cutoffs += 1;
                self.store(key, depth, score, EntryType::LowerBound);
                return beta;
            }

            if score > alpha {
                if depth == max_depth {
                    self.best_move = Some(pos);
                }
                alpha = score;
                bound = EntryType::Exact;
            }

            limit -= 1;
            if limit < 0 {
                break;
            }
        }

        self.store(key, depth, alpha, bound);
        alpha
    }

    #[inline]
    fn store(&mut self, key: u64, depth: u8, score: i32, bound: EntryType) {
        if self.config.use_transposition {
            self.stats.tt_stores += 1;
            self.tt.store(key, depth, score, bound);
        }
    }

    /// Get transposition table statistics
    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    /// Clear the transposition table
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{MoveGenerator, ZobristTable};

    fn searcher(max_depth: u8) -> Searcher {
        Searcher::new(EngineConfig {
            max_depth,
            tt_size_mb: 1,
            ..EngineConfig::default()
        })
    }

    fn position_with(black: &[(u8, u8)], white: &[(u8, u8)]) -> Position {
        let mut position = Position::new();
        for &(r, c) in black {
            position.play(Pos::new(r, c), Stone::Black);
        }
        for &(r, c) in white {
            position.play(Pos::new(r, c), Stone::White);
        }
        position
    }

    #[test]
    fn test_leaf_is_score_difference() {
        let mut position = position_with(&[(7, 7), (7, 8), (8, 8)], &[(6, 6), (9, 9)]);
        let expected = position.evaluate(Stone::White) - position.evaluate(Stone::Black);

        let mut searcher = searcher(4);
        let score = searcher.negamax(&mut position, Stone::White, 0, ShapeScore::MIN, ShapeScore::MAX);
        assert_eq!(score, expected);
        assert_eq!(searcher.nodes, 1);
    }

    #[test]
    fn test_search_empty_board_has_no_move() {
        let mut position = Position::new();
        let result = searcher(3).search(&mut position, Stone::Black);
        assert!(result.best_move.is_none());
    }

    #[test]
    fn test_search_finds_winning_move() {
        let mut position = position_with(&[(9, 0), (9, 1), (9, 2), (9, 3)], &[(3, 3), (3, 4), (12, 12)]);

        let result = searcher(2).search(&mut position, Stone::Black);
        assert_eq!(result.best_move, Some(Pos::new(9, 4)));
        assert_eq!(result.score, ShapeScore::MAX - MATE_MARGIN - 1);
    }

    #[test]
    fn test_search_blocks_opponent_four() {
        let mut position = position_with(
            &[(7, 2), (10, 10), (11, 11)],
            &[(7, 3), (7, 4), (7, 5), (7, 6)],
        );

        let result = searcher(2).search(&mut position, Stone::Black);
        assert_eq!(result.best_move, Some(Pos::new(7, 7)));
    }

    #[test]
    fn test_lost_position_scores_near_minimum() {
        // White has an open four; black cannot stop both ends
        let mut position = position_with(&[(0, 0), (0, 1), (14, 14)], &[(7, 4), (7, 5), (7, 6), (7, 7)]);

        let result = searcher(3).search(&mut position, Stone::Black);
        assert!(result.score <= ShapeScore::MIN + MATE_MARGIN + 3);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_search_leaves_position_untouched() {
        let mut position = position_with(&[(7, 7), (8, 8), (6, 8)], &[(7, 8), (9, 9)]);
        let board = position.board().clone();
        let hash = position.hash();
        let scores = position.scores().clone();
        let frontier = position.frontier().clone();

        let result = searcher(3).search(&mut position, Stone::White);
        assert!(result.nodes > 1);

        assert_eq!(position.board(), &board);
        assert_eq!(position.board().history(), board.history());
        assert_eq!(position.hash(), hash);
        assert_eq!(position.hash(), ZobristTable::new().hash(position.board()));
        assert_eq!(position.scores(), &scores);
        assert_eq!(position.frontier(), &frontier);
        assert_eq!(position.frontier(), &MoveGenerator::for_board(position.board()));
    }

    #[test]
    fn test_cache_does_not_change_result() {
        let black = [(7, 7), (8, 8), (6, 8), (9, 6)];
        let white = [(7, 8), (9, 9), (5, 9)];

        for depth in 2..=4 {
            let mut with_tt = searcher(depth);
            let mut without_tt = Searcher::new(EngineConfig {
                use_transposition: false,
                ..*with_tt.config()
            });

            let mut position = position_with(&black, &white);
            let cached = with_tt.search(&mut position, Stone::Black);
            let plain = without_tt.search(&mut position, Stone::Black);

            assert_eq!(cached.score, plain.score, "depth {depth}");
            assert_eq!(cached.best_move, plain.best_move, "depth {depth}");
            assert!(cached.stats.tt_stores > 0);
            assert_eq!(plain.stats.tt_probes, 0);
            assert_eq!(without_tt.tt_stats().used, 0);
        }
    }

    #[test]
    fn test_branching_narrows_with_ply() {
        // Root visits branch_base + 1 children, each of those branch_base
        let mut position = position_with(&[(7, 7), (7, 9)], &[(8, 8)]);
        let mut searcher = Searcher::new(EngineConfig {
            max_depth: 2,
            branch_base: 3,
            tt_size_mb: 1,
            use_transposition: false,
        });
        let result = searcher.search(&mut position, Stone::White);
        // Upper bound: 1 root + 4 children + 4 * 3 grandchildren
        assert!(result.nodes <= 1 + 4 + 4 * 3);
        assert!(result.nodes > 1 + 4);
    }

    #[test]
    fn test_repeated_search_is_stable() {
        let mut position = position_with(&[(7, 7), (8, 8)], &[(7, 8)]);
        let mut searcher = searcher(3);
        let first = searcher.search(&mut position, Stone::White);
        let second = searcher.search(&mut position, Stone::White);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
        assert!(searcher.tt_stats().used > 0);

        searcher.clear_tt();
        assert_eq!(searcher.tt_stats().used, 0);
    }
}
