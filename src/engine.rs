//! Game session facade
//!
//! [`Gomoku`] owns the current [`Position`] and a [`Searcher`] and exposes the
//! small interface a front-end needs: legality checks, playing and taking back
//! moves, game-state queries and asking the engine for a move.
//!
//! # Example
//!
//! ```
//! use gobang::{EngineConfig, Gomoku, GameState, Pos, Stone};
//!
//! let config = EngineConfig { max_depth: 2, tt_size_mb: 1, ..EngineConfig::default() };
//! let mut game = Gomoku::with_config(config).unwrap();
//!
//! // The engine opens in the centre
//! let first = game.ai(Stone::Black).unwrap();
//! assert_eq!(first, Pos::CENTER);
//! game.play(first, Stone::Black);
//!
//! let reply = game.ai(Stone::White).unwrap();
//! game.play(reply, Stone::White);
//! assert_eq!(game.game_state(reply, Stone::White), GameState::Undecided);
//! assert_eq!(game.last_stone(), Some(reply));
//! ```

use std::time::Instant;

use log::{info, warn};

use crate::board::{Pos, Stone};
use crate::config::EngineConfig;
use crate::error::{GomokuError, Result};
use crate::position::Position;
use crate::rules::{find_five_line_at_pos, GameState};
use crate::search::{SearchResult, SearchStats, Searcher, TTStats};

/// How the engine arrived at its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Empty board: the centre point, no search
    Opening,
    /// Full negamax search
    Search,
    /// Board full, nothing to play
    NoMove,
}

/// Engine move with search metadata.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Chosen move, if any
    pub best_move: Option<Pos>,
    /// Root score from the mover's point of view
    pub score: i32,
    pub kind: MoveKind,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
    pub stats: SearchStats,
}

impl MoveResult {
    #[inline]
    fn opening(time_ms: u64) -> Self {
        Self {
            best_move: Some(Pos::CENTER),
            score: 0,
            kind: MoveKind::Opening,
            time_ms,
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    fn no_move(time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            kind: MoveKind::NoMove,
            time_ms,
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    fn from_search(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            kind: MoveKind::Search,
            time_ms,
            nodes: result.nodes,
            stats: result.stats,
        }
    }
}

/// A game in progress together with the engine that plays it.
pub struct Gomoku {
    position: Position,
    searcher: Searcher,
}

impl Gomoku {
    /// New game with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = EngineConfig::default();
        Self {
            position: Position::new(),
            searcher: Searcher::new(config),
        }
    }

    /// New game with a custom configuration.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        Self::with_position(config, Position::new())
    }

    /// Continue a game from `position`.
    pub fn with_position(config: EngineConfig, position: Position) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            position,
            searcher: Searcher::new(config),
        })
    }

    /// Whether `(row, col)` lies on the board.
    #[inline]
    #[must_use]
    pub fn is_legal(row: i32, col: i32) -> bool {
        Pos::is_valid(row, col)
    }

    /// Place `stone` at the vacant point `pos`.
    ///
    /// The point must be vacant; use [`try_play`](Self::try_play) for
    /// unvalidated input.
    pub fn play(&mut self, pos: Pos, stone: Stone) {
        self.position.play(pos, stone);
    }

    /// Validate and play a move given in signed coordinates.
    pub fn try_play(&mut self, row: i32, col: i32, stone: Stone) -> Result<Pos> {
        if !Self::is_legal(row, col) {
            warn!("rejected move off the board: ({}, {})", row, col);
            return Err(GomokuError::OutOfBounds { row, col });
        }
        if stone == Stone::Empty {
            return Err(GomokuError::EmptyStone);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pos = Pos::new(row as u8, col as u8);
        if !self.position.board().is_empty(pos) {
            warn!("rejected move on occupied point {}", pos);
            return Err(GomokuError::Occupied(pos));
        }
        self.play(pos, stone);
        Ok(pos)
    }

    /// Take back up to `steps` moves, returning how many were taken back.
    pub fn back(&mut self, steps: usize) -> usize {
        self.position.undo_n(steps)
    }

    /// Take back exactly `steps` moves, or none if fewer were played.
    pub fn try_back(&mut self, steps: usize) -> Result<()> {
        let available = self.position.board().stone_count();
        if steps > available {
            warn!("cannot take back {} moves, only {} played", steps, available);
            return Err(GomokuError::NothingToUndo {
                requested: steps,
                available,
            });
        }
        self.back(steps);
        Ok(())
    }

    /// Outcome after `stone` played at `pos`.
    #[must_use]
    pub fn game_state(&self, pos: Pos, stone: Stone) -> GameState {
        self.position.game_state(pos, stone)
    }

    /// The engine's move for `color`. The move is not played.
    pub fn ai(&mut self, color: Stone) -> Option<Pos> {
        self.ai_with_stats(color).best_move
    }

    /// The engine's move for `color` with search statistics.
    ///
    /// On an empty board the engine opens in the centre without searching;
    /// on a full board there is no move.
    pub fn ai_with_stats(&mut self, color: Stone) -> MoveResult {
        let start = Instant::now();
        let board = self.position.board();

        if board.is_full() {
            return MoveResult::no_move(start.elapsed().as_millis() as u64);
        }
        if self.position.frontier().is_empty() {
            info!("{} opens at {}", color, Pos::CENTER);
            return MoveResult::opening(start.elapsed().as_millis() as u64);
        }

        let result = self.searcher.search(&mut self.position, color);
        let result = MoveResult::from_search(result, start.elapsed().as_millis() as u64);
        info!(
            "{} plays {:?} score={} nodes={} time={}ms",
            color, result.best_move, result.score, result.nodes, result.time_ms
        );
        result
    }

    /// Most recently played point.
    #[inline]
    #[must_use]
    pub fn last_stone(&self) -> Option<Pos> {
        self.position.board().last_move()
    }

    /// Stone at `pos`.
    #[inline]
    #[must_use]
    pub fn check_stone(&self, pos: Pos) -> Stone {
        self.position.board().get(pos)
    }

    /// The five aligned stones through `pos` if `stone` has won there.
    #[must_use]
    pub fn winning_line(&self, pos: Pos, stone: Stone) -> Option<[Pos; 5]> {
        find_five_line_at_pos(self.position.board(), pos, stone)
    }

    /// Whether `stone` is making its first move: nothing has been played yet,
    /// or only a single opponent stone.
    #[must_use]
    pub fn is_initial(&self, stone: Stone) -> bool {
        match self.position.board().history() {
            [] => true,
            [only] => self.check_stone(*only) != stone,
            _ => false,
        }
    }

    /// Start a new game, keeping the configuration.
    pub fn reset(&mut self) {
        self.position = Position::with_table(self.position.table().clone());
        self.searcher.clear_tt();
    }

    /// Clear the transposition table.
    pub fn clear_cache(&mut self) {
        self.searcher.clear_tt();
    }

    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.searcher.tt_stats()
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        self.searcher.config()
    }
}

impl Default for Gomoku {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(max_depth: u8) -> Gomoku {
        Gomoku::with_config(EngineConfig {
            max_depth,
            tt_size_mb: 1,
            ..EngineConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_engine_creation() {
        let game = Gomoku::new();
        assert_eq!(game.config(), &EngineConfig::default());
        assert!(game.position().board().is_board_empty());
        assert_eq!(game.last_stone(), None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            max_depth: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            Gomoku::with_config(config),
            Err(GomokuError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_is_legal() {
        assert!(Gomoku::is_legal(0, 0));
        assert!(Gomoku::is_legal(14, 14));
        assert!(!Gomoku::is_legal(-1, 3));
        assert!(!Gomoku::is_legal(3, 15));
    }

    #[test]
    fn test_opening_move_is_center() {
        let mut game = game(2);
        let result = game.ai_with_stats(Stone::Black);
        assert_eq!(result.best_move, Some(Pos::CENTER));
        assert_eq!(result.kind, MoveKind::Opening);
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let mut game = game(2);
        for col in 3..7 {
            game.play(Pos::new(4, col), Stone::White);
        }
        game.play(Pos::new(4, 2), Stone::Black);
        game.play(Pos::new(10, 10), Stone::Black);

        let result = game.ai_with_stats(Stone::White);
        assert_eq!(result.kind, MoveKind::Search);
        assert_eq!(result.best_move, Some(Pos::new(4, 7)));

        game.play(Pos::new(4, 7), Stone::White);
        assert_eq!(game.game_state(Pos::new(4, 7), Stone::White), GameState::Win);
        let line = game.winning_line(Pos::new(4, 7), Stone::White).unwrap();
        assert_eq!(line[0], Pos::new(4, 3));
        assert_eq!(line[4], Pos::new(4, 7));
    }

    #[test]
    fn test_engine_blocks_open_three() {
        let mut game = game(2);
        game.play(Pos::new(7, 7), Stone::Black);
        game.play(Pos::new(8, 8), Stone::White);
        game.play(Pos::new(7, 8), Stone::Black);
        game.play(Pos::new(9, 9), Stone::White);
        game.play(Pos::new(7, 9), Stone::Black);

        let reply = game.ai(Stone::White).unwrap();
        assert!(game.position().board().is_empty(reply));
        // Position untouched by the search
        assert_eq!(game.position().board().stone_count(), 5);
        assert_eq!(game.last_stone(), Some(Pos::new(7, 9)));
    }

    #[test]
    fn test_try_play_validation() {
        let mut game = game(2);
        assert_eq!(
            game.try_play(-1, 0, Stone::Black),
            Err(GomokuError::OutOfBounds { row: -1, col: 0 })
        );
        assert_eq!(game.try_play(3, 3, Stone::Empty), Err(GomokuError::EmptyStone));
        assert_eq!(game.try_play(3, 3, Stone::Black), Ok(Pos::new(3, 3)));
        assert_eq!(
            game.try_play(3, 3, Stone::White),
            Err(GomokuError::Occupied(Pos::new(3, 3)))
        );
        assert_eq!(game.check_stone(Pos::new(3, 3)), Stone::Black);
    }

    #[test]
    fn test_back_and_try_back() {
        let mut game = game(2);
        game.play(Pos::new(7, 7), Stone::Black);
        game.play(Pos::new(7, 8), Stone::White);
        game.play(Pos::new(8, 8), Stone::Black);

        assert_eq!(
            game.try_back(4),
            Err(GomokuError::NothingToUndo {
                requested: 4,
                available: 3
            })
        );
        assert_eq!(game.position().board().stone_count(), 3);

        assert!(game.try_back(2).is_ok());
        assert_eq!(game.last_stone(), Some(Pos::new(7, 7)));
        assert_eq!(game.back(5), 1);
        assert_eq!(game.last_stone(), None);
    }

    #[test]
    fn test_is_initial() {
        let mut game = game(2);
        assert!(game.is_initial(Stone::Black));
        assert!(game.is_initial(Stone::White));

        game.play(Pos::CENTER, Stone::Black);
        assert!(game.is_initial(Stone::White));
        assert!(!game.is_initial(Stone::Black));

        game.play(Pos::new(7, 8), Stone::White);
        assert!(!game.is_initial(Stone::White));
    }

    #[test]
    fn test_cache_maintenance() {
        let mut game = game(3);
        game.play(Pos::new(7, 7), Stone::Black);
        game.ai(Stone::White);
        assert!(game.tt_stats().used > 0);

        game.clear_cache();
        assert_eq!(game.tt_stats().used, 0);
    }

    #[test]
    fn test_continue_from_cloned_position() {
        let mut game = game(2);
        game.play(Pos::new(7, 7), Stone::Black);
        game.play(Pos::new(7, 8), Stone::White);
        game.play(Pos::new(8, 8), Stone::Black);

        let mut worker = Gomoku::with_position(*game.config(), game.position().clone()).unwrap();
        let from_worker = worker.ai(Stone::White);
        assert_eq!(from_worker, game.ai(Stone::White));
        assert_eq!(worker.position().hash(), game.position().hash());
    }

    #[test]
    fn test_reset() {
        let mut game = game(2);
        game.play(Pos::new(7, 7), Stone::Black);
        game.ai(Stone::White);
        game.reset();
        assert!(game.position().board().is_board_empty());
        assert_eq!(game.position().hash(), 0);
        assert_eq!(game.tt_stats().used, 0);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut game = game(1);
        for r in 0..15u8 {
            for c in 0..15u8 {
                let stone = if (c / 2 + r) % 2 == 0 { Stone::Black } else { Stone::White };
                game.play(Pos::new(r, c), stone);
            }
        }
        let result = game.ai_with_stats(Stone::Black);
        assert_eq!(result.kind, MoveKind::NoMove);
        assert!(result.best_move.is_none());
        let last = Pos::new(14, 14);
        assert_eq!(game.game_state(last, game.check_stone(last)), GameState::Draw);
    }
}
