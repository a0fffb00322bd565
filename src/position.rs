//! Reversible game position
//!
//! [`Position`] bundles everything a move touches: the board, the per-line
//! scores, the Zobrist fingerprint and the move frontier. A move is applied to
//! all of them at once and journalled as a single [`MoveRecord`], so taking it
//! back restores every part together.
//!
//! ```
//! use gobang::board::{Pos, Stone};
//! use gobang::position::Position;
//!
//! let mut position = Position::new();
//! let hash = position.hash();
//! {
//!     let child = position.play_scoped(Pos::CENTER, Stone::Black);
//!     assert_eq!(child.board().stone_count(), 1);
//! } // taken back here
//! assert_eq!(position.hash(), hash);
//! assert!(position.board().is_board_empty());
//! ```

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::board::{Board, Pos, Stone};
use crate::eval::{point_score, LineScores, ScoreDelta, ShapeTable};
use crate::rules::{self, GameState};
use crate::search::{FrontierDelta, MoveGenerator, Zobrist, ZobristTable};

/// One applied move and everything needed to revert it.
#[derive(Debug, Clone)]
pub struct MoveRecord {
    pub pos: Pos,
    pub stone: Stone,
    frontier: FrontierDelta,
    scores: ScoreDelta,
}

/// Board plus its incrementally maintained derived state.
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    table: Arc<ShapeTable>,
    scores: LineScores,
    zobrist: Zobrist,
    frontier: MoveGenerator,
    journal: Vec<MoveRecord>,
}

impl Position {
    /// Empty position using the built-in shape table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_table(Arc::new(ShapeTable::new()))
    }

    /// Empty position scored with `table`.
    #[must_use]
    pub fn with_table(table: Arc<ShapeTable>) -> Self {
        Self {
            board: Board::new(),
            table,
            scores: LineScores::new(),
            zobrist: Zobrist::new(ZobristTable::new()),
            frontier: MoveGenerator::new(),
            journal: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn table(&self) -> &Arc<ShapeTable> {
        &self.table
    }

    #[inline]
    pub fn scores(&self) -> &LineScores {
        &self.scores
    }

    #[inline]
    pub fn frontier(&self) -> &MoveGenerator {
        &self.frontier
    }

    /// Applied moves, oldest first.
    #[inline]
    pub fn journal(&self) -> &[MoveRecord] {
        &self.journal
    }

    /// Fingerprint of the stones on the board.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.zobrist.hash()
    }

    /// Cache key for this position with `to_move` about to play.
    #[inline]
    pub fn key(&self, to_move: Stone) -> u64 {
        self.zobrist.hash() ^ self.zobrist.table().side_key(to_move)
    }

    /// Sum of the line scores of `stone`.
    #[inline]
    pub fn evaluate(&self, stone: Stone) -> i32 {
        self.scores.total(stone)
    }

    /// Place `stone` at the vacant point `pos`.
    pub fn play(&mut self, pos: Pos, stone: Stone) {
        self.board.place_stone(pos, stone);
        self.zobrist.translate(pos, stone);
        let scores = self.scores.refresh(&self.board, pos, &self.table);
        let frontier = self.frontier.advance(&self.board, pos);
        self.journal.push(MoveRecord {
            pos,
            stone,
            frontier,
            scores,
        });
    }

    /// Take back the most recent move.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let record = self.journal.pop()?;
        self.frontier.retreat(record.pos, &record.frontier);
        self.scores.restore(&record.scores);
        self.zobrist.translate(record.pos, record.stone);
        self.board.take_back();
        Some(record)
    }

    /// Take back up to `steps` moves, returning how many were undone.
    pub fn undo_n(&mut self, steps: usize) -> usize {
        (0..steps).take_while(|_| self.undo().is_some()).count()
    }

    /// Play a move that is taken back when the returned guard drops.
    pub fn play_scoped(&mut self, pos: Pos, stone: Stone) -> MoveGuard<'_> {
        self.play(pos, stone);
        MoveGuard { position: self }
    }

    /// Search candidates with their ordering scores, best first.
    ///
    /// Frontier cells that touch no stone are skipped. Ties go to the lower
    /// row, then the lower column.
    pub fn candidates(&self) -> Vec<(Pos, i32)> {
        let mut scored: Vec<(Pos, i32)> = self
            .frontier
            .generate()
            .filter(|&p| !self.board.is_isolated(p))
            .map(|p| (p, point_score(&self.board, p, &self.table)))
            .collect();
        scored.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        scored
    }

    /// Outcome after `stone` played at `pos`.
    #[inline]
    pub fn game_state(&self, pos: Pos, stone: Stone) -> GameState {
        rules::game_state(&self.board, pos, stone)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// A move that is undone when the guard goes out of scope.
///
/// Dereferences to the [`Position`] with the move applied.
pub struct MoveGuard<'a> {
    position: &'a mut Position,
}

impl Deref for MoveGuard<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.position
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.position
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.position.undo();
    }
}
