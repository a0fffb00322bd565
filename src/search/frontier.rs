//! Incremental move frontier
//!
//! The frontier is the set of vacant cells touching at least one stone. It is
//! updated per move instead of rescanning the board, and each update returns
//! the exact change so it can be reverted.

use smallvec::SmallVec;

use crate::board::{Bitboard, Board, Pos};

/// What one move changed in the frontier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrontierDelta {
    /// Neighbours that were not in the frontier before the move
    pub added: SmallVec<[Pos; 8]>,
    /// Whether the played point itself left the frontier
    pub removed: bool,
}

/// Frontier move generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveGenerator {
    moves: Bitboard,
}

impl MoveGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the frontier of an arbitrary board.
    #[must_use]
    pub fn for_board(board: &Board) -> Self {
        let moves = board
            .vacancies()
            .iter_ones()
            .filter(|&p| !board.is_isolated(p))
            .collect();
        Self { moves }
    }

    /// Account for a stone just placed at `pos` on `board`.
    pub fn advance(&mut self, board: &Board, pos: Pos) -> FrontierDelta {
        let mut delta = FrontierDelta::default();
        for n in pos.neighbors() {
            if board.is_empty(n) && self.moves.insert(n) {
                delta.added.push(n);
            }
        }
        delta.removed = self.moves.remove(pos);
        delta
    }

    /// Revert the [`advance`](Self::advance) that produced `delta`.
    pub fn retreat(&mut self, pos: Pos, delta: &FrontierDelta) {
        for &p in &delta.added {
            self.moves.remove(p);
        }
        if delta.removed {
            self.moves.insert(pos);
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        self.moves.get(pos)
    }

    /// Current frontier cells in row-major order.
    pub fn generate(&self) -> impl Iterator<Item = Pos> + '_ {
        self.moves.iter_ones()
    }

    #[inline]
    pub fn as_bitboard(&self) -> &Bitboard {
        &self.moves
    }
}
