//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when placing/removing stones.
//! This is essential for efficient transposition table lookups during search.
//!
//! # Example
//!
//! ```
//! use gobang::board::{Board, Stone, Pos};
//! use gobang::search::{Zobrist, ZobristTable};
//!
//! let mut zobrist = Zobrist::new(ZobristTable::new());
//! let mut board = Board::new();
//!
//! let pos = Pos::new(7, 7);
//! board.place_stone(pos, Stone::Black);
//! zobrist.translate(pos, Stone::Black);
//!
//! // Incremental update is equivalent to full recomputation
//! assert_eq!(zobrist.hash(), zobrist.table().hash(&board));
//!
//! // XOR is its own inverse
//! zobrist.translate(pos, Stone::Black);
//! assert_eq!(zobrist.hash(), 0);
//! ```

use crate::board::{Board, Pos, Stone, TOTAL_CELLS};

/// Zobrist key table.
///
/// Holds one fixed pseudorandom key per (position, stone color) pair, plus the
/// side-to-move keys mixed into transposition table keys.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    /// Random values for black stones at each position
    black: [u64; TOTAL_CELLS],
    /// Random values for white stones at each position
    white: [u64; TOTAL_CELLS],
    /// Random values identifying the side to move: [black, white]
    side: [u64; 2],
}

impl ZobristTable {
    /// Create a new Zobrist table with deterministic random values.
    ///
    /// Uses a linear congruential generator (LCG) with a fixed seed
    /// to ensure reproducible hashes across different runs.
    #[must_use]
    pub fn new() -> Self {
        // Constants from Knuth's MMIX LCG
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let mut next_rand = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            // The low bits of an LCG are weak; fold the high half in.
            seed ^ (seed >> 29)
        };

        let mut black = [0u64; TOTAL_CELLS];
        let mut white = [0u64; TOTAL_CELLS];

        for i in 0..TOTAL_CELLS {
            black[i] = next_rand();
            white[i] = next_rand();
        }

        let side = [next_rand(), next_rand()];

        Self { black, white, side }
    }

    /// Key for a stone of `stone` color at `pos`. Empty cells hash to 0.
    #[inline]
    #[must_use]
    pub fn key(&self, pos: Pos, stone: Stone) -> u64 {
        let idx = pos.to_index();
        match stone {
            Stone::Black => self.black[idx],
            Stone::White => self.white[idx],
            Stone::Empty => 0,
        }
    }

    /// Key identifying `stone` as the side to move.
    #[inline]
    #[must_use]
    pub fn side_key(&self, stone: Stone) -> u64 {
        stone.color_index().map_or(0, |c| self.side[c])
    }

    /// Compute the full hash for a board position.
    ///
    /// This iterates over all stones on the board. During play the running
    /// [`Zobrist`] fingerprint is updated incrementally instead.
    #[must_use]
    pub fn hash(&self, board: &Board) -> u64 {
        board
            .history()
            .iter()
            .fold(0u64, |h, &pos| h ^ self.key(pos, board.get(pos)))
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Running board fingerprint.
#[derive(Debug, Clone)]
pub struct Zobrist {
    table: ZobristTable,
    hash: u64,
}

impl Zobrist {
    /// Fingerprint of the empty board.
    #[must_use]
    pub fn new(table: ZobristTable) -> Self {
        Self { table, hash: 0 }
    }

    /// Fingerprint of an arbitrary board.
    #[must_use]
    pub fn for_board(table: ZobristTable, board: &Board) -> Self {
        let hash = table.hash(board);
        Self { table, hash }
    }

    /// Current fingerprint
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Toggle the key for (`pos`, `stone`). Used both to add and to remove a stone.
    #[inline]
    pub fn translate(&mut self, pos: Pos, stone: Stone) {
        self.hash ^= self.table.key(pos, stone);
    }

    #[inline]
    pub fn table(&self) -> &ZobristTable {
        &self.table
    }
}
