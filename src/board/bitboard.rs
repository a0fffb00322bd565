//! Bitboard cell set
//!
//! Used for the vacancy set and the move frontier: O(1) insert/remove and
//! iteration in row-major order.

use super::{Pos, TOTAL_CELLS};

const WORDS: usize = (TOTAL_CELLS + 63) / 64;

/// Set of board cells, one bit per cell.
/// Uses 4 x u64 to represent 225 cells (4 * 64 = 256 >= 225)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitboard {
    bits: [u64; WORDS],
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Bitboard with every board cell set
    pub fn full() -> Self {
        let mut board = Self::new();
        for idx in 0..TOTAL_CELLS {
            board.set(Pos::from_index(idx));
        }
        board
    }

    #[inline]
    fn locate(pos: Pos) -> (usize, u64) {
        let idx = pos.to_index();
        (idx / 64, 1u64 << (idx % 64))
    }

    /// Set a bit at position
    #[inline]
    pub fn set(&mut self, pos: Pos) {
        let (word, mask) = Self::locate(pos);
        self.bits[word] |= mask;
    }

    /// Clear a bit at position
    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        let (word, mask) = Self::locate(pos);
        self.bits[word] &= !mask;
    }

    /// Set a bit, returning true if it was not already set
    #[inline]
    pub fn insert(&mut self, pos: Pos) -> bool {
        let fresh = !self.get(pos);
        self.set(pos);
        fresh
    }

    /// Clear a bit, returning true if it was set
    #[inline]
    pub fn remove(&mut self, pos: Pos) -> bool {
        let present = self.get(pos);
        self.clear(pos);
        present
    }

    /// Check if bit is set at position
    #[inline]
    pub fn get(&self, pos: Pos) -> bool {
        let (word, mask) = Self::locate(pos);
        self.bits[word] & mask != 0
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// True if every bit of `self` is also set in `other`
    pub fn is_subset(&self, other: &Bitboard) -> bool {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .all(|(a, b)| a & !b == 0)
    }

    /// Iterate over set bit positions
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter {
            bits: self.bits,
            word_idx: 0,
            current_word: self.bits[0],
        }
    }
}

impl FromIterator<Pos> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Pos>>(iter: I) -> Self {
        let mut board = Bitboard::new();
        for pos in iter {
            board.set(pos);
        }
        board
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: [u64; WORDS],
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitboardIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_word == 0 {
            self.word_idx += 1;
            if self.word_idx >= WORDS {
                return None;
            }
            self.current_word = self.bits[self.word_idx];
        }

        let bit_pos = self.current_word.trailing_zeros() as usize;
        let idx = self.word_idx * 64 + bit_pos;

        self.current_word &= self.current_word - 1;

        // Bits past the last cell are never set
        if idx < TOTAL_CELLS {
            Some(Pos::from_index(idx))
        } else {
            None
        }
    }
}
