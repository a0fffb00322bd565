//! Transposition Table for caching search results
//!
//! The transposition table stores search results indexed by position key,
//! enabling reuse of previous search results for positions we've seen before.
//! An entry is only reused at exactly the remaining depth it was stored with.
//!
//! # Example
//!
//! ```
//! use gobang::search::{EntryType, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1); // 1 MB
//!
//! let key = 0x1234_5678_9ABC_DEF0;
//! tt.store(key, 5, 100, EntryType::Exact);
//!
//! let entry = tt.probe(key, 5).unwrap();
//! assert_eq!(entry.score, 100);
//! assert!(tt.probe(key, 4).is_none());
//! ```

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed normally
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Full key of the position, checked on every probe
    pub key: u64,
    /// Remaining search depth for this entry
    pub depth: u8,
    /// Evaluation score from the side to move
    pub score: i32,
    /// Type of score (exact, lower bound, upper bound)
    pub entry_type: EntryType,
}

impl TTEntry {
    /// Score usable inside the `(alpha, beta)` window, in fail-hard form.
    ///
    /// Exact entries return their score, a lower bound at or above `beta`
    /// returns `beta`, an upper bound at or below `alpha` returns `alpha`.
    #[must_use]
    pub fn cutoff(&self, alpha: i32, beta: i32) -> Option<i32> {
        match self.entry_type {
            EntryType::Exact => Some(self.score),
            EntryType::LowerBound if self.score >= beta => Some(beta),
            EntryType::UpperBound if self.score <= alpha => Some(alpha),
            _ => None,
        }
    }
}

/// Transposition table for caching search results.
///
/// Direct-mapped: each key maps to exactly one slot and a store always
/// overwrites it. Probes compare the full stored key, so two positions that
/// share a slot never alias.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    ///
    /// ```
    /// use gobang::search::TranspositionTable;
    ///
    /// let tt = TranspositionTable::new(16); // 16 MB table
    /// assert_eq!(tt.stats().used, 0);
    /// ```
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let size = (size_mb * 1024 * 1024) / entry_size;

        // Ensure at least some entries
        let size = size.max(1024);

        Self {
            entries: vec![None; size],
            size,
        }
    }

    #[inline]
    fn slot(&self, key: u64) -> usize {
        (key % self.size as u64) as usize
    }

    /// Entry stored for `key`, whatever its depth.
    #[must_use]
    pub fn get(&self, key: u64) -> Option<TTEntry> {
        self.entries[self.slot(key)].filter(|e| e.key == key)
    }

    /// Entry stored for `key` at exactly `depth`.
    #[must_use]
    pub fn probe(&self, key: u64, depth: u8) -> Option<TTEntry> {
        self.get(key).filter(|e| e.depth == depth)
    }

    /// Whether a usable entry exists for `key` at `depth`.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: u64, depth: u8) -> bool {
        self.probe(key, depth).is_some()
    }

    /// Store a result, replacing whatever occupied the slot.
    pub fn store(&mut self, key: u64, depth: u8, score: i32, entry_type: EntryType) {
        let idx = self.slot(key);
        self.entries[idx] = Some(TTEntry {
            key,
            depth,
            score,
            entry_type,
        });
    }

    /// Clear all entries in the table.
    ///
    /// This should be called when starting a new game or when the
    /// table becomes stale.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size: self.size,
            used,
            usage_percent: (used as f64 / self.size as f64 * 100.0) as u8,
        }
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}
