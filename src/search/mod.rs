//! Search module for Gobang AI
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results
//! - Frontier move generation
//! - Negamax alpha-beta search

pub mod alphabeta;
pub mod frontier;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchResult, SearchStats, Searcher};
pub use frontier::{FrontierDelta, MoveGenerator};
pub use tt::{EntryType, TTEntry, TTStats, TranspositionTable};
pub use zobrist::{Zobrist, ZobristTable};
