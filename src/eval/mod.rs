//! Evaluation module for Gobang positions
//!
//! This module provides shape recognition and scoring:
//! - A compiled shape table over own/empty/blocked line symbols
//! - Incrementally maintained per-line score accumulators
//! - Per-point tactical scores used for move ordering

pub mod heuristic;
pub mod patterns;

pub use heuristic::{line_slot, point_score, LineScores, ScoreDelta, LINE_SLOTS};
pub use patterns::{Shape, ShapeScore, ShapeTable, Symbol, PATTERNS};
