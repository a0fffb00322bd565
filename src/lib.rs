//! Gobang (five-in-a-row) AI engine
//!
//! A strategy engine for freestyle five-in-a-row on a 15x15 board:
//! - Five or more stones in a row win (overlines allowed)
//! - No forbidden moves, no captures
//! - A full board without a five is a draw
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with vacancy bitboard and move history
//! - [`eval`]: Shape table and incremental line scores
//! - [`rules`]: Win and draw detection
//! - [`search`]: Zobrist hashing, transposition table, frontier, negamax
//! - [`position`]: Reversible position tying board, scores, hash and frontier together
//! - [`engine`]: The [`Gomoku`] session facade used by front-ends
//!
//! # Quick Start
//!
//! ```
//! use gobang::{EngineConfig, Gomoku, Pos, Stone};
//!
//! let config = EngineConfig { max_depth: 3, tt_size_mb: 1, ..EngineConfig::default() };
//! let mut game = Gomoku::with_config(config).unwrap();
//!
//! game.play(Pos::new(7, 7), Stone::Black);
//!
//! // AI responds as White
//! if let Some(pos) = game.ai(Stone::White) {
//!     game.play(pos, Stone::White);
//!     println!("AI plays at {pos}");
//! }
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod position;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{Gomoku, MoveKind, MoveResult};
pub use error::{GomokuError, Result};
pub use position::Position;
pub use rules::GameState;
