//! Game rules for Gobang
//!
//! Free-style five-in-a-row: the first player to align five or more stones
//! wins; a full board without a five is a draw.

pub mod win;

pub use win::{find_five_line_at_pos, game_state, has_five_at_pos, GameState};
