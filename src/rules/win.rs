//! Win condition checking
//!
//! Five or more stones in a row win (overlines allowed). Only the lines
//! through the most recent stone are examined: a five can only be created by
//! the stone just played.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Outcome of the game after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Board filled without a five
    Draw,
    /// Play continues
    Undecided,
    /// The stone just played completed five or more in a row
    Win,
}

/// Count of consecutive `color` stones from `pos` along `(dr, dc)`, excluding `pos`.
#[inline]
fn run_length(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> i32 {
    let mut count = 0;
    let mut step = 1;
    while let Some(p) = pos.offset(dr, dc, step) {
        if board.get(p) != color {
            break;
        }
        count += 1;
        step += 1;
    }
    count
}

/// Fast five-in-a-row check at a specific position.
///
/// `pos` itself is counted as a `color` stone.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, color: Stone) -> bool {
    DIRECTIONS.iter().any(|&(dr, dc)| {
        1 + run_length(board, pos, dr, dc, color) + run_length(board, pos, -dr, -dc, color) >= 5
    })
}

/// Game state after `color` played at `pos`.
#[must_use]
pub fn game_state(board: &Board, pos: Pos, color: Stone) -> GameState {
    if has_five_at_pos(board, pos, color) {
        GameState::Win
    } else if board.is_full() {
        GameState::Draw
    } else {
        GameState::Undecided
    }
}

/// The first five aligned stones of the winning run through `pos`, if any.
#[must_use]
pub fn find_five_line_at_pos(board: &Board, pos: Pos, color: Stone) -> Option<[Pos; 5]> {
    for &(dr, dc) in &DIRECTIONS {
        let back = run_length(board, pos, -dr, -dc, color);
        let forward = run_length(board, pos, dr, dc, color);
        if 1 + back + forward >= 5 {
            let start = pos.offset(dr, dc, -back)?;
            let mut line = [start; 5];
            for (i, slot) in line.iter_mut().enumerate() {
                *slot = start.offset(dr, dc, i as i32)?;
            }
            return Some(line);
        }
    }
    None
}
