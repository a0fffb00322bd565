//! Board structure with vacancy tracking and move history

use super::bitboard::Bitboard;
use super::{Pos, Stone, BOARD_SIZE};

/// Game board: stone grid, vacant cells and the stack of played points.
///
/// Invariant: a cell is in `vacancies` iff it holds `Stone::Empty` iff it does
/// not appear in `history`.
#[derive(Debug, Clone)]
pub struct Board {
    grid: [[Stone; BOARD_SIZE]; BOARD_SIZE],
    vacancies: Bitboard,
    /// Played points, most recent last
    history: Vec<Pos>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            grid: [[Stone::Empty; BOARD_SIZE]; BOARD_SIZE],
            vacancies: Bitboard::full(),
            history: Vec::with_capacity(BOARD_SIZE * BOARD_SIZE),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.grid[pos.row as usize][pos.col as usize]
    }

    /// Stone at signed coordinates, `None` when off the board
    #[inline]
    pub fn get_signed(&self, row: i32, col: i32) -> Option<Stone> {
        if Pos::is_valid(row, col) {
            Some(self.grid[row as usize][col as usize])
        } else {
            None
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Place a stone on a vacant point and push it onto the history.
    ///
    /// The point must be vacant and `stone` must not be `Stone::Empty`.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        debug_assert!(self.is_empty(pos), "{pos} is already occupied");
        debug_assert!(stone != Stone::Empty, "cannot place an empty stone");
        self.vacancies.clear(pos);
        self.history.push(pos);
        self.grid[pos.row as usize][pos.col as usize] = stone;
    }

    /// Pop the most recent stone, returning its point and color.
    #[inline]
    pub fn take_back(&mut self) -> Option<(Pos, Stone)> {
        let pos = self.history.pop()?;
        let stone = self.get(pos);
        self.vacancies.set(pos);
        self.grid[pos.row as usize][pos.col as usize] = Stone::Empty;
        Some((pos, stone))
    }

    /// Vacant cells
    #[inline]
    pub fn vacancies(&self) -> &Bitboard {
        &self.vacancies
    }

    /// Played points, oldest first
    #[inline]
    pub fn history(&self) -> &[Pos] {
        &self.history
    }

    /// Most recently played point
    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().copied()
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.history.len()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Check if no vacancy remains
    #[inline]
    pub fn is_full(&self) -> bool {
        self.vacancies.is_empty()
    }

    /// True if no occupied cell lies within one step of `pos`.
    pub fn is_isolated(&self, pos: Pos) -> bool {
        pos.neighbors().all(|n| self.is_empty(n))
    }

    /// Stones of one color, in row-major order
    pub fn stones(&self, stone: Stone) -> impl Iterator<Item = Pos> + '_ {
        (0..BOARD_SIZE * BOARD_SIZE)
            .map(Pos::from_index)
            .filter(move |&pos| self.get(pos) == stone)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Board {
    /// Boards compare by occupancy; the order stones were played in is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
    }
}

impl Eq for Board {}
