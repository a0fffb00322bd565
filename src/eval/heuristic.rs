//! Incremental line scoring
//!
//! Every full line of the board (15 rows, 15 columns, and the 21 + 21
//! diagonals long enough to hold a five) owns one slot per color. A slot always
//! holds the shape score of its line as currently occupied; a color's total is
//! the sum of its slots. Placing or removing a stone only changes the up-to-4
//! lines through that point, so only those slots are rescanned.

use smallvec::SmallVec;

use crate::board::{Board, Pos, Stone, BOARD_SIZE, DIRECTIONS, TOTAL_CELLS};

use super::patterns::{ShapeTable, Symbol};

/// Number of scored lines: rows, columns, diagonals and anti-diagonals.
pub const LINE_SLOTS: usize = 72;

/// Half-width of the window used for per-point scoring.
const WINDOW_RADIUS: i32 = 5;

/// Slot index of the line through `pos` along `DIRECTIONS[dir]`.
///
/// Diagonals shorter than five cells have no slot.
#[inline]
pub fn line_slot(pos: Pos, dir: usize) -> Option<usize> {
    let row = i32::from(pos.row);
    let col = i32::from(pos.col);
    let slot = match dir {
        0 => row,
        1 => col + BOARD_SIZE as i32,
        2 => {
            let d = row - col;
            if d.abs() > 10 {
                return None;
            }
            d + 40
        }
        3 => {
            let s = row + col;
            if !(4..=24).contains(&s) {
                return None;
            }
            s + 47
        }
        _ => return None,
    };
    #[allow(clippy::cast_sign_loss)]
    Some(slot as usize)
}

/// Symbols of the whole line through `pos` along `(dr, dc)`, as seen by `color`.
fn full_line(board: &Board, pos: Pos, (dr, dc): (i32, i32), color: Stone) -> SmallVec<[Symbol; 16]> {
    let mut start = pos;
    while let Some(prev) = start.offset(dr, dc, -1) {
        start = prev;
    }
    let mut line = SmallVec::new();
    let mut cursor = Some(start);
    while let Some(p) = cursor {
        line.push(Symbol::for_cell(Some(board.get(p)), color));
        cursor = p.offset(dr, dc, 1);
    }
    line
}

/// Previous values of one slot, kept so the change can be reverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotChange {
    slot: usize,
    previous: [i32; 2],
}

/// The slot changes caused by one stone.
pub type ScoreDelta = SmallVec<[SlotChange; 4]>;

/// Per-color line score accumulators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineScores {
    /// [color][slot]
    slots: [[i32; LINE_SLOTS]; 2],
    totals: [i32; 2],
}

impl LineScores {
    /// Accumulators for an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: [[0; LINE_SLOTS]; 2],
            totals: [0; 2],
        }
    }

    /// Rebuild every slot from scratch.
    #[must_use]
    pub fn recompute(board: &Board, table: &ShapeTable) -> Self {
        let mut scores = Self::new();
        for idx in 0..TOTAL_CELLS {
            scores.refresh(board, Pos::from_index(idx), table);
        }
        scores
    }

    /// Rescan the lines through `pos` and return what they held before.
    pub fn refresh(&mut self, board: &Board, pos: Pos, table: &ShapeTable) -> ScoreDelta {
        let mut delta = ScoreDelta::new();
        for (dir, &step) in DIRECTIONS.iter().enumerate() {
            let Some(slot) = line_slot(pos, dir) else {
                continue;
            };
            let black = table.score_line(&full_line(board, pos, step, Stone::Black));
            let white = table.score_line(&full_line(board, pos, step, Stone::White));
            delta.push(SlotChange {
                slot,
                previous: [self.slots[0][slot], self.slots[1][slot]],
            });
            self.set(slot, [black, white]);
        }
        delta
    }

    /// Undo a [`refresh`](Self::refresh).
    pub fn restore(&mut self, delta: &ScoreDelta) {
        for change in delta.iter().rev() {
            self.set(change.slot, change.previous);
        }
    }

    #[inline]
    fn set(&mut self, slot: usize, values: [i32; 2]) {
        for color in 0..2 {
            self.totals[color] += values[color] - self.slots[color][slot];
            self.slots[color][slot] = values[color];
        }
    }

    /// Total shape score of `stone` over the whole board.
    #[inline]
    pub fn total(&self, stone: Stone) -> i32 {
        stone.color_index().map_or(0, |c| self.totals[c])
    }

    /// Per-line scores of `stone`.
    pub fn slots(&self, stone: Stone) -> Option<&[i32; LINE_SLOTS]> {
        stone.color_index().map(|c| &self.slots[c])
    }
}

impl Default for LineScores {
    fn default() -> Self {
        Self::new()
    }
}

/// Tactical value of playing at `pos`, summed over both colors and all four
/// directions. Each direction looks at an 11-cell window centred on `pos`,
/// with `pos` itself counted as an own stone for both colors: a point is worth
/// as much as the shape it extends plus the shape it blocks.
#[must_use]
pub fn point_score(board: &Board, pos: Pos, table: &ShapeTable) -> i32 {
    let mut score = 0;
    for &(dr, dc) in &DIRECTIONS {
        for color in [Stone::Black, Stone::White] {
            let window: SmallVec<[Symbol; 11]> = (-WINDOW_RADIUS..=WINDOW_RADIUS)
                .map(|i| {
                    if i == 0 {
                        Symbol::Own
                    } else {
                        let cell = board.get_signed(
                            i32::from(pos.row) + dr * i,
                            i32::from(pos.col) + dc * i,
                        );
                        Symbol::for_cell(cell, color)
                    }
                })
                .collect();
            score += table.score_line(&window);
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::patterns::ShapeScore;

    #[test]
    fn test_slot_ranges() {
        assert_eq!(line_slot(Pos::new(3, 9), 0), Some(3));
        assert_eq!(line_slot(Pos::new(3, 9), 1), Some(24));
        assert_eq!(line_slot(Pos::new(3, 9), 2), Some(34));
        assert_eq!(line_slot(Pos::new(3, 9), 3), Some(59));
        // Corner diagonals are too short for a five
        assert_eq!(line_slot(Pos::new(0, 14), 2), None);
        assert_eq!(line_slot(Pos::new(0, 0), 3), None);
        assert_eq!(line_slot(Pos::new(14, 14), 3), None);
        assert_eq!(line_slot(Pos::new(14, 14), 2), Some(40));
    }

    #[test]
    fn test_slots_cover_every_line_once() {
        let mut seen = [false; LINE_SLOTS];
        for idx in 0..TOTAL_CELLS {
            for dir in 0..4 {
                if let Some(slot) = line_slot(Pos::from_index(idx), dir) {
                    seen[slot] = true;
                }
            }
        }
        // Slots 30..=50 are the diagonals, 51..=71 the anti-diagonals.
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_refresh_matches_recompute() {
        let table = ShapeTable::new();
        let mut board = Board::new();
        let mut scores = LineScores::new();
        let moves = [
            (Pos::new(7, 7), Stone::Black),
            (Pos::new(7, 8), Stone::White),
            (Pos::new(8, 8), Stone::Black),
            (Pos::new(6, 6), Stone::White),
            (Pos::new(9, 9), Stone::Black),
        ];
        for (pos, stone) in moves {
            board.place_stone(pos, stone);
            scores.refresh(&board, pos, &table);
            assert_eq!(scores, LineScores::recompute(&board, &table));
        }
    }

    #[test]
    fn test_restore_reverts_refresh() {
        let table = ShapeTable::new();
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        let mut scores = LineScores::recompute(&board, &table);
        let before = scores.clone();

        board.place_stone(Pos::new(7, 8), Stone::Black);
        let delta = scores.refresh(&board, Pos::new(7, 8), &table);
        assert_ne!(scores, before);

        scores.restore(&delta);
        assert_eq!(scores, before);
    }

    #[test]
    fn test_five_in_row_reaches_five_score() {
        let table = ShapeTable::new();
        let mut board = Board::new();
        for col in 3..8 {
            board.place_stone(Pos::new(4, col), Stone::White);
        }
        let scores = LineScores::recompute(&board, &table);
        assert!(scores.total(Stone::White) >= ShapeScore::FIVE);
        assert_eq!(scores.total(Stone::Black), 0);
        assert_eq!(scores.total(Stone::Empty), 0);
    }

    #[test]
    fn test_edge_counts_as_line_end() {
        let table = ShapeTable::new();
        let mut board = Board::new();
        for col in 0..4 {
            board.place_stone(Pos::new(0, col), Stone::Black);
        }
        let scores = LineScores::recompute(&board, &table);
        let row0 = scores.slots(Stone::Black).unwrap()[0];
        // 11110 at the edge is a closed four
        assert_eq!(row0, ShapeScore::FOUR);
    }

    #[test]
    fn test_point_score_prefers_contact() {
        let table = ShapeTable::new();
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::Black);
        let extend = point_score(&board, Pos::new(7, 9), &table);
        let far = point_score(&board, Pos::new(2, 2), &table);
        assert!(extend > far);
    }

    #[test]
    fn test_point_score_counts_both_colors() {
        let table = ShapeTable::new();
        let mut black = Board::new();
        let mut white = Board::new();
        for col in 5..8 {
            black.place_stone(Pos::new(7, col), Stone::Black);
            white.place_stone(Pos::new(7, col), Stone::White);
        }
        let target = Pos::new(7, 8);
        assert_eq!(point_score(&black, target, &table), point_score(&white, target, &table));
    }
}
