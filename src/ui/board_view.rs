//! Board rendering for the Gobang GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::{Board, Gomoku, Pos, Stone, BOARD_SIZE};

use super::theme::*;

/// What the board should highlight this frame
pub struct BoardOverlay {
    pub to_move: Stone,
    pub last_move: Option<Pos>,
    pub winning_line: Option<[Pos; 5]>,
    pub accepts_input: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked point, if any
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, overlay: &BoardOverlay) -> Option<Pos> {
        let available_size = ui.available_size();

        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / (BOARD_SIZE as f32 - 1.0);

        let (response, painter) =
            ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_star_points(&painter);
        self.draw_coordinates(&painter);

        for stone in [Stone::Black, Stone::White] {
            for pos in board.stones(stone) {
                self.draw_stone(&painter, pos, stone);
            }
        }

        if let Some(pos) = overlay.last_move {
            painter.circle_filled(self.board_to_screen(pos), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }
        if let Some(line) = overlay.winning_line {
            self.draw_winning_line(&painter, &line);
        }

        if !overlay.accepts_input {
            return None;
        }

        let pos = self.screen_to_board(response.hover_pos()?)?;
        let playable = board.is_empty(pos);
        self.draw_hover_preview(&painter, pos, overlay.to_move, playable);

        (response.clicked() && playable).then_some(pos)
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let span = (BOARD_SIZE as f32 - 1.0) * self.cell_size;

        for i in 0..BOARD_SIZE {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            painter.line_segment([start, start + Vec2::new(0.0, span)], stroke);

            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            painter.line_segment([start, start + Vec2::new(span, 0.0)], stroke);
        }
    }

    fn draw_star_points(&self, painter: &Painter) {
        for (row, col) in STAR_POINTS {
            let center = self.board_to_screen(Pos::new(row, col));
            painter.circle_filled(center, STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// Column letters A-O along the top, row numbers 1-15 down the left
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for i in 0..BOARD_SIZE {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;
            let letter = (b'A' + i as u8) as char;

            let top = Pos2::new(self.board_rect.min.x + offset, self.board_rect.min.y + 12.0);
            painter.text(top, egui::Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);

            let left = Pos2::new(self.board_rect.min.x + 12.0, self.board_rect.min.y + offset);
            painter.text(left, egui::Align2::CENTER_CENTER, i + 1, font.clone(), GRID_LINE);
        }
    }

    fn draw_stone(&self, painter: &Painter, pos: Pos, stone: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;
        let shadow = center + Vec2::new(2.0, 2.0);

        match stone {
            Stone::Black => {
                painter.circle_filled(shadow, radius, Color32::from_rgba_unmultiplied(0, 0, 0, 60));
                painter.circle_filled(center, radius, BLACK_STONE);
                painter.circle_filled(
                    center + Vec2::new(-radius * 0.3, -radius * 0.3),
                    radius * 0.2,
                    BLACK_STONE_HIGHLIGHT,
                );
            }
            Stone::White => {
                painter.circle_filled(shadow, radius, Color32::from_rgba_unmultiplied(0, 0, 0, 40));
                painter.circle_filled(center, radius, WHITE_STONE);
                painter.circle_stroke(center, radius * 0.85, Stroke::new(radius * 0.1, WHITE_STONE_SHADOW));
            }
            Stone::Empty => {}
        }
    }

    fn draw_winning_line(&self, painter: &Painter, line: &[Pos; 5]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);
        for pair in line.windows(2) {
            painter.line_segment([self.board_to_screen(pair[0]), self.board_to_screen(pair[1])], stroke);
        }
        let radius = self.cell_size * STONE_RADIUS_RATIO + 3.0;
        for pos in line {
            painter.circle_stroke(self.board_to_screen(*pos), radius, stroke);
        }
    }

    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, turn: Stone, playable: bool) {
        let color = match (playable, turn) {
            (false, _) => hover_invalid(),
            (true, Stone::Black) => Color32::from_rgba_unmultiplied(20, 20, 20, 80),
            (true, Stone::White) => Color32::from_rgba_unmultiplied(240, 240, 240, 80),
            (true, Stone::Empty) => return,
        };
        painter.circle_filled(self.board_to_screen(pos), self.cell_size * STONE_RADIUS_RATIO, color);
    }

    /// Convert screen coordinates to board position
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let col = ((relative.x - BOARD_MARGIN) / self.cell_size).round() as i32;
        let row = ((relative.y - BOARD_MARGIN) / self.cell_size).round() as i32;

        Gomoku::is_legal(row, col).then(|| Pos::new(row as u8, col as u8))
    }

    /// Convert board position to screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + f32::from(pos.col) * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + f32::from(pos.row) * self.cell_size;
        Pos2::new(x, y)
    }
}
