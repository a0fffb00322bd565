//! Main application for the Gobang GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel};

use super::board_view::{BoardOverlay, BoardView};
use super::session::{Outcome, Session};
use super::theme::*;
use crate::{EngineConfig, Stone};

/// Main Gobang application
pub struct GobangApp {
    session: Session,
    board_view: BoardView,
    show_stats: bool,
}

impl GobangApp {
    /// Create the app; `config` is validated here.
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: EngineConfig,
        human_color: Stone,
    ) -> crate::Result<Self> {
        Ok(Self {
            session: Session::new(config, human_color)?,
            board_view: BoardView::default(),
            show_stats: true,
        })
    }

    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (play Black)").clicked() {
                        self.session.restart(Stone::Black);
                        ui.close_menu();
                    }
                    if ui.button("New Game (play White)").clicked() {
                        self.session.restart(Stone::White);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo (U)").clicked() {
                        self.session.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_stats, "Engine Stats (S)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("You: {}", self.session.human_color));
                });
            });
        });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(220.0)
            .max_width(260.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(10.0))
            .show(ctx, |ui| {
                ui.label(RichText::new("GOBANG").size(22.0).strong().color(TEXT_PRIMARY));
                ui.add_space(10.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                Self::card_frame().show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("↩ Undo").clicked() {
                            self.session.undo();
                        }
                        if ui.button("New Game").clicked() {
                            self.session.restart(self.session.human_color);
                        }
                    });
                    ui.label(
                        RichText::new(format!("Move #{}", self.session.move_count()))
                            .size(11.0)
                            .color(TEXT_SECONDARY),
                    );
                });

                if self.show_stats {
                    ui.add_space(10.0);
                    self.render_stats_card(ui);
                }

                if let Some(msg) = &self.session.message {
                    ui.add_space(10.0);
                    ui.label(RichText::new(msg).size(11.0).color(STATUS_BUSY));
                }
            });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let (headline, status, color) = match self.session.outcome {
                Some(Outcome::Win { winner, .. }) => {
                    (format!("{winner} wins!"), "Game over", WIN_HIGHLIGHT)
                }
                Some(Outcome::Draw) => ("Draw".to_string(), "Game over", TEXT_SECONDARY),
                None if self.session.is_ai_thinking() => {
                    (self.session.current_turn.to_string(), "AI thinking...", STATUS_BUSY)
                }
                None => (self.session.current_turn.to_string(), "Your turn", STATUS_OK),
            };
            ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
            ui.label(RichText::new(status).size(12.0).color(color));
            if let Some(elapsed) = self.session.ai_thinking_elapsed() {
                ui.label(
                    RichText::new(format!("{:.1}s", elapsed.as_secs_f32()))
                        .size(12.0)
                        .color(TEXT_MUTED),
                );
            }
        });
    }

    fn render_stats_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ENGINE").size(10.0).color(TEXT_MUTED));
            let Some(result) = &self.session.last_ai_result else {
                ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                return;
            };
            if let Some(pos) = result.best_move {
                let col = (b'A' + pos.col) as char;
                ui.label(
                    RichText::new(format!("→ {}{}", col, pos.row + 1))
                        .size(12.0)
                        .strong()
                        .color(WIN_HIGHLIGHT),
                );
            }
            for line in [
                format!("{:?}", result.kind),
                format!("Score: {}", result.score),
                format!("{} nodes in {}ms", result.nodes, result.time_ms),
                format!("{} cutoffs", result.stats.beta_cutoffs),
                format!("TT hits: {:.1}%", result.stats.tt_hit_rate()),
            ] {
                ui.label(RichText::new(line).size(10.0).color(TEXT_SECONDARY));
            }
        });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let winning_line = match self.session.outcome {
                Some(Outcome::Win { line, .. }) => line,
                _ => None,
            };
            let overlay = BoardOverlay {
                to_move: self.session.current_turn,
                last_move: self.session.game.last_stone(),
                winning_line,
                accepts_input: self.session.outcome.is_none()
                    && self.session.is_human_turn()
                    && !self.session.is_ai_thinking(),
            };

            let clicked = self
                .board_view
                .show(ui, self.session.game.position().board(), &overlay);

            if let Some(pos) = clicked {
                if let Err(msg) = self.session.try_place_stone(pos) {
                    self.session.message = Some(msg);
                }
            }
        });
    }

    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::S) {
                self.show_stats = !self.show_stats;
            }
            if i.key_pressed(egui::Key::U) {
                self.session.undo();
            }
            if i.key_pressed(egui::Key::N) {
                self.session.restart(self.session.human_color);
            }
        });
    }
}

impl eframe::App for GobangApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.session.check_ai_result();
        self.session.start_ai_thinking();

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.session.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}
