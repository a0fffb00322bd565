//! GUI module for the Gobang game
//!
//! A native front-end using egui/eframe. It talks to the engine only through
//! the [`Gomoku`](crate::Gomoku) session facade.

mod app;
mod board_view;
mod session;
mod theme;

pub use app::GobangApp;
pub use session::{Outcome, Session};
