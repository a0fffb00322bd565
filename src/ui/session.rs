//! Match state for the Gobang GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::engine::MoveResult;
use crate::{EngineConfig, GameState, Gomoku, Pos, Stone};

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win {
        winner: Stone,
        line: Option<[Pos; 5]>,
    },
    Draw,
}

/// A human-versus-engine match
pub struct Session {
    pub game: Gomoku,
    pub human_color: Stone,
    pub current_turn: Stone,
    pub outcome: Option<Outcome>,
    pub last_ai_result: Option<MoveResult>,
    pub last_ai_time: Option<Duration>,
    pub ai_state: AiState,
    pub message: Option<String>,
    config: EngineConfig,
}

impl Session {
    /// New match; `config` must already be valid.
    pub fn new(config: EngineConfig, human_color: Stone) -> crate::Result<Self> {
        Ok(Self {
            game: Gomoku::with_config(config)?,
            human_color,
            current_turn: Stone::Black,
            outcome: None,
            last_ai_result: None,
            last_ai_time: None,
            ai_state: AiState::Idle,
            message: None,
            config,
        })
    }

    /// Start over, optionally switching sides.
    pub fn restart(&mut self, human_color: Stone) {
        self.game.reset();
        self.human_color = human_color;
        self.current_turn = Stone::Black;
        self.outcome = None;
        self.last_ai_result = None;
        self.last_ai_time = None;
        self.ai_state = AiState::Idle;
        self.message = None;
    }

    pub fn is_human_turn(&self) -> bool {
        self.current_turn == self.human_color
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    pub fn move_count(&self) -> usize {
        self.game.position().board().stone_count()
    }

    /// Play a human click.
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.outcome.is_some() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() || !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        self.game
            .try_play(i32::from(pos.row), i32::from(pos.col), self.current_turn)
            .map_err(|e| e.to_string())?;
        self.after_move(pos);
        Ok(())
    }

    /// Record the consequences of the move just played at `pos`.
    fn after_move(&mut self, pos: Pos) {
        let color = self.current_turn;
        self.message = None;
        match self.game.game_state(pos, color) {
            GameState::Win => {
                self.outcome = Some(Outcome::Win {
                    winner: color,
                    line: self.game.winning_line(pos, color),
                });
            }
            GameState::Draw => self.outcome = Some(Outcome::Draw),
            GameState::Undecided => self.current_turn = color.opponent(),
        }
    }

    /// Hand the position to a worker thread if the engine is to move.
    pub fn start_ai_thinking(&mut self) {
        if self.is_human_turn() || self.is_ai_thinking() || self.outcome.is_some() {
            return;
        }

        let position = self.game.position().clone();
        let config = self.config;
        let color = self.current_turn;
        let (tx, rx) = channel();

        thread::spawn(move || match Gomoku::with_position(config, position) {
            Ok(mut engine) => {
                let _ = tx.send(engine.ai_with_stats(color));
            }
            Err(e) => warn!("engine worker failed to start: {}", e),
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Play the engine's move once the worker has answered.
    pub fn check_ai_result(&mut self) {
        let (result, elapsed) = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(result) => (result, start_time.elapsed()),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => return,
        };

        self.ai_state = AiState::Idle;
        self.last_ai_time = Some(elapsed);
        debug!("engine answered in {}ms", elapsed.as_millis());

        match result.best_move {
            Some(pos) => {
                self.game.play(pos, self.current_turn);
                self.after_move(pos);
            }
            None => self.message = Some("AI could not find a move".to_string()),
        }
        self.last_ai_result = Some(result);
    }

    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Take back the last human move and the engine's reply.
    pub fn undo(&mut self) {
        if self.is_ai_thinking() || self.move_count() == 0 {
            return;
        }

        let steps = self.move_count().min(2);
        self.game.back(steps);
        self.outcome = None;
        self.message = None;
        self.current_turn = self
            .game
            .last_stone()
            .map_or(Stone::Black, |p| self.game.check_stone(p).opponent());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(human_color: Stone) -> Session {
        let config = EngineConfig {
            max_depth: 2,
            tt_size_mb: 1,
            ..EngineConfig::default()
        };
        Session::new(config, human_color).unwrap()
    }

    fn wait_for_ai(session: &mut Session) {
        while session.is_ai_thinking() {
            thread::sleep(Duration::from_millis(5));
            session.check_ai_result();
        }
    }

    #[test]
    fn test_human_then_engine() {
        let mut s = session(Stone::Black);
        assert!(s.is_human_turn());
        s.try_place_stone(Pos::CENTER).unwrap();
        assert_eq!(s.current_turn, Stone::White);
        assert!(s.try_place_stone(Pos::new(0, 0)).is_err());

        s.start_ai_thinking();
        wait_for_ai(&mut s);
        assert_eq!(s.move_count(), 2);
        assert!(s.is_human_turn());
        assert!(s.last_ai_result.is_some());
    }

    #[test]
    fn test_engine_opens_when_human_is_white() {
        let mut s = session(Stone::White);
        assert!(s.game.is_initial(Stone::Black));
        s.start_ai_thinking();
        wait_for_ai(&mut s);
        assert_eq!(s.game.last_stone(), Some(Pos::CENTER));
        assert_eq!(s.current_turn, Stone::White);
    }

    #[test]
    fn test_occupied_click_rejected() {
        let mut s = session(Stone::Black);
        s.try_place_stone(Pos::CENTER).unwrap();
        s.start_ai_thinking();
        wait_for_ai(&mut s);
        let err = s.try_place_stone(Pos::CENTER).unwrap_err();
        assert!(err.contains("occupied"));
    }

    #[test]
    fn test_undo_takes_back_pair() {
        let mut s = session(Stone::Black);
        s.try_place_stone(Pos::CENTER).unwrap();
        s.start_ai_thinking();
        wait_for_ai(&mut s);

        s.undo();
        assert_eq!(s.move_count(), 0);
        assert_eq!(s.current_turn, Stone::Black);
    }

    #[test]
    fn test_win_is_detected() {
        let mut s = session(Stone::Black);
        for col in 3..7 {
            s.game.play(Pos::new(2, col), Stone::Black);
        }
        s.try_place_stone(Pos::new(2, 7)).unwrap();
        match s.outcome {
            Some(Outcome::Win { winner, line }) => {
                assert_eq!(winner, Stone::Black);
                assert_eq!(line.map(|l| l[0]), Some(Pos::new(2, 3)));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(s.try_place_stone(Pos::new(9, 9)).is_err());
    }
}
