//! Errors reported by the checked session API

use thiserror::Error;

use crate::board::Pos;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GomokuError {
    #[error("point ({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("point {0} is already occupied")]
    Occupied(Pos),

    #[error("cannot play an empty stone")]
    EmptyStone,

    #[error("cannot take back {requested} moves, only {available} played")]
    NothingToUndo { requested: usize, available: usize },

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GomokuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            GomokuError::OutOfBounds { row: -1, col: 15 }.to_string(),
            "point (-1, 15) is off the board"
        );
        assert_eq!(
            GomokuError::Occupied(Pos::new(7, 7)).to_string(),
            "point (7, 7) is already occupied"
        );
        assert_eq!(
            GomokuError::NothingToUndo { requested: 2, available: 1 }.to_string(),
            "cannot take back 2 moves, only 1 played"
        );
    }
}
