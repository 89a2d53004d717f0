use thiserror::Error;

use crate::grid::Cell;

/// Precondition violations reported by the game core.
///
/// None of these are fatal: the operation that fails leaves all state as it
/// was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("cell {cell} lies outside the grid")]
    OutOfBounds { cell: Cell },

    #[error("cell {cell} already holds a goal")]
    AlreadyOccupied { cell: Cell },

    #[error("no goal at cell {cell}")]
    NotFound { cell: Cell },

    #[error("invalid direction {0:?}, expected one of left, right, up, down")]
    InvalidDirection(String),

    #[error("no free cell left on the {width}x{height} board")]
    NoFreeCell { width: u16, height: u16 },

    #[error("a {width}x{height} grid cannot hold the starting snake and a goal")]
    InvalidGrid { width: u16, height: u16 },

    #[error("invalid speed setting {0}")]
    InvalidSpeed(f64),
}
