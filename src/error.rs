//! Error types for grid configuration.

use crate::grid::Position;
use thiserror::Error;

/// Result type alias using [`GridError`].
pub type Result<T> = std::result::Result<T, GridError>;

/// A grid configuration that cannot be searched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("start {0} is outside the grid")]
    StartOutOfBounds(Position),

    #[error("goal {0} is outside the grid")]
    GoalOutOfBounds(Position),

    #[error("wall {0} is outside the grid")]
    WallOutOfBounds(Position),

    #[error("start {0} is on a wall")]
    StartOnWall(Position),

    #[error("goal {0} is on a wall")]
    GoalOnWall(Position),

    #[error("start and goal are the same cell {0}")]
    StartIsGoal(Position),
}

/// A cell argument that is not of the form `row,col`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid cell '{input}': expected 'row,col' with non-negative integers")]
pub struct ParsePositionError {
    pub input: String,
}
