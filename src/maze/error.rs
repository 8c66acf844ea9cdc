use thiserror::Error;

/// Structural problems raised while building a [`Maze`](super::Maze).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MazeError {
    #[error("room '{0}' already exists")]
    DuplicateRoom(String),

    #[error("room '{0}' does not exist")]
    UnknownRoom(String),

    #[error("corridor {from} -> {to} has invalid weight {weight}")]
    InvalidCorridor { from: String, to: String, weight: f64 },
}
