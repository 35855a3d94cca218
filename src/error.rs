use thiserror::Error;

/// Failures surfaced by the pathfinding engine.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The search exhausted its open set, or a greedy rollout exceeded its
    /// step budget, without reaching the goal.
    #[error("Path not found. Probably the labyrinth has isolated study areas")]
    PathNotFound,

    /// A Q-mode endpoint lies outside the logical bounds of the maze.
    #[error("Incorrect point")]
    IncorrectPoint,
}

/// Operation outcome handed to the consumer: `ok` with an empty message on
/// success, otherwise the fixed user-visible failure message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpResult {
    pub ok: bool,
    pub message: String,
}

impl OpResult {
    #[inline]
    #[must_use]
    pub fn success() -> Self {
        Self {
            ok: true,
            message: String::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn failure(error: Error) -> Self {
        Self {
            ok: false,
            message: error.to_string(),
        }
    }
}

impl From<Result<(), Error>> for OpResult {
    fn from(result: Result<(), Error>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(error) => Self::failure(error),
        }
    }
}
