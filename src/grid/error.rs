use thiserror::Error;

use super::cell::Position;

/// Errors raised while loading a map source.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("Cannot read map source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Map source contains no cells")]
    EmptyMap,

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Map source has no collection point ('0')")]
    MissingCollectionPoint,

    #[error("Map source has more than one collection point: {first} and {second}")]
    MultipleCollectionPoints { first: Position, second: Position },

    #[error("Map source has no robots ('R')")]
    NoRobots,

    #[error("Map source has no tasks ('M')")]
    NoTasks,
}
