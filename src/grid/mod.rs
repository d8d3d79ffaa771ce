//! Grid model and map loading.

pub mod cell;
pub mod error;
pub mod graph;
pub mod map;
pub mod model;

pub use cell::{CellKind, Direction, Position};
pub use error::MapError;
pub use graph::CellGraph;
pub use map::{load, parse, LoadedMap};
pub use model::GridModel;
