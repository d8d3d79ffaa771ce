//! Grid pathfinding: A* search and frontier exploration targets.

pub mod astar;
pub mod frontier;

pub use astar::{path_length, search, Path};
pub use frontier::{explore, nearest_cell, unvisited_cells};
