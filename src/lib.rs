//! gridfleet - grid robots that find, collect and deliver tasks
//!
//! Robots move on a rectangular grid of walls and open floor, pick up tasks and carry them
//! to a single collection point. One of three coordination strategies decides how targets
//! are chosen: a centralized assigner that knows every task, cooperative exploration with
//! shared memory, or decentralized exploration where each robot is on its own.
//!
//! ```no_run
//! use gridfleet::{Mode, SimConfig, Simulation};
//!
//! let mut sim = Simulation::from_file("maps/small.txt", SimConfig::with_mode(Mode::Cooperative))?;
//! let report = sim.run()?;
//! println!("{report}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod grid;
pub mod pathfinding;
pub mod robot;
pub mod simulation;
pub mod strategy;
pub mod task;

pub use grid::{load, parse, CellKind, GridModel, LoadedMap, MapError, Position};
pub use pathfinding::{search, Path};
pub use robot::{Robot, RobotId, RobotState};
pub use simulation::{RunReport, SimConfig, SimError, Simulation};
pub use strategy::{CoordinationStrategy, Mode};
pub use task::{TaskBoard, TaskId, TaskObject, TaskStatus};

/// Identifier type used for simulation runs.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }
}
