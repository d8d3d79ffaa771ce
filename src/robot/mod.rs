//! Robots and their state machine.

pub mod agent;
pub mod memory;
pub mod state;

pub use agent::{Robot, RobotId};
pub use memory::RobotMemory;
pub use state::RobotState;
