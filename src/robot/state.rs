//! Behavioral states of a robot.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a robot is doing this tick.
///
/// A robot starts `Waiting` and keeps cycling through the states until the run ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RobotState {
    /// Idle, no target.
    #[default]
    Waiting,
    /// Heading for an unexplored cell, no task in hand.
    Exploring,
    /// Heading for a known, unclaimed task.
    Collecting,
    /// Carrying a task to the collection point.
    Delivering,
}

impl RobotState {
    /// Returns all states in lifecycle order.
    pub fn all() -> [RobotState; 4] {
        [
            RobotState::Waiting,
            RobotState::Exploring,
            RobotState::Collecting,
            RobotState::Delivering,
        ]
    }

    /// True while the robot carries a task.
    pub fn is_carrying(&self) -> bool {
        matches!(self, RobotState::Delivering)
    }
}

impl fmt::Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RobotState::Waiting => write!(f, "waiting"),
            RobotState::Exploring => write!(f, "exploring"),
            RobotState::Collecting => write!(f, "collecting"),
            RobotState::Delivering => write!(f, "delivering"),
        }
    }
}
