//! Coordination strategies.
//!
//! A strategy runs the state-update phase of every tick: it reacts to what each robot is
//! standing on, moves robots between states and hands out targets. Movement itself is done
//! by the simulation, which calls back into the strategy before each step so it can record
//! exploration knowledge.
//!
//! - [`CentralizedStrategy`] knows every task up front and assigns free robots greedily.
//! - [`CooperativeStrategy`] explores with a team-wide memory of visited cells and found
//!   tasks.
//! - [`DecentralizedStrategy`] explores with per-robot memory and no sharing.

pub mod centralized;
pub mod cooperative;
pub mod decentralized;
mod discovery;
pub mod mode;
pub mod routing;

use rand::rngs::StdRng;

use crate::grid::{GridModel, Position};
use crate::robot::{Robot, RobotState};
use crate::task::{TaskBoard, TaskId};

pub use centralized::CentralizedStrategy;
pub use cooperative::CooperativeStrategy;
pub use decentralized::DecentralizedStrategy;
pub use mode::{Mode, ParseModeError};
pub use routing::Candidate;

/// Mutable view of a run handed to a strategy for one state-update phase.
///
/// The grid is shared read-only by every search of the tick. Delivery routes are planned
/// by the simulation, not by strategies.
pub struct TickContext<'a> {
    pub grid: &'a GridModel,
    pub robots: &'a mut [Robot],
    pub tasks: &'a mut TaskBoard,
    pub rng: &'a mut StdRng,
}

/// A policy deciding how robots pick targets and share what they discover.
pub trait CoordinationStrategy: Send + Sync {
    /// The mode tag this strategy implements.
    fn mode(&self) -> Mode;

    /// Runs the state-update phase over all robots, in robot order.
    fn update(&mut self, ctx: &mut TickContext<'_>);

    /// Called just before `robot` moves into `cell`.
    fn record_step(&mut self, _robot: &mut Robot, _cell: Position) {}

    /// State a robot takes after handing over its task at the collection point.
    fn state_after_delivery(&self, _robot: &Robot) -> RobotState {
        RobotState::Waiting
    }

    /// Returns a human-readable name for this strategy.
    fn name(&self) -> &str;
}

/// Claims `task` for `robot` on the board and in the robot. Returns the target the robot
/// abandoned for it, if any.
pub(crate) fn claim(robot: &mut Robot, task: TaskId, tasks: &mut TaskBoard) -> Option<TaskId> {
    tasks.collect(task);
    let abandoned = robot.claim(task);
    tracing::debug!(robot = %robot.id(), task = %task, at = %robot.position(), "Task claimed");
    abandoned
}
