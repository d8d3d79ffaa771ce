//! Per-robot state update shared by the exploring strategies.
//!
//! The cooperative and decentralized strategies run the same state machine and differ only
//! in whose memory a robot reads and writes, and in whether a robot notices that a task it
//! is heading for was taken by someone else.

use rand::rngs::StdRng;

use super::claim;
use super::routing::{plan_routes, shortest};
use crate::grid::GridModel;
use crate::pathfinding::explore;
use crate::robot::{Robot, RobotMemory, RobotState};
use crate::task::TaskBoard;

/// Runs one robot's state update against `memory`.
///
/// With `sees_claims` set, found tasks claimed by other robots are dropped and a robot
/// collecting such a task gives up at once. Without it the robot only finds out on
/// arrival.
pub(crate) fn update_robot(
    robot: &mut Robot,
    memory: &mut RobotMemory,
    grid: &GridModel,
    tasks: &mut TaskBoard,
    rng: &mut StdRng,
    sees_claims: bool,
) {
    let here = robot.position();

    if robot.state() != RobotState::Delivering {
        if let Some(task) = tasks.open_at(here) {
            memory.forget_found(task);
            if let Some(abandoned) = claim(robot, task, tasks) {
                if tasks.is_open(abandoned) {
                    memory.remember_found(abandoned);
                }
            }
            return;
        }
    }

    match robot.state() {
        RobotState::Delivering => {
            if robot.has_route() {
                if let Some(task) = tasks.open_at(here) {
                    if memory.remember_found(task) {
                        tracing::debug!(
                            robot = %robot.id(),
                            task = %task,
                            at = %here,
                            "Task found en route"
                        );
                    }
                }
            }
            return;
        }
        RobotState::Exploring | RobotState::Collecting if !robot.has_route() => {
            if let Some(task) = robot.release() {
                if tasks.is_open(task) {
                    memory.remember_found(task);
                }
            }
        }
        RobotState::Collecting
            if sees_claims && robot.target().is_some_and(|task| !tasks.is_open(task)) =>
        {
            robot.release();
        }
        _ => {}
    }

    if robot.state() == RobotState::Waiting {
        acquire(robot, memory, grid, tasks, rng, sees_claims);
    }
}

/// Picks a new target for a waiting robot: the closest found task by route length, or
/// else a frontier cell. Leaves the robot waiting when neither exists.
///
/// Cells the robot cannot reach go into its own unreachable set, never into `memory`.
fn acquire(
    robot: &mut Robot,
    memory: &mut RobotMemory,
    grid: &GridModel,
    tasks: &TaskBoard,
    rng: &mut StdRng,
    sees_claims: bool,
) {
    if sees_claims {
        memory.retain_found(|task| tasks.is_open(task));
    }

    if memory.has_found() {
        let pairs: Vec<_> = memory
            .found()
            .iter()
            .map(|task| (robot.position(), tasks.position(*task)))
            .collect();
        if let Some(candidate) = shortest(plan_routes(grid, &pairs)) {
            let task = memory.take_found(candidate.slot);
            tracing::debug!(
                robot = %robot.id(),
                task = %task,
                length = candidate.length(),
                "Heading for found task"
            );
            robot.assign(task, candidate.path);
            return;
        }
    }

    let from = robot.position();
    let route = explore(grid, from, memory.explored_mut(), robot.unreachable_mut(), rng);
    match route {
        Some(path) => {
            tracing::trace!(robot = %robot.id(), target = %path.goal(), "Exploring");
            robot.explore_along(path);
        }
        None => {
            tracing::trace!(robot = %robot.id(), "No exploration target");
        }
    }
}
