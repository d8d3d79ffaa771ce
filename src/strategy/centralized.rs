//! Centralized assignment: one authoritative pass per tick over known tasks.
//!
//! Every unassigned task is considered in discovery order. For each, a route is planned
//! from every free robot and the robot with the shortest route gets the task; both leave
//! the pool for the rest of the pass. This is a greedy matching, not a globally optimal
//! one, but it is deterministic for a fixed task and robot order.

use super::routing::{plan_routes, shortest};
use super::{claim, CoordinationStrategy, Mode, TickContext};
use crate::robot::RobotState;
use crate::task::{TaskBoard, TaskId};

/// Greedy central assignment of known tasks to free robots.
#[derive(Debug, Clone)]
pub struct CentralizedStrategy {
    unassigned: Vec<TaskId>,
}

impl CentralizedStrategy {
    /// Creates the strategy with every active task of `tasks` unassigned.
    pub fn new(tasks: &TaskBoard) -> Self {
        Self {
            unassigned: tasks.active().to_vec(),
        }
    }

    /// Tasks not yet handed to a robot, in discovery order.
    pub fn unassigned(&self) -> &[TaskId] {
        &self.unassigned
    }

    /// Puts a task back into the pool at its discovery position.
    fn return_task(&mut self, task: TaskId) {
        if let Err(at) = self.unassigned.binary_search(&task) {
            self.unassigned.insert(at, task);
        }
    }

    /// Resolves robots that have reached the end of their collection route.
    fn settle_arrivals(&mut self, ctx: &mut TickContext<'_>) {
        for robot in ctx.robots.iter_mut() {
            if robot.state() != RobotState::Collecting || robot.has_route() {
                continue;
            }
            match robot.target() {
                Some(task) if ctx.tasks.open_at(robot.position()) == Some(task) => {
                    claim(robot, task, ctx.tasks);
                }
                Some(_) => {
                    // Route ended off target; give the task back to the pool.
                    if let Some(task) = robot.release() {
                        if ctx.tasks.is_open(task) {
                            self.return_task(task);
                        }
                    }
                }
                None => {
                    robot.release();
                }
            }
        }
    }

    /// The assignment pass.
    fn assign(&mut self, ctx: &mut TickContext<'_>) {
        let mut free: Vec<usize> = ctx
            .robots
            .iter()
            .enumerate()
            .filter(|(_, robot)| robot.is_free())
            .map(|(i, _)| i)
            .collect();
        if free.is_empty() || self.unassigned.is_empty() {
            return;
        }

        let mut remaining = Vec::with_capacity(self.unassigned.len());
        for task in std::mem::take(&mut self.unassigned) {
            if !ctx.tasks.is_open(task) {
                continue;
            }
            if free.is_empty() {
                remaining.push(task);
                continue;
            }
            let goal = ctx.tasks.position(task);
            let pairs: Vec<_> = free
                .iter()
                .map(|&i| (ctx.robots[i].position(), goal))
                .collect();
            match shortest(plan_routes(ctx.grid, &pairs)) {
                Some(candidate) => {
                    let index = free.remove(candidate.slot);
                    let robot = &mut ctx.robots[index];
                    tracing::debug!(
                        robot = %robot.id(),
                        task = %task,
                        length = candidate.length(),
                        "Task assigned"
                    );
                    robot.assign(task, candidate.path);
                }
                None => remaining.push(task),
            }
        }
        self.unassigned = remaining;
    }
}

impl CoordinationStrategy for CentralizedStrategy {
    fn mode(&self) -> Mode {
        Mode::Centralized
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        self.settle_arrivals(ctx);
        self.assign(ctx);
    }

    fn name(&self) -> &str {
        "centralized"
    }
}
