//! Cooperative exploration with a team-wide memory.

use std::collections::HashSet;

use super::discovery::update_robot;
use super::{CoordinationStrategy, Mode, TickContext};
use crate::grid::Position;
use crate::robot::{Robot, RobotMemory};
use crate::task::TaskId;

/// Robots explore independently but read and write one shared memory: a cell visited by any
/// robot is visited for all, and a task spotted by any robot can be collected by whichever
/// robot is free first.
#[derive(Debug, Clone, Default)]
pub struct CooperativeStrategy {
    pool: RobotMemory,
}

impl CooperativeStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells visited by any robot.
    pub fn visited(&self) -> &HashSet<Position> {
        self.pool.explored()
    }

    /// Tasks spotted but not yet targeted, oldest first.
    pub fn found(&self) -> &[TaskId] {
        self.pool.found()
    }
}

impl CoordinationStrategy for CooperativeStrategy {
    fn mode(&self) -> Mode {
        Mode::Cooperative
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        for robot in ctx.robots.iter_mut() {
            update_robot(robot, &mut self.pool, ctx.grid, ctx.tasks, ctx.rng, true);
        }
    }

    fn record_step(&mut self, _robot: &mut Robot, cell: Position) {
        self.pool.record_visit(cell);
    }

    fn name(&self) -> &str {
        "cooperative"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{parse, LoadedMap};
    use crate::robot::{RobotId, RobotState};
    use crate::task::TaskBoard;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn update(map: &mut LoadedMap, tasks: &mut TaskBoard, strategy: &mut CooperativeStrategy) {
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = TickContext {
            grid: &map.grid,
            robots: &mut map.robots,
            tasks,
            rng: &mut rng,
        };
        strategy.update(&mut ctx);
    }

    #[test]
    fn visits_are_shared_between_robots() {
        let mut map = parse("RR M0").unwrap();
        let mut tasks = TaskBoard::new(map.tasks.clone());
        let mut strategy = CooperativeStrategy::new();
        update(&mut map, &mut tasks, &mut strategy);

        assert!(strategy.visited().contains(&Position::new(0, 0)));
        assert!(strategy.visited().contains(&Position::new(1, 0)));
        assert_eq!(map.robots[0].next_step(), Some(Position::new(1, 0)));
        // Robot 1 skips the cell robot 0 started on.
        assert_eq!(map.robots[1].next_step(), Some(Position::new(2, 0)));
        assert_eq!(map.robots[1].state(), RobotState::Exploring);
    }

    #[test]
    fn unreachable_cells_stay_private_to_the_robot() {
        // Robot 0 is walled off from everything right of x = 1.
        let mut map = parse("RX R0M").unwrap();
        let mut tasks = TaskBoard::new(map.tasks.clone());
        let mut strategy = CooperativeStrategy::new();
        update(&mut map, &mut tasks, &mut strategy);

        assert_eq!(map.robots[0].state(), RobotState::Waiting);
        assert!(map.robots[0].unreachable().contains(&Position::new(2, 0)));
        assert!(!strategy.visited().contains(&Position::new(2, 0)));
        let expected: HashSet<_> = [Position::new(0, 0), Position::new(3, 0)].into();
        assert_eq!(strategy.visited(), &expected);
        // Robot 1 can still explore the cell robot 0 gave up on.
        assert_eq!(map.robots[1].next_step(), Some(Position::new(2, 0)));
        assert!(map.robots[1].unreachable().is_empty());
    }

    #[test]
    fn record_step_marks_shared_visit() {
        let mut strategy = CooperativeStrategy::new();
        let mut robot = Robot::new(RobotId(0), Position::new(0, 0));
        strategy.record_step(&mut robot, Position::new(1, 0));
        assert!(strategy.visited().contains(&Position::new(1, 0)));
        assert!(robot.memory().explored().is_empty());
    }

    #[test]
    fn any_robot_can_take_a_found_task() {
        let mut map = parse("R  M0").unwrap();
        let mut tasks = TaskBoard::new(map.tasks.clone());
        let mut strategy = CooperativeStrategy::new();
        strategy.pool.remember_found(TaskId(0));
        update(&mut map, &mut tasks, &mut strategy);

        assert_eq!(map.robots[0].state(), RobotState::Collecting);
        assert_eq!(map.robots[0].target(), Some(TaskId(0)));
        assert!(strategy.found().is_empty());
    }

    #[test]
    fn claimed_tasks_drop_out_of_the_shared_list() {
        let mut map = parse("R  M0").unwrap();
        let mut tasks = TaskBoard::new(map.tasks.clone());
        let mut strategy = CooperativeStrategy::new();
        strategy.pool.remember_found(TaskId(0));
        tasks.collect(TaskId(0));
        update(&mut map, &mut tasks, &mut strategy);

        assert!(strategy.found().is_empty());
        assert_eq!(map.robots[0].state(), RobotState::Exploring);
    }
}
