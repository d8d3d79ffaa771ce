//! Decentralized exploration: every robot on its own.

use super::discovery::update_robot;
use super::{CoordinationStrategy, Mode, TickContext};
use crate::grid::Position;
use crate::robot::{Robot, RobotState};

/// Robots keep private memory and never share it. A robot does not learn that a task it is
/// heading for was taken until it gets there.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecentralizedStrategy;

impl DecentralizedStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl CoordinationStrategy for DecentralizedStrategy {
    fn mode(&self) -> Mode {
        Mode::Decentralized
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        for robot in ctx.robots.iter_mut() {
            let mut memory = robot.take_memory();
            update_robot(robot, &mut memory, ctx.grid, ctx.tasks, ctx.rng, false);
            robot.restore_memory(memory);
        }
    }

    fn record_step(&mut self, robot: &mut Robot, cell: Position) {
        robot.memory_mut().record_visit(cell);
    }

    /// A robot that spotted tasks on the way goes straight back to collecting.
    fn state_after_delivery(&self, robot: &Robot) -> RobotState {
        if robot.memory().has_found() {
            RobotState::Collecting
        } else {
            RobotState::Waiting
        }
    }

    fn name(&self) -> &str {
        "decentralized"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{parse, LoadedMap};
    use crate::robot::RobotId;
    use crate::task::{TaskBoard, TaskId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn update(map: &mut LoadedMap, tasks: &mut TaskBoard) {
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = TickContext {
            grid: &map.grid,
            robots: &mut map.robots,
            tasks,
            rng: &mut rng,
        };
        DecentralizedStrategy::new().update(&mut ctx);
    }

    #[test]
    fn robots_explore_with_private_memory() {
        let mut map = parse("RR M0").unwrap();
        let mut tasks = TaskBoard::new(map.tasks.clone());
        update(&mut map, &mut tasks);

        // Robot 1 never heard of robot 0's cell and heads for it.
        assert_eq!(map.robots[1].next_step(), Some(Position::new(0, 0)));
        assert!(map.robots[1].memory().explored().contains(&Position::new(1, 0)));
        assert!(!map.robots[1].memory().explored().contains(&Position::new(0, 0)));
    }

    #[test]
    fn record_step_writes_robot_memory() {
        let mut strategy = DecentralizedStrategy::new();
        let mut robot = Robot::new(RobotId(0), Position::new(0, 0));
        strategy.record_step(&mut robot, Position::new(0, 1));
        assert!(robot.memory().explored().contains(&Position::new(0, 1)));
    }

    #[test]
    fn next_state_after_delivery_depends_on_private_finds() {
        let strategy = DecentralizedStrategy::new();
        let mut robot = Robot::new(RobotId(0), Position::new(0, 0));
        assert_eq!(strategy.state_after_delivery(&robot), RobotState::Waiting);
        robot.memory_mut().remember_found(TaskId(3));
        assert_eq!(strategy.state_after_delivery(&robot), RobotState::Collecting);
    }

    #[test]
    fn collecting_without_target_picks_private_find() {
        let mut map = parse("R  M0").unwrap();
        let mut tasks = TaskBoard::new(map.tasks.clone());
        map.robots[0].memory_mut().remember_found(TaskId(0));
        map.robots[0].finish_delivery(RobotState::Collecting);
        update(&mut map, &mut tasks);

        assert_eq!(map.robots[0].state(), RobotState::Collecting);
        assert_eq!(map.robots[0].target(), Some(TaskId(0)));
        assert_eq!(map.robots[0].route().len(), 3);
    }

    #[test]
    fn stale_private_find_is_kept_until_arrival() {
        let mut map = parse("R  M0").unwrap();
        let mut tasks = TaskBoard::new(map.tasks.clone());
        map.robots[0].memory_mut().remember_found(TaskId(0));
        tasks.collect(TaskId(0));
        update(&mut map, &mut tasks);

        assert_eq!(map.robots[0].target(), Some(TaskId(0)));
        assert_eq!(map.robots[0].state(), RobotState::Collecting);
    }
}
