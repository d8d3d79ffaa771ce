//! A single robot: position, route, target and private memory.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use super::memory::RobotMemory;
use super::state::RobotState;
use crate::grid::Position;
use crate::pathfinding::Path;
use crate::task::TaskId;

/// Index of a robot in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RobotId(pub usize);

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "robot_{}", self.0)
    }
}

/// State of a single robot.
///
/// The route holds the cells still to traverse, next step first; the robot's own cell is
/// never part of it. State and target are changed by the coordination strategy, position
/// only by [`Robot::advance`].
#[derive(Debug, Clone)]
pub struct Robot {
    id: RobotId,
    position: Position,
    route: VecDeque<Position>,
    target: Option<TaskId>,
    state: RobotState,
    memory: RobotMemory,
    unreachable: HashSet<Position>,
    cells_travelled: u64,
    deliveries: u32,
}

impl Robot {
    /// Creates a waiting robot with empty memory.
    pub fn new(id: RobotId, position: Position) -> Self {
        Self {
            id,
            position,
            route: VecDeque::new(),
            target: None,
            state: RobotState::Waiting,
            memory: RobotMemory::new(),
            unreachable: HashSet::new(),
            cells_travelled: 0,
            deliveries: 0,
        }
    }

    pub fn id(&self) -> RobotId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Remaining cells of the current route, next step first.
    pub fn route(&self) -> &VecDeque<Position> {
        &self.route
    }

    pub fn has_route(&self) -> bool {
        !self.route.is_empty()
    }

    pub fn target(&self) -> Option<TaskId> {
        self.target
    }

    pub fn state(&self) -> RobotState {
        self.state
    }

    /// A robot without a target is free for assignment.
    pub fn is_free(&self) -> bool {
        self.target.is_none()
    }

    /// The robot's private memory.
    pub fn memory(&self) -> &RobotMemory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut RobotMemory {
        &mut self.memory
    }

    /// Moves the memory out, leaving an empty one, so it can be borrowed alongside the
    /// robot. Pair with [`Robot::restore_memory`].
    pub fn take_memory(&mut self) -> RobotMemory {
        std::mem::take(&mut self.memory)
    }

    pub fn restore_memory(&mut self, memory: RobotMemory) {
        self.memory = memory;
    }

    /// Cells this robot failed to route to while exploring. Kept apart from
    /// [`Robot::memory`] so it stays private when exploration memory is shared.
    pub fn unreachable(&self) -> &HashSet<Position> {
        &self.unreachable
    }

    pub fn unreachable_mut(&mut self) -> &mut HashSet<Position> {
        &mut self.unreachable
    }

    /// Cells moved so far.
    pub fn cells_travelled(&self) -> u64 {
        self.cells_travelled
    }

    /// Tasks delivered so far.
    pub fn deliveries(&self) -> u32 {
        self.deliveries
    }

    /// Replaces the route with `path`, whose first cell must be the robot's position.
    pub fn set_route(&mut self, path: Path) {
        debug_assert_eq!(path.start(), self.position, "Route must start at the robot");
        self.route = path.into_steps();
    }

    pub fn clear_route(&mut self) {
        self.route.clear();
    }

    /// The cell the robot will enter on its next move.
    pub fn next_step(&self) -> Option<Position> {
        self.route.front().copied()
    }

    /// Moves one cell along the route. Returns the new position, or `None` when the route is
    /// empty and the robot stays put.
    pub fn advance(&mut self) -> Option<Position> {
        let next = self.route.pop_front()?;
        self.position = next;
        self.cells_travelled += 1;
        Some(next)
    }

    /// Heads for `task` along `path` in state `Collecting`.
    pub fn assign(&mut self, task: TaskId, path: Path) {
        self.set_route(path);
        self.target = Some(task);
        self.state = RobotState::Collecting;
    }

    /// Heads for an unexplored cell along `path` in state `Exploring`.
    pub fn explore_along(&mut self, path: Path) {
        self.set_route(path);
        self.state = RobotState::Exploring;
    }

    /// Picks up `task` where the robot stands and switches to `Delivering` with an empty
    /// route. Returns the previous target if it was a different task.
    pub fn claim(&mut self, task: TaskId) -> Option<TaskId> {
        let previous = self.target.replace(task).filter(|t| *t != task);
        self.route.clear();
        self.state = RobotState::Delivering;
        previous
    }

    /// Hands over the carried task on arrival and switches to `next`. Returns the delivered
    /// task.
    pub fn finish_delivery(&mut self, next: RobotState) -> Option<TaskId> {
        let delivered = self.target.take();
        if delivered.is_some() {
            self.deliveries += 1;
        }
        self.route.clear();
        self.state = next;
        delivered
    }

    /// Drops target and route and goes back to `Waiting`. Returns the dropped target.
    pub fn release(&mut self) -> Option<TaskId> {
        self.route.clear();
        self.state = RobotState::Waiting;
        self.target.take()
    }
}

impl fmt::Display for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} ({})", self.id, self.position, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridModel;
    use crate::pathfinding::search;

    fn robot_at(x: usize, y: usize) -> Robot {
        Robot::new(RobotId(0), Position::new(x, y))
    }

    #[test]
    fn new_robot_is_waiting_and_free() {
        let robot = robot_at(1, 2);
        assert_eq!(robot.state(), RobotState::Waiting);
        assert!(robot.is_free());
        assert!(!robot.has_route());
    }

    #[test]
    fn advance_moves_one_cell() {
        let grid = GridModel::open(4, 1);
        let mut robot = robot_at(0, 0);
        robot.assign(
            TaskId(0),
            search(&grid, Position::new(0, 0), Position::new(3, 0)).unwrap(),
        );
        assert_eq!(robot.route().len(), 3);
        assert_eq!(robot.advance(), Some(Position::new(1, 0)));
        assert_eq!(robot.position(), Position::new(1, 0));
        assert_eq!(robot.route().len(), 2);
        assert_eq!(robot.cells_travelled(), 1);
    }

    #[test]
    fn advance_on_empty_route_stays() {
        let mut robot = robot_at(2, 2);
        assert_eq!(robot.advance(), None);
        assert_eq!(robot.position(), Position::new(2, 2));
        assert_eq!(robot.cells_travelled(), 0);
    }

    #[test]
    fn claim_switches_to_delivering() {
        let grid = GridModel::open(3, 1);
        let mut robot = robot_at(0, 0);
        robot.assign(
            TaskId(4),
            search(&grid, Position::new(0, 0), Position::new(2, 0)).unwrap(),
        );
        let previous = robot.claim(TaskId(7));
        assert_eq!(previous, Some(TaskId(4)));
        assert_eq!(robot.state(), RobotState::Delivering);
        assert_eq!(robot.target(), Some(TaskId(7)));
        assert!(!robot.has_route());
    }

    #[test]
    fn claim_own_target_returns_nothing() {
        let mut robot = robot_at(0, 0);
        robot.claim(TaskId(1));
        assert_eq!(robot.claim(TaskId(1)), None);
    }

    #[test]
    fn finish_delivery_counts_and_clears_target() {
        let mut robot = robot_at(0, 0);
        robot.claim(TaskId(2));
        assert_eq!(robot.finish_delivery(RobotState::Waiting), Some(TaskId(2)));
        assert!(robot.is_free());
        assert_eq!(robot.deliveries(), 1);
        assert_eq!(robot.state(), RobotState::Waiting);
    }

    #[test]
    fn unreachable_cells_survive_memory_handoff() {
        let mut robot = robot_at(0, 0);
        robot.unreachable_mut().insert(Position::new(5, 5));
        let memory = robot.take_memory();
        robot.restore_memory(memory);
        assert!(robot.unreachable().contains(&Position::new(5, 5)));
        assert!(robot.memory().explored().is_empty());
    }

    #[test]
    fn take_and_restore_memory() {
        let mut robot = robot_at(0, 0);
        robot.memory_mut().record_visit(Position::new(0, 0));
        let memory = robot.take_memory();
        assert!(robot.memory().explored().is_empty());
        robot.restore_memory(memory);
        assert_eq!(robot.memory().explored().len(), 1);
    }
}
