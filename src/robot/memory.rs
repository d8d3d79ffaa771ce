//! Exploration memory: cells known to be explored and tasks seen but not yet taken.

use std::collections::HashSet;

use crate::grid::Position;
use crate::task::TaskId;

/// Knowledge used by the discovery strategies.
///
/// The cooperative strategy keeps one of these for the whole team; the decentralized one
/// gives each robot its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotMemory {
    explored: HashSet<Position>,
    found: Vec<TaskId>,
}

impl RobotMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn explored(&self) -> &HashSet<Position> {
        &self.explored
    }

    pub fn explored_mut(&mut self) -> &mut HashSet<Position> {
        &mut self.explored
    }

    /// Records a cell as explored.
    pub fn record_visit(&mut self, cell: Position) {
        self.explored.insert(cell);
    }

    /// Tasks seen but not taken, in discovery order.
    pub fn found(&self) -> &[TaskId] {
        &self.found
    }

    /// Adds a task to the found list. Returns false if it was already there.
    pub fn remember_found(&mut self, task: TaskId) -> bool {
        if self.found.contains(&task) {
            return false;
        }
        self.found.push(task);
        true
    }

    /// Removes a task from the found list.
    pub fn forget_found(&mut self, task: TaskId) {
        self.found.retain(|t| *t != task);
    }

    /// Removes and returns the task at `index` of the found list.
    pub fn take_found(&mut self, index: usize) -> TaskId {
        self.found.remove(index)
    }

    /// Keeps only found tasks for which `keep` holds.
    pub fn retain_found<F: FnMut(TaskId) -> bool>(&mut self, mut keep: F) {
        self.found.retain(|t| keep(*t));
    }

    pub fn has_found(&self) -> bool {
        !self.found.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_list_deduplicates() {
        let mut memory = RobotMemory::new();
        assert!(memory.remember_found(TaskId(3)));
        assert!(!memory.remember_found(TaskId(3)));
        assert!(memory.remember_found(TaskId(1)));
        assert_eq!(memory.found(), &[TaskId(3), TaskId(1)]);
    }

    #[test]
    fn forget_and_take() {
        let mut memory = RobotMemory::new();
        memory.remember_found(TaskId(0));
        memory.remember_found(TaskId(1));
        memory.remember_found(TaskId(2));
        memory.forget_found(TaskId(1));
        assert_eq!(memory.take_found(1), TaskId(2));
        assert_eq!(memory.found(), &[TaskId(0)]);
    }

    #[test]
    fn record_visit_is_idempotent() {
        let mut memory = RobotMemory::new();
        memory.record_visit(Position::new(1, 1));
        memory.record_visit(Position::new(1, 1));
        assert_eq!(memory.explored().len(), 1);
    }
}
