//! Task objects and the board that tracks their lifecycle.

use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grid::Position;

/// Index of a task in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TaskId(pub usize);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task_{}", self.0)
    }
}

/// Lifecycle stage of a task. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TaskStatus {
    Open,
    Collected,
    Delivered,
}

/// A pickup point on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskObject {
    position: Position,
    collected: bool,
    delivered: bool,
}

impl TaskObject {
    /// Creates an open task.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            collected: false,
            delivered: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// True once a robot has claimed the task.
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// True once the task has reached the collection point.
    pub fn is_delivered(&self) -> bool {
        self.delivered
    }

    pub fn status(&self) -> TaskStatus {
        if self.delivered {
            TaskStatus::Delivered
        } else if self.collected {
            TaskStatus::Collected
        } else {
            TaskStatus::Open
        }
    }
}

/// Owns every task of a run and the set still active.
///
/// Tasks stay in [`TaskBoard::all`] for the whole run so their final status can be
/// reported; [`TaskBoard::active`] loses a task once it is delivered.
#[derive(Debug, Clone)]
pub struct TaskBoard {
    tasks: Vec<TaskObject>,
    active: Vec<TaskId>,
    by_position: HashMap<Position, TaskId>,
}

impl TaskBoard {
    /// Creates a board; ids follow the order of `tasks`.
    pub fn new(tasks: Vec<TaskObject>) -> Self {
        let active = (0..tasks.len()).map(TaskId).collect();
        let by_position = tasks
            .iter()
            .enumerate()
            .map(|(i, task)| (task.position, TaskId(i)))
            .collect();
        Self {
            tasks,
            active,
            by_position,
        }
    }

    pub fn get(&self, id: TaskId) -> Option<&TaskObject> {
        self.tasks.get(id.0)
    }

    /// Every task in load order, delivered ones included.
    pub fn all(&self) -> &[TaskObject] {
        &self.tasks
    }

    /// Tasks not yet delivered, in load order.
    pub fn active(&self) -> &[TaskId] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// True if the task exists and nobody has claimed it.
    pub fn is_open(&self, id: TaskId) -> bool {
        self.get(id).is_some_and(|task| !task.collected)
    }

    /// The unclaimed task lying on `pos`, if any.
    pub fn open_at(&self, pos: Position) -> Option<TaskId> {
        self.by_position
            .get(&pos)
            .copied()
            .filter(|id| self.is_open(*id))
    }

    /// Positions of unclaimed tasks, for the grid overlay.
    pub fn open_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.active
            .iter()
            .filter_map(|id| self.get(*id))
            .filter(|task| !task.collected)
            .map(TaskObject::position)
    }

    /// Position of a task. Panics on an id not issued by this board.
    pub fn position(&self, id: TaskId) -> Position {
        self.tasks[id.0].position
    }

    /// Marks a task collected. Returns false if it was already claimed.
    pub fn collect(&mut self, id: TaskId) -> bool {
        match self.tasks.get_mut(id.0) {
            Some(task) if !task.collected => {
                task.collected = true;
                true
            }
            _ => false,
        }
    }

    /// Marks a task delivered (and collected, if that had not been recorded). Returns false
    /// if it was already delivered.
    pub fn deliver(&mut self, id: TaskId) -> bool {
        match self.tasks.get_mut(id.0) {
            Some(task) if !task.delivered => {
                task.collected = true;
                task.delivered = true;
                true
            }
            _ => false,
        }
    }

    /// Drops delivered tasks from the active set and returns them.
    pub fn reconcile(&mut self) -> Vec<TaskId> {
        let mut removed = Vec::new();
        let tasks = &self.tasks;
        self.active.retain(|id| {
            if tasks[id.0].delivered {
                removed.push(*id);
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn delivered_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.delivered).count()
    }

    /// True when no task is left to deliver.
    pub fn is_finished(&self) -> bool {
        self.active.is_empty()
    }
}
