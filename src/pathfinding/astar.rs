//! A* shortest-path search on the 4-connected grid.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::grid::{GridModel, Position};

/// A route between two cells, start included.
///
/// `cells[0]` is the start and the last cell is the goal, so a route to the cell you are
/// already standing on has one cell and length 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Position>,
}

impl Path {
    /// All cells from start to goal.
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Number of steps (cells after the start).
    pub fn length(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn start(&self) -> Position {
        self.cells[0]
    }

    pub fn goal(&self) -> Position {
        self.cells[self.cells.len() - 1]
    }

    /// The cells still to traverse when standing on the start, next step first.
    pub fn into_steps(self) -> VecDeque<Position> {
        let mut steps = VecDeque::from(self.cells);
        steps.pop_front();
        steps
    }
}

/// Open-set entry. Ordered so that the max-heap pops the lowest `f`, then the earliest
/// insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: usize,
    seq: u64,
    g: usize,
    index: usize,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds a shortest path from `start` to `goal`.
///
/// Steps cost 1 and the heuristic is the Manhattan distance, which is consistent on a
/// 4-connected grid, so the first time the goal is popped its path is optimal. Nodes with
/// equal `f` are expanded in insertion order and neighbors are pushed up, right, down,
/// left, which makes the returned path a pure function of the grid and the endpoints.
///
/// Returns `None` when either endpoint is a wall or out of bounds, or when no route
/// exists. All scratch state is local to the call.
pub fn search(grid: &GridModel, start: Position, goal: Position) -> Option<Path> {
    if !grid.is_traversable(start) || !grid.is_traversable(goal) {
        return None;
    }
    let start_index = grid.index_of(start)?;
    let goal_index = grid.index_of(goal)?;

    let mut g_scores: Vec<Option<usize>> = vec![None; grid.len()];
    let mut parents: Vec<Option<usize>> = vec![None; grid.len()];
    let mut open = BinaryHeap::new();
    let mut seq = 0u64;

    g_scores[start_index] = Some(0);
    open.push(OpenNode {
        f: start.manhattan_distance(&goal),
        seq,
        g: 0,
        index: start_index,
    });

    while let Some(node) = open.pop() {
        if node.index == goal_index {
            return Some(reconstruct(grid, &parents, start_index, goal_index));
        }
        // Superseded by a cheaper push of the same cell.
        if g_scores[node.index].is_some_and(|best| node.g > best) {
            continue;
        }

        let current = grid.position_of(node.index);
        for neighbor in grid.neighbors(current) {
            let Some(neighbor_index) = grid.index_of(neighbor) else {
                continue;
            };
            let tentative = node.g + 1;
            if g_scores[neighbor_index].map_or(true, |g| tentative < g) {
                g_scores[neighbor_index] = Some(tentative);
                parents[neighbor_index] = Some(node.index);
                seq += 1;
                open.push(OpenNode {
                    f: tentative + neighbor.manhattan_distance(&goal),
                    seq,
                    g: tentative,
                    index: neighbor_index,
                });
            }
        }
    }

    None
}

/// Length of the shortest path, if any.
pub fn path_length(grid: &GridModel, start: Position, goal: Position) -> Option<usize> {
    search(grid, start, goal).map(|path| path.length())
}

fn reconstruct(
    grid: &GridModel,
    parents: &[Option<usize>],
    start_index: usize,
    goal_index: usize,
) -> Path {
    let mut indices = vec![goal_index];
    let mut current = goal_index;
    while current != start_index {
        match parents[current] {
            Some(parent) => {
                indices.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    indices.reverse();
    Path {
        cells: indices.into_iter().map(|i| grid.position_of(i)).collect(),
    }
}
