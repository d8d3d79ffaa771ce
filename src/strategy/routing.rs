//! Batched route planning and minimum-length selection.
//!
//! Each search is a pure function of the grid and two endpoints, so a batch can be run in
//! parallel (feature `parallel`). Results keep their input order and the minimum is picked
//! sequentially, so both builds choose the same candidate.

use crate::grid::{GridModel, Position};
use crate::pathfinding::{search, Path};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A reachable option: its slot in the batch and the route to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub slot: usize,
    pub path: Path,
}

impl Candidate {
    pub fn length(&self) -> usize {
        self.path.length()
    }
}

/// Runs one A* search per `(start, goal)` pair, returning results in input order.
pub fn plan_routes(grid: &GridModel, pairs: &[(Position, Position)]) -> Vec<Option<Path>> {
    #[cfg(feature = "parallel")]
    {
        pairs
            .par_iter()
            .map(|(start, goal)| search(grid, *start, *goal))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        pairs
            .iter()
            .map(|(start, goal)| search(grid, *start, *goal))
            .collect()
    }
}

/// The shortest reachable route of a batch. Ties go to the earliest slot.
pub fn shortest(routes: Vec<Option<Path>>) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for (slot, path) in routes.into_iter().enumerate() {
        let Some(path) = path else {
            continue;
        };
        if best.as_ref().map_or(true, |b| path.length() < b.length()) {
            best = Some(Candidate { slot, path });
        }
    }
    best
}
