//! Frontier search: pick the nearest cell nobody has recorded as visited.

use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use super::astar::{search, Path};
use crate::grid::{GridModel, Position};

/// Traversable cells not in `visited`, in row-major order.
pub fn unvisited_cells(grid: &GridModel, visited: &HashSet<Position>) -> Vec<Position> {
    grid.traversable_cells()
        .filter(|cell| !visited.contains(cell))
        .collect()
}

/// The cell of `cells` closest to `from` by Manhattan distance. On ties the earliest cell in
/// `cells` wins.
pub fn nearest_cell(from: Position, cells: &[Position]) -> Option<Position> {
    let mut best: Option<(usize, Position)> = None;
    for &cell in cells {
        let distance = from.manhattan_distance(&cell);
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, cell));
        }
    }
    best.map(|(_, cell)| cell)
}

/// Plans an exploration route from `from`.
///
/// `visited` is the exploration memory the robot reads and may share with others; only the
/// standing cell is added to it here. `unreachable` holds cells this robot has failed to
/// reach and is never shared, since another robot may well reach them. The frontier is
/// every traversable cell in neither set.
///
/// The nearest frontier cell is tried; if A* cannot reach it, it is recorded as unreachable
/// and one other frontier cell chosen with `rng` is tried instead, which is also recorded
/// when unreachable.
///
/// Returns `None` when nothing is left to explore or neither candidate is reachable; the
/// caller then has no exploration target this tick.
pub fn explore<R: Rng + ?Sized>(
    grid: &GridModel,
    from: Position,
    visited: &mut HashSet<Position>,
    unreachable: &mut HashSet<Position>,
    rng: &mut R,
) -> Option<Path> {
    visited.insert(from);
    let frontier: Vec<Position> = unvisited_cells(grid, visited)
        .into_iter()
        .filter(|cell| !unreachable.contains(cell))
        .collect();
    let nearest = nearest_cell(from, &frontier)?;

    if let Some(path) = search(grid, from, nearest) {
        tracing::trace!(from = %from, target = %nearest, "Frontier target");
        return Some(path);
    }
    unreachable.insert(nearest);

    let fallback = frontier
        .iter()
        .copied()
        .filter(|cell| *cell != nearest)
        .choose(rng)?;
    match search(grid, from, fallback) {
        Some(path) => {
            tracing::debug!(
                from = %from,
                unreachable = %nearest,
                target = %fallback,
                "Frontier fallback target"
            );
            Some(path)
        }
        None => {
            unreachable.insert(fallback);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn unvisited_excludes_walls_and_visited() {
        let grid = GridModel::with_walls(3, 1, &[Position::new(1, 0)]);
        let visited: HashSet<_> = [Position::new(0, 0)].into_iter().collect();
        assert_eq!(unvisited_cells(&grid, &visited), vec![Position::new(2, 0)]);
    }

    #[test]
    fn nearest_prefers_first_on_tie() {
        let cells = [Position::new(2, 1), Position::new(1, 2), Position::new(0, 0)];
        assert_eq!(nearest_cell(Position::new(1, 1), &cells), Some(Position::new(2, 1)));
    }

    #[test]
    fn nearest_of_nothing_is_none() {
        assert_eq!(nearest_cell(Position::new(0, 0), &[]), None);
    }

    #[test]
    fn explore_targets_nearest_unvisited() {
        let grid = GridModel::open(4, 1);
        let mut visited = HashSet::new();
        let mut rng = StdRng::seed_from_u64(7);
        let path = explore(
            &grid,
            Position::new(0, 0),
            &mut visited,
            &mut HashSet::new(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(path.goal(), Position::new(1, 0));
        assert!(visited.contains(&Position::new(0, 0)));
    }

    #[test]
    fn explore_falls_back_when_nearest_unreachable() {
        // . X s
        // X X v
        // . . .
        // (0, 0) ties (2, 2) on distance but comes first, and it is walled in.
        let walls = [Position::new(1, 0), Position::new(0, 1), Position::new(1, 1)];
        let grid = GridModel::with_walls(3, 3, &walls);
        let mut visited: HashSet<_> = [Position::new(2, 1)].into_iter().collect();
        let mut unreachable = HashSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        let path = explore(
            &grid,
            Position::new(2, 0),
            &mut visited,
            &mut unreachable,
            &mut rng,
        )
        .unwrap();
        assert!(unreachable.contains(&Position::new(0, 0)));
        assert!(!visited.contains(&Position::new(0, 0)));
        assert_ne!(path.goal(), Position::new(0, 0));
        assert!(path.length() > 0);
    }

    #[test]
    fn explore_with_everything_visited_is_none() {
        let grid = GridModel::open(2, 1);
        let mut visited: HashSet<_> = [Position::new(1, 0)].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(3);
        let from = Position::new(0, 0);
        assert!(explore(&grid, from, &mut visited, &mut HashSet::new(), &mut rng).is_none());
    }

    #[test]
    fn explore_skips_cells_already_known_unreachable() {
        let grid = GridModel::open(3, 1);
        let mut visited = HashSet::new();
        let mut unreachable: HashSet<_> = [Position::new(1, 0)].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(3);
        let from = Position::new(0, 0);
        let path = explore(&grid, from, &mut visited, &mut unreachable, &mut rng).unwrap();
        assert_eq!(path.goal(), Position::new(2, 0));
    }

    #[test]
    fn explore_records_unreachable_candidates() {
        // Only (0, 0) reachable from itself; (2, 0) sealed by a wall column.
        let grid = GridModel::with_walls(3, 1, &[Position::new(1, 0)]);
        let mut visited = HashSet::new();
        let mut unreachable = HashSet::new();
        let mut rng = StdRng::seed_from_u64(3);
        let from = Position::new(0, 0);
        assert!(explore(&grid, from, &mut visited, &mut unreachable, &mut rng).is_none());
        assert!(unreachable.contains(&Position::new(2, 0)));
        assert!(!visited.contains(&Position::new(2, 0)));
        assert!(explore(&grid, from, &mut visited, &mut unreachable, &mut rng).is_none());
    }
}
