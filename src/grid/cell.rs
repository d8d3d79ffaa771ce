//! Cell coordinates and cell kinds.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid. `x` is the column, `y` the row (row 0 is the first line
/// of the map source).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan (4-connected) distance to another position.
    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the neighbor one cell away in `direction`, or `None` when it would leave
    /// the non-negative quadrant. Upper bounds are checked by the grid.
    pub fn offset(&self, direction: Direction) -> Option<Position> {
        match direction {
            Direction::Up => self.y.checked_sub(1).map(|y| Position::new(self.x, y)),
            Direction::Right => Some(Position::new(self.x + 1, self.y)),
            Direction::Down => Some(Position::new(self.x, self.y + 1)),
            Direction::Left => self.x.checked_sub(1).map(|x| Position::new(x, self.y)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four cardinal moves, in neighbor enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in enumeration order: up, right, down, left.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ]
    }
}

/// What occupies a grid cell.
///
/// `Task` and `Robot` are overlay kinds: they are recomputed every tick from the task board
/// and robot positions and never drive decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellKind {
    Open,
    Wall,
    Task,
    CollectionPoint,
    Robot,
}

impl CellKind {
    pub const WALL_SYMBOL: char = 'X';
    pub const ROBOT_SYMBOL: char = 'R';
    pub const TASK_SYMBOL: char = 'M';
    pub const COLLECTION_POINT_SYMBOL: char = '0';
    pub const OPEN_SYMBOL: char = ' ';

    /// Classifies a map-source character. Anything unrecognized is open floor.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            Self::WALL_SYMBOL => CellKind::Wall,
            Self::ROBOT_SYMBOL => CellKind::Robot,
            Self::TASK_SYMBOL => CellKind::Task,
            Self::COLLECTION_POINT_SYMBOL => CellKind::CollectionPoint,
            _ => CellKind::Open,
        }
    }

    /// The map-source character for this kind.
    pub fn symbol(&self) -> char {
        match self {
            CellKind::Open => Self::OPEN_SYMBOL,
            CellKind::Wall => Self::WALL_SYMBOL,
            CellKind::Task => Self::TASK_SYMBOL,
            CellKind::CollectionPoint => Self::COLLECTION_POINT_SYMBOL,
            CellKind::Robot => Self::ROBOT_SYMBOL,
        }
    }

    /// Only walls block movement.
    pub fn is_traversable(&self) -> bool {
        !matches!(self, CellKind::Wall)
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Open => write!(f, "open"),
            CellKind::Wall => write!(f, "wall"),
            CellKind::Task => write!(f, "task"),
            CellKind::CollectionPoint => write!(f, "collection point"),
            CellKind::Robot => write!(f, "robot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_same_cell() {
        let p = Position::new(2, 5);
        assert_eq!(p.manhattan_distance(&p), 0);
    }

    #[test]
    fn manhattan_distance_same_row_and_column() {
        assert_eq!(Position::new(0, 0).manhattan_distance(&Position::new(3, 0)), 3);
        assert_eq!(Position::new(5, 2).manhattan_distance(&Position::new(5, 9)), 7);
    }

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Position::new(1, 7);
        let b = Position::new(6, 2);
        assert_eq!(a.manhattan_distance(&b), 10);
        assert_eq!(b.manhattan_distance(&a), 10);
    }

    #[test]
    fn offset_stops_at_origin() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.offset(Direction::Up), None);
        assert_eq!(origin.offset(Direction::Left), None);
        assert_eq!(origin.offset(Direction::Right), Some(Position::new(1, 0)));
        assert_eq!(origin.offset(Direction::Down), Some(Position::new(0, 1)));
    }

    #[test]
    fn symbols_classify() {
        assert_eq!(CellKind::from_symbol('X'), CellKind::Wall);
        assert_eq!(CellKind::from_symbol('R'), CellKind::Robot);
        assert_eq!(CellKind::from_symbol('M'), CellKind::Task);
        assert_eq!(CellKind::from_symbol('0'), CellKind::CollectionPoint);
        assert_eq!(CellKind::from_symbol(' '), CellKind::Open);
        assert_eq!(CellKind::from_symbol('.'), CellKind::Open);
        assert_eq!(CellKind::from_symbol('x'), CellKind::Open);
    }

    #[test]
    fn only_walls_block() {
        assert!(!CellKind::Wall.is_traversable());
        assert!(CellKind::Open.is_traversable());
        assert!(CellKind::Task.is_traversable());
        assert!(CellKind::Robot.is_traversable());
        assert!(CellKind::CollectionPoint.is_traversable());
    }
}
