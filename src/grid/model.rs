//! The grid of cell kinds shared by every component of a run.

use super::cell::{CellKind, Direction, Position};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A rectangular grid of cells.
///
/// Two layers are kept: the static base layer (walls, open floor and the collection point)
/// fixed at load time, and the overlay that adds robot and task markers. The overlay is
/// rebuilt from the base by [`GridModel::refresh_overlay`] between ticks and only exists
/// for rendering; pathfinding looks at walls alone.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GridModel {
    width: usize,
    height: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    base: Vec<CellKind>,
    cells: Vec<CellKind>,
}

impl GridModel {
    /// Creates a grid from row-major base cells.
    ///
    /// Overlay kinds in `base` (`Task`, `Robot`) are stored as open floor; the overlay is
    /// initialized as a copy of the base. Callers guarantee `base.len() == width * height`;
    /// outside the crate, grids come from [`parse`](super::parse), [`GridModel::open`] or
    /// [`GridModel::with_walls`], which always do.
    pub(crate) fn new(width: usize, height: usize, base: Vec<CellKind>) -> Self {
        debug_assert_eq!(
            base.len(),
            width * height,
            "Base layer must have width * height cells"
        );
        let base: Vec<CellKind> = base
            .into_iter()
            .map(|kind| match kind {
                CellKind::Task | CellKind::Robot => CellKind::Open,
                other => other,
            })
            .collect();
        Self {
            width,
            height,
            cells: base.clone(),
            base,
        }
    }

    /// Creates an all-open grid.
    pub fn open(width: usize, height: usize) -> Self {
        Self::new(width, height, vec![CellKind::Open; width * height])
    }

    /// Creates an open grid with walls at the given positions. Out-of-bounds walls are
    /// ignored.
    pub fn with_walls(width: usize, height: usize, walls: &[Position]) -> Self {
        let mut base = vec![CellKind::Open; width * height];
        for wall in walls {
            if wall.x < width && wall.y < height {
                base[wall.y * width + wall.x] = CellKind::Wall;
            }
        }
        Self::new(width, height, base)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true if `pos` lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Row-major index of `pos`, or `None` when out of bounds.
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos).then(|| pos.y * self.width + pos.x)
    }

    /// Position of a row-major index.
    pub fn position_of(&self, index: usize) -> Position {
        Position::new(index % self.width, index / self.width)
    }

    /// Cell kind as currently displayed (base plus overlay).
    pub fn kind(&self, pos: Position) -> Option<CellKind> {
        self.index_of(pos).map(|i| self.cells[i])
    }

    /// Static cell kind (walls, floor and the collection point).
    pub fn base_kind(&self, pos: Position) -> Option<CellKind> {
        self.index_of(pos).map(|i| self.base[i])
    }

    /// A cell is traversable iff it is in bounds and not a wall.
    pub fn is_traversable(&self, pos: Position) -> bool {
        self.base_kind(pos).is_some_and(|kind| kind.is_traversable())
    }

    /// Traversable 4-connected neighbors of `pos`, in up, right, down, left order.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::all()
            .into_iter()
            .filter_map(move |direction| pos.offset(direction))
            .filter(move |next| self.is_traversable(*next))
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len()).map(move |i| self.position_of(i))
    }

    /// All non-wall positions in row-major order.
    pub fn traversable_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(move |pos| self.is_traversable(*pos))
    }

    /// Rebuilds the overlay from the base layer.
    ///
    /// Robot markers are painted first, open tasks over them, and the collection point
    /// last, so a robot standing on an uncollected task still shows the task.
    pub fn refresh_overlay<R, T>(&mut self, robots: R, open_tasks: T, collection_point: Position)
    where
        R: IntoIterator<Item = Position>,
        T: IntoIterator<Item = Position>,
    {
        self.cells.copy_from_slice(&self.base);
        for pos in robots {
            if let Some(i) = self.index_of(pos) {
                self.cells[i] = CellKind::Robot;
            }
        }
        for pos in open_tasks {
            if let Some(i) = self.index_of(pos) {
                self.cells[i] = CellKind::Task;
            }
        }
        if let Some(i) = self.index_of(collection_point) {
            self.cells[i] = CellKind::CollectionPoint;
        }
    }

    /// Renders the displayed layer with the map-source symbols, one line per row.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(CellKind::symbol));
            out.push('\n');
        }
        out
    }
}
