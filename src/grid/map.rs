//! Map-source loading.
//!
//! A map is a rectangular text grid, one character per cell:
//!
//! | Symbol | Meaning |
//! |--------|---------|
//! | `X` | wall |
//! | `R` | robot spawn |
//! | `M` | task |
//! | `0` | collection point |
//! | anything else | open floor |

use std::fs;
use std::path::Path as FsPath;
use std::str::FromStr;

use super::cell::{CellKind, Position};
use super::error::MapError;
use super::model::GridModel;
use crate::robot::{Robot, RobotId};
use crate::task::TaskObject;

/// Everything a simulation needs, as found in a map source.
///
/// Robots and tasks are listed in row-major order of their markers, which fixes the
/// enumeration order used by every strategy.
#[derive(Debug, Clone)]
pub struct LoadedMap {
    pub grid: GridModel,
    pub robots: Vec<Robot>,
    pub tasks: Vec<TaskObject>,
    pub collection_point: Position,
}

/// Reads and parses a map file.
pub fn load<P: AsRef<FsPath>>(path: P) -> Result<LoadedMap, MapError> {
    let source = fs::read_to_string(path.as_ref())?;
    let map = parse(&source)?;
    tracing::info!(
        path = %path.as_ref().display(),
        width = map.grid.width(),
        height = map.grid.height(),
        robots = map.robots.len(),
        tasks = map.tasks.len(),
        "Loaded map"
    );
    Ok(map)
}

/// Parses map-source text.
///
/// Trailing blank lines are ignored; every other line is a row and all rows must have the
/// same number of characters.
pub fn parse(source: &str) -> Result<LoadedMap, MapError> {
    let mut rows: Vec<&str> = source.lines().collect();
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
    if width == 0 {
        return Err(MapError::EmptyMap);
    }

    let mut base = Vec::with_capacity(width * rows.len());
    let mut robots = Vec::new();
    let mut tasks = Vec::new();
    let mut collection_point: Option<Position> = None;

    for (y, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != width {
            return Err(MapError::RaggedRows {
                row: y,
                expected: width,
                found,
            });
        }
        for (x, symbol) in row.chars().enumerate() {
            let pos = Position::new(x, y);
            let kind = CellKind::from_symbol(symbol);
            match kind {
                CellKind::Robot => robots.push(Robot::new(RobotId(robots.len()), pos)),
                CellKind::Task => tasks.push(TaskObject::new(pos)),
                CellKind::CollectionPoint => {
                    if let Some(first) = collection_point {
                        return Err(MapError::MultipleCollectionPoints { first, second: pos });
                    }
                    collection_point = Some(pos);
                }
                CellKind::Open | CellKind::Wall => {}
            }
            base.push(kind);
        }
    }

    let collection_point = collection_point.ok_or(MapError::MissingCollectionPoint)?;
    if robots.is_empty() {
        return Err(MapError::NoRobots);
    }
    if tasks.is_empty() {
        return Err(MapError::NoTasks);
    }

    let mut grid = GridModel::new(width, rows.len(), base);
    grid.refresh_overlay(
        robots.iter().map(Robot::position),
        tasks.iter().map(TaskObject::position),
        collection_point,
    );

    Ok(LoadedMap {
        grid,
        robots,
        tasks,
        collection_point,
    })
}

impl FromStr for LoadedMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
