//! Connectivity view of the grid as a `petgraph` graph.
//!
//! Used for load-time diagnostics (which tasks can never be delivered) and as an
//! independent oracle for path lengths in tests.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;

use super::cell::{Direction, Position};
use super::model::GridModel;

/// Undirected graph over traversable cells with an edge between 4-adjacent cells.
#[derive(Debug, Clone)]
pub struct CellGraph {
    pub graph: UnGraph<Position, ()>,
    pub nodes: HashMap<Position, NodeIndex>,
}

impl CellGraph {
    /// Node for a cell, if it is traversable.
    pub fn node(&self, pos: Position) -> Option<NodeIndex> {
        self.nodes.get(&pos).copied()
    }
}

impl GridModel {
    /// Builds the connectivity graph of all non-wall cells.
    pub fn to_graph(&self) -> CellGraph {
        let mut graph = UnGraph::new_undirected();
        let mut nodes = HashMap::new();
        for pos in self.traversable_cells() {
            nodes.insert(pos, graph.add_node(pos));
        }
        for (&pos, &node) in &nodes {
            // Right and down only, so each edge is added once.
            for direction in [Direction::Right, Direction::Down] {
                if let Some(next) = pos.offset(direction).and_then(|p| nodes.get(&p)) {
                    graph.add_edge(node, *next, ());
                }
            }
        }
        CellGraph { graph, nodes }
    }

    /// Every cell reachable from `origin`, including `origin` itself. Empty when `origin`
    /// is a wall or out of bounds.
    pub fn reachable_from(&self, origin: Position) -> HashSet<Position> {
        let cells = self.to_graph();
        let Some(start) = cells.node(origin) else {
            return HashSet::new();
        };
        let mut reachable = HashSet::new();
        let mut bfs = Bfs::new(&cells.graph, start);
        while let Some(node) = bfs.next(&cells.graph) {
            reachable.insert(cells.graph[node]);
        }
        reachable
    }
}
