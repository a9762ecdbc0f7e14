//! Adjacency-matrix snapshot of the network graph

use crate::graph::{Edge, Graph, Node, Path};
use crate::routing::spf::PathMap;
use tracing::debug;

/// A simple-graph view of a [`Graph`], specified through its adjacency matrix
///
/// Nodes are numbered in id order. For every ordered pair of adjacent nodes a
/// single representative edge is kept (the smallest one in edge order), so
/// parallel edges collapse into one. The snapshot owns its data and does not
/// follow later changes to the graph.
#[derive(Debug, Clone)]
pub struct SimpleGraph {
    /// Nodes by index
    nodes: Vec<Node>,

    /// Adjacency matrix
    adjacent: Vec<Vec<bool>>,

    /// Representative edge for each adjacent pair
    edges: Vec<Vec<Option<Edge>>>,
}

impl SimpleGraph {
    /// Convert a graph into its adjacency-matrix form
    pub fn new(graph: &Graph) -> Self {
        debug!(nodes = graph.node_count(), "converting graph to simple graph");

        let nodes: Vec<Node> = graph.nodes().cloned().collect();
        let n = nodes.len();
        let mut adjacent = vec![vec![false; n]; n];
        let mut edges = vec![vec![None; n]; n];

        for (i, src) in nodes.iter().enumerate() {
            for edge in graph.edges_from(src) {
                let Ok(j) = nodes.binary_search(edge.dst()) else {
                    continue;
                };
                if edges[i][j].is_none() {
                    adjacent[i][j] = true;
                    edges[i][j] = Some(edge.clone());
                }
            }
        }

        Self {
            nodes,
            adjacent,
            edges,
        }
    }

    /// The adjacency matrix
    pub fn adjacency(&self) -> &[Vec<bool>] {
        &self.adjacent
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the snapshot has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of a node
    pub fn node_index(&self, node: &Node) -> Option<usize> {
        self.nodes.binary_search(node).ok()
    }

    /// Node at a given index
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Representative edge between two node indexes
    pub fn edge(&self, src: usize, dst: usize) -> Option<&Edge> {
        self.edges.get(src)?.get(dst)?.as_ref()
    }

    /// Convert a predecessor array into paths from `source`
    ///
    /// `predecessors[i]` is the node preceding `i` on its path from `source`
    /// (`source` is its own predecessor); nodes without a predecessor are
    /// unreachable and get no path.
    pub fn paths(&self, source: usize, predecessors: &[Option<usize>]) -> PathMap {
        let mut paths = PathMap::new();
        let Some(start) = self.nodes.get(source) else {
            return paths;
        };

        for (i, dst) in self.nodes.iter().enumerate() {
            if let Some(path) = self.trace_path(start, source, i, predecessors) {
                paths.insert(dst.clone(), path);
            }
        }
        paths
    }

    /// Walk the predecessor chain back from `dst` to `source`
    fn trace_path(
        &self,
        start: &Node,
        source: usize,
        dst: usize,
        predecessors: &[Option<usize>],
    ) -> Option<Path> {
        let mut hops = vec![dst];
        let mut current = dst;
        while current != source {
            current = (*predecessors.get(current)?)?;
            hops.push(current);
            // a chain longer than the node count loops
            if hops.len() > self.nodes.len() {
                return None;
            }
        }

        let mut path = Path::new(start.clone());
        for pair in hops.windows(2).rev() {
            path.add(self.edge(pair[1], pair[0])?.clone());
        }
        Some(path)
    }
}
