//! Paths through the graph

use crate::graph::{Edge, Node};
use std::fmt;

/// An ordered sequence of edges leaving an implicit start node
///
/// The length of a path is its number of edges (hop count), which is the only
/// distance metric used by the shortest-path algorithms. A path without edges
/// leads from the start node to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    start: Node,
    edges: Vec<Edge>,
}

impl Path {
    /// Create a zero-length path
    pub fn new(start: Node) -> Self {
        Self {
            start,
            edges: Vec::new(),
        }
    }

    /// Create a one-hop path along `edge`
    pub fn from_edge(edge: Edge) -> Self {
        Self {
            start: edge.src().clone(),
            edges: vec![edge],
        }
    }

    /// Extend the path by one hop
    ///
    /// # Panics
    ///
    /// Panics if `edge` does not leave the current tail of the path.
    pub fn add(&mut self, edge: Edge) {
        assert_eq!(
            edge.src(),
            self.tail(),
            "edge {} does not continue path {}",
            edge,
            self
        );
        self.edges.push(edge);
    }

    /// Concatenate `other` to this path
    ///
    /// # Panics
    ///
    /// Panics if `other` does not start at the current tail of the path.
    pub fn append(&mut self, other: &Path) {
        assert_eq!(
            other.start(),
            self.tail(),
            "path {} does not continue path {}",
            other,
            self
        );
        self.edges.extend_from_slice(&other.edges);
    }

    /// Return a copy of this path extended by one hop
    pub(crate) fn extended(&self, edge: &Edge) -> Self {
        let mut path = Self {
            start: self.start.clone(),
            edges: Vec::with_capacity(self.edges.len() + 1),
        };
        path.edges.extend_from_slice(&self.edges);
        path.add(edge.clone());
        path
    }

    /// Return the concatenation of this path and `other`
    pub(crate) fn joined(&self, other: &Path) -> Self {
        let mut path = Self {
            start: self.start.clone(),
            edges: Vec::with_capacity(self.edges.len() + other.edges.len()),
        };
        path.edges.extend_from_slice(&self.edges);
        path.append(other);
        path
    }

    /// Number of edges (hop count)
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the path has no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The node the path starts from
    pub fn start(&self) -> &Node {
        &self.start
    }

    /// The node the path currently ends at
    pub fn tail(&self) -> &Node {
        self.edges.last().map_or(&self.start, Edge::dst)
    }

    /// The edges of the path, in order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The first edge, if any
    pub fn first_edge(&self) -> Option<&Edge> {
        self.edges.first()
    }

    /// The nodes along the path, starting node included
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        std::iter::once(&self.start).chain(self.edges.iter().map(Edge::dst))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, node) in self.nodes().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", node)?;
        }
        f.write_str("]")
    }
}
