//! Directed multigraph holding the network topology

use crate::error::GraphError;
use crate::graph::{Edge, Node};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Directed multigraph with string-identified nodes
///
/// Parallel edges between the same ordered pair are allowed as long as their
/// values differ; an identical edge is stored once. All collections are
/// ordered by node id so every traversal visits nodes in the same order.
///
/// The graph does no locking of its own: mutation needs `&mut self`, and the
/// owner (see [`crate::routing::NetworkMap`]) keeps it behind a single mutex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    /// Nodes and their outgoing edges
    adjacency: BTreeMap<Node, BTreeSet<Edge>>,

    /// All edges
    edges: BTreeSet<Edge>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; no-op if a node with the same id already exists
    pub fn add_node(&mut self, node: Node) {
        self.adjacency.entry(node).or_default();
    }

    /// Add an edge, adding its endpoints if they are missing
    pub fn add_edge(&mut self, edge: Edge) {
        self.add_node(edge.dst().clone());
        self.adjacency
            .entry(edge.src().clone())
            .or_default()
            .insert(edge.clone());
        self.edges.insert(edge);
    }

    /// Remove a node together with every edge entering or leaving it
    pub fn remove_node(&mut self, id: &str) -> Result<Node, GraphError> {
        let (node, outgoing) =
            self.adjacency
                .remove_entry(id)
                .ok_or_else(|| GraphError::NodeNotFound { id: id.to_string() })?;

        for edge in &outgoing {
            self.edges.remove(edge);
        }
        for edges in self.adjacency.values_mut() {
            edges.retain(|e| e.dst() != &node);
        }
        self.edges.retain(|e| e.dst() != &node);

        Ok(node)
    }

    /// Get the node with the given id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.adjacency.get_key_value(id).map(|(node, _)| node)
    }

    /// Whether a node with the given id exists
    pub fn contains_node(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// All nodes, ordered by id
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.adjacency.keys()
    }

    /// All edges, ordered by (source, destination, value)
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    /// Edges leaving `src` (empty if `src` is unknown)
    pub fn edges_from<'a>(&'a self, src: &Node) -> impl Iterator<Item = &'a Edge> + 'a {
        self.adjacency
            .get(src)
            .into_iter()
            .flat_map(|edges| edges.iter())
    }

    /// Edges going from `src` to `dst`
    pub fn edges_between<'a>(
        &'a self,
        src: &Node,
        dst: &'a Node,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges_from(src).filter(move |e| e.dst() == dst)
    }

    /// Whether `src` and `dst` are directly connected
    pub fn has_edge(&self, src: &Node, dst: &Node) -> bool {
        self.edges_between(src, dst).next().is_some()
    }

    /// Whether no edge enters or leaves `node`
    pub fn is_isolated(&self, node: &Node) -> bool {
        self.edges_from(node).next().is_none() && !self.edges.iter().any(|e| e.dst() == node)
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, edge) in self.edges.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", edge)?;
        }
        f.write_str("}")
    }
}
