//! Directed graph edges

use crate::graph::Node;
use std::fmt;
use std::sync::Arc;

/// A directed edge between two nodes, optionally carrying a value
///
/// In the network map the value is the address of the interface that
/// attaches a device to a prefix. Edges are equal when source, destination
/// and value are equal; the derived ordering compares them in that order and
/// is only used to make iteration deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    src: Node,
    dst: Node,
    value: Option<Arc<str>>,
}

impl Edge {
    /// Create an edge without a value
    pub fn new(src: Node, dst: Node) -> Self {
        Self {
            src,
            dst,
            value: None,
        }
    }

    /// Create an edge carrying a value
    pub fn with_value(src: Node, dst: Node, value: impl AsRef<str>) -> Self {
        Self {
            src,
            dst,
            value: Some(Arc::from(value.as_ref())),
        }
    }

    /// Source node
    pub fn src(&self) -> &Node {
        &self.src
    }

    /// Destination node
    pub fn dst(&self) -> &Node {
        &self.dst
    }

    /// Edge value, if any
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "({},{};{})", self.src, self.dst, value),
            None => write!(f, "({},{})", self.src, self.dst),
        }
    }
}
