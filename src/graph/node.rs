//! Graph vertices

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// A vertex of the network graph, identified by an opaque string id
///
/// Nodes compare and order by id only. The id is reference counted so that
/// paths and edges can hold nodes without copying strings around.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node {
    id: Arc<str>,
}

impl Node {
    /// Create a new node
    pub fn new(id: impl AsRef<str>) -> Self {
        Self {
            id: Arc::from(id.as_ref()),
        }
    }

    /// Get the node id
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

// Lets maps keyed by `Node` be queried with a plain id.
impl Borrow<str> for Node {
    fn borrow(&self) -> &str {
        &self.id
    }
}

impl From<&str> for Node {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
