//! Topology graph model
//!
//! The network map is kept as a directed multigraph whose vertices are
//! devices and advertised prefixes:
//!
//! - **Node**: a vertex, identified by an opaque string id
//! - **Edge**: a directed edge, optionally valued with an interface address
//! - **Graph**: the multigraph with its adjacency index
//! - **Path**: a route through the graph, measured in hops
//!
//! # Example
//!
//! ```
//! use sdnroute::graph::{Edge, Graph, Node, Path};
//!
//! let mut graph = Graph::new();
//! let router = Node::new("r1");
//! let lan = Node::new("10.0.1.0/24");
//! graph.add_edge(Edge::with_value(router.clone(), lan.clone(), "10.0.1.1"));
//!
//! let mut path = Path::new(router.clone());
//! for edge in graph.edges_between(&router, &lan) {
//!     path.add(edge.clone());
//! }
//! assert_eq!(path.len(), 1);
//! ```

mod edge;
#[allow(clippy::module_inception)]
mod graph;
mod node;
mod path;

pub use edge::Edge;
pub use graph::Graph;
pub use node::Node;
pub use path::Path;
