//! Link-state route computation
//!
//! This module turns device advertisements into routes:
//!
//! - **NetworkMap**: topology built from [`LinkStateInfo`] records, with a path
//!   cache invalidated on every topology change
//! - **spf**: the shortest-path algorithms over a [`Graph`](crate::graph::Graph)
//! - **SimpleGraph**: dense adjacency-matrix view used by one Dijkstra variant
//! - **ShortestPathAlgorithm**: selects the algorithm a map runs
//!
//! # Algorithms
//!
//! | Algorithm | Scope | Cost |
//! |-----------|-------|------|
//! | Dijkstra | single source | O(V² + E) |
//! | Dijkstra (simple graph) | single source, over a matrix snapshot | O(V²) |
//! | Floyd-Warshall | all pairs | O(V³) |
//! | Bellman-Ford | all pairs | O(V·E) per round |
//!
//! All of them count hops and break ties by node id, so they agree on
//! distances and each of them always returns the same paths for the same
//! topology.
//!
//! # Example
//!
//! ```
//! use sdnroute::routing::{LinkStateInfo, NetworkMap, ShortestPathAlgorithm};
//!
//! # fn main() -> sdnroute::Result<()> {
//! let map = NetworkMap::new(ShortestPathAlgorithm::FloydWarshall);
//! map.add_link_state("d1", &[LinkStateInfo::new("if-a", "p1", 1)])?;
//!
//! let routes = map.get_routes("d1");
//! assert_eq!(routes[0].destination, "p1");
//! assert!(routes[0].is_direct());
//! # Ok(())
//! # }
//! ```

mod algorithm;
mod link_state;
mod network_map;
mod simple_graph;
pub mod spf;

pub use algorithm::ShortestPathAlgorithm;
pub use link_state::{LinkStateInfo, RouteInfo};
pub use network_map::NetworkMap;
pub use simple_graph::SimpleGraph;
pub use spf::{AllPairsPaths, PathMap};
