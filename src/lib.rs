//! # sdnroute
//!
//! Centralized link-state routing for emulated networks.
//!
//! Devices advertise the prefixes they are attached to; the controller builds
//! a network graph of devices and prefixes, computes shortest paths with one
//! of four interchangeable algorithms and pushes the resulting routes back to
//! each device.
//!
//! ## Quick Start
//!
//! ```
//! use sdnroute::{DynamicRouting, LinkStateInfo, RouteInfo, RoutingInterface, SdnRouting};
//! use sdnroute::ShortestPathAlgorithm;
//! use std::sync::Arc;
//!
//! struct PrintRoutes;
//!
//! impl RoutingInterface for PrintRoutes {
//!     fn update_routing(&self, routes: Vec<RouteInfo>) {
//!         for route in routes {
//!             println!("{}", route);
//!         }
//!     }
//! }
//!
//! fn main() -> sdnroute::Result<()> {
//!     let sdn = SdnRouting::new(ShortestPathAlgorithm::Dijkstra);
//!
//!     sdn.connect("d1", vec![LinkStateInfo::new("if-a", "p1", 1)], Arc::new(PrintRoutes))?;
//!     sdn.connect(
//!         "d2",
//!         vec![
//!             LinkStateInfo::new("if-b", "p1", 1),
//!             LinkStateInfo::new("if-c", "p2", 1),
//!         ],
//!         Arc::new(PrintRoutes),
//!     )?;
//!
//!     sdn.update_all_nodes()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod graph;
pub mod routing;
pub mod sdn;

// Re-export main types
pub use config::RoutingConfig;
pub use error::{ConfigError, GraphError, Result, RouteError, RoutingError, StorageError};
pub use graph::{Edge, Graph, Node, Path};
pub use routing::{LinkStateInfo, NetworkMap, RouteInfo, ShortestPathAlgorithm, SimpleGraph};
pub use sdn::{DynamicRouting, RoutingInterface, SdnRouting};
