//! Network map: topology graph built from link-state advertisements
//!
//! The map turns each device advertisement into graph nodes and edges,
//! runs the configured shortest-path algorithm on demand and converts the
//! resulting paths into route records.

use crate::config::RoutingConfig;
use crate::error::{Result, RoutingError};
use crate::graph::{Edge, Graph, Node, Path};
use crate::routing::link_state::{LinkStateInfo, RouteInfo};
use crate::routing::simple_graph::SimpleGraph;
use crate::routing::spf::{self, AllPairsPaths, PathMap};
use crate::routing::ShortestPathAlgorithm;
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Cached shortest-path results
#[derive(Debug)]
enum PathCache {
    /// Paths computed so far, per source
    SingleSource(HashMap<Node, Arc<PathMap>>),

    /// Full all-pairs table, once computed
    AllPairs(Option<Arc<AllPairsPaths>>),
}

impl PathCache {
    fn for_algorithm(algorithm: ShortestPathAlgorithm) -> Self {
        if algorithm.is_all_pairs() {
            Self::AllPairs(None)
        } else {
            Self::SingleSource(HashMap::new())
        }
    }

    fn clear(&mut self) {
        match self {
            Self::SingleSource(paths) => paths.clear(),
            Self::AllPairs(table) => *table = None,
        }
    }
}

/// Everything guarded by the map lock
#[derive(Debug)]
struct MapState {
    /// Network graph
    graph: Graph,

    /// Ids of device nodes, as opposed to prefix nodes
    devices: BTreeSet<String>,

    /// Whether the graph changed since the cache was last validated
    topology_changed: bool,

    /// Bumped on every topology change
    generation: u64,

    /// Shortest-path results
    cache: PathCache,
}

impl MapState {
    fn new(algorithm: ShortestPathAlgorithm) -> Self {
        Self {
            graph: Graph::new(),
            devices: BTreeSet::new(),
            topology_changed: false,
            generation: 0,
            cache: PathCache::for_algorithm(algorithm),
        }
    }

    fn mark_changed(&mut self) {
        self.topology_changed = true;
        self.generation += 1;
    }

    /// Drop cached paths if the topology changed since they were computed
    fn revalidate(&mut self) {
        if self.topology_changed {
            debug!(generation = self.generation, "topology changed, path cache invalidated");
            self.cache.clear();
            self.topology_changed = false;
        }
    }

    fn cached_paths(&self, src: &Node) -> Option<Arc<PathMap>> {
        match &self.cache {
            PathCache::SingleSource(paths) => paths.get(src).cloned(),
            PathCache::AllPairs(_) => None,
        }
    }

    fn store_paths(&mut self, src: Node, paths: Arc<PathMap>) {
        if let PathCache::SingleSource(cache) = &mut self.cache {
            cache.insert(src, paths);
        }
    }

    /// Single-source paths over the live graph, computed on a cache miss
    fn single_source_paths(&mut self, src: &Node) -> Arc<PathMap> {
        if let Some(paths) = self.cached_paths(src) {
            return paths;
        }
        let paths = Arc::new(spf::dijkstra(&self.graph, src));
        self.store_paths(src.clone(), Arc::clone(&paths));
        paths
    }

    /// The all-pairs table, computed once per topology
    fn all_pairs_paths(&mut self, algorithm: ShortestPathAlgorithm) -> Arc<AllPairsPaths> {
        if let PathCache::AllPairs(Some(table)) = &self.cache {
            return Arc::clone(table);
        }

        debug!(%algorithm, nodes = self.graph.node_count(), "computing all-pairs paths");
        let table = Arc::new(match algorithm {
            ShortestPathAlgorithm::BellmanFord => spf::bellman_ford(&self.graph),
            _ => spf::floyd_warshall(&self.graph),
        });
        self.cache = PathCache::AllPairs(Some(Arc::clone(&table)));
        table
    }
}

/// Network map built from link-state advertisements
///
/// The graph contains two kinds of nodes: one node per device and one node
/// per advertised prefix. Each link-state entry of a device links the device
/// and the prefix with a pair of edges valued with the interface address.
///
/// All state sits behind a single lock. Path computations over the live
/// graph hold it for their whole duration; the adjacency-matrix variant of
/// Dijkstra only holds it while taking its snapshot.
///
/// # Example
///
/// ```
/// use sdnroute::routing::{LinkStateInfo, NetworkMap, ShortestPathAlgorithm};
///
/// # fn main() -> sdnroute::Result<()> {
/// let map = NetworkMap::new(ShortestPathAlgorithm::Dijkstra);
/// map.add_link_state("r1", &[LinkStateInfo::new("10.0.1.1", "10.0.1.0/24", 1)])?;
/// map.add_link_state(
///     "r2",
///     &[
///         LinkStateInfo::new("10.0.1.2", "10.0.1.0/24", 1),
///         LinkStateInfo::new("10.0.2.1", "10.0.2.0/24", 1),
///     ],
/// )?;
///
/// let routes = map.get_routes("r1");
/// assert_eq!(routes.len(), 2);
/// assert_eq!(routes[1].next_hop.as_deref(), Some("10.0.1.2"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct NetworkMap {
    /// Shortest-path algorithm, fixed for the lifetime of the map
    algorithm: ShortestPathAlgorithm,

    /// Graph, device set, change flag and cache
    state: Mutex<MapState>,
}

impl NetworkMap {
    /// Create an empty network map
    pub fn new(algorithm: ShortestPathAlgorithm) -> Self {
        Self {
            algorithm,
            state: Mutex::new(MapState::new(algorithm)),
        }
    }

    /// Create an empty network map from configuration
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(config.algorithm)
    }

    /// The shortest-path algorithm in use
    pub fn algorithm(&self) -> ShortestPathAlgorithm {
        self.algorithm
    }

    /// Reset the map to an empty topology
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let generation = state.generation + 1;
        *state = MapState::new(self.algorithm);
        state.generation = generation;
        debug!("network map cleared");
    }

    /// Snapshot of the network graph
    pub fn network_graph(&self) -> Graph {
        self.state.lock().graph.clone()
    }

    /// Ids of the registered devices
    pub fn devices(&self) -> Vec<String> {
        self.state.lock().devices.iter().cloned().collect()
    }

    /// Whether a device is registered
    pub fn contains_device(&self, device_id: &str) -> bool {
        self.state.lock().devices.contains(device_id)
    }

    /// Add the link state of a device
    ///
    /// Prefixes already advertised by other devices are shared.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::DuplicateDevice`] if a node with the same id is
    /// already part of the graph; the map is left untouched in that case.
    pub fn add_link_state(&self, device_id: &str, link_state: &[LinkStateInfo]) -> Result<()> {
        let mut state = self.state.lock();
        if state.graph.contains_node(device_id) {
            return Err(RoutingError::DuplicateDevice {
                device_id: device_id.to_string(),
            }
            .into());
        }

        let device = Node::new(device_id);
        state.graph.add_node(device.clone());
        for lsi in link_state {
            let prefix = Node::new(&lsi.prefix);
            state.graph.add_edge(Edge::with_value(
                device.clone(),
                prefix.clone(),
                &lsi.address,
            ));
            state
                .graph
                .add_edge(Edge::with_value(prefix, device.clone(), &lsi.address));
        }
        state.devices.insert(device_id.to_string());
        state.mark_changed();

        debug!(
            device = device_id,
            links = link_state.len(),
            nodes = state.graph.node_count(),
            "link state added"
        );
        Ok(())
    }

    /// Withdraw the link state of a device
    ///
    /// Removes the device node with all its edges, and every prefix it was
    /// attached to that is left without edges.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::UnknownDevice`] if the device is not registered.
    pub fn remove_link_state(&self, device_id: &str) -> Result<()> {
        let mut state = self.state.lock();
        if !state.devices.remove(device_id) {
            return Err(RoutingError::UnknownDevice {
                device_id: device_id.to_string(),
            }
            .into());
        }

        state.mark_changed();

        let device = Node::new(device_id);
        let prefixes: BTreeSet<Node> = state
            .graph
            .edges_from(&device)
            .map(|e| e.dst().clone())
            .filter(|prefix| prefix != &device)
            .collect();
        state.graph.remove_node(device_id)?;

        let mut orphans = 0usize;
        for prefix in prefixes {
            let orphaned = state.graph.contains_node(prefix.id())
                && !state.devices.contains(prefix.id())
                && state.graph.is_isolated(&prefix);
            if orphaned {
                state.graph.remove_node(prefix.id())?;
                orphans += 1;
            }
        }

        debug!(device = device_id, orphans, "link state removed");
        Ok(())
    }

    /// Compute the routes from a device toward every reachable prefix
    ///
    /// Returns an empty list if the device is not registered. Routes are
    /// ordered by destination.
    pub fn get_routes(&self, device_id: &str) -> Vec<RouteInfo> {
        let mut state = self.state.lock();
        if !state.devices.contains(device_id) {
            debug!(device = device_id, "no routes for unknown device");
            return Vec::new();
        }
        state.revalidate();

        let src = Node::new(device_id);
        let routes = match self.algorithm {
            ShortestPathAlgorithm::Dijkstra => {
                let paths = state.single_source_paths(&src);
                build_routes(&paths, &state.devices)
            },
            ShortestPathAlgorithm::DijkstraSimple => {
                let cached = state.cached_paths(&src);
                if let Some(paths) = cached {
                    build_routes(&paths, &state.devices)
                } else {
                    let generation = state.generation;
                    let snapshot = SimpleGraph::new(&state.graph);
                    let devices = state.devices.clone();
                    drop(state);

                    let paths = Arc::new(dense_paths(&snapshot, &src));

                    let mut state = self.state.lock();
                    if state.generation == generation {
                        state.store_paths(src, Arc::clone(&paths));
                    }
                    drop(state);
                    build_routes(&paths, &devices)
                }
            },
            ShortestPathAlgorithm::FloydWarshall | ShortestPathAlgorithm::BellmanFord => {
                let table = state.all_pairs_paths(self.algorithm);
                table
                    .get(&src)
                    .map(|paths| build_routes(paths, &state.devices))
                    .unwrap_or_default()
            },
        };

        debug!(device = device_id, routes = routes.len(), "routes computed");
        routes
    }
}

/// Single-source paths over an adjacency-matrix snapshot
fn dense_paths(snapshot: &SimpleGraph, src: &Node) -> PathMap {
    match snapshot.node_index(src) {
        Some(s) => snapshot.paths(s, &spf::dijkstra_dense(snapshot.adjacency(), s)),
        None => PathMap::new(),
    }
}

/// Turn paths into routes, keeping only prefix destinations
fn build_routes(paths: &PathMap, devices: &BTreeSet<String>) -> Vec<RouteInfo> {
    paths
        .iter()
        .filter(|(dst, _)| !devices.contains(dst.id()))
        .filter_map(|(dst, path)| route_for(dst, path))
        .collect()
}

/// Route toward `dst` along `path`
///
/// The outgoing interface is the value of the first edge. When the path goes
/// through another device, the next hop is the value of the second edge,
/// i.e. the address of that device on the shared prefix.
fn route_for(dst: &Node, path: &Path) -> Option<RouteInfo> {
    let interface = path.first_edge()?.value()?;
    let next_hop = path.edges().get(1).and_then(Edge::value).map(str::to_string);
    Some(RouteInfo::new(dst.id(), next_hop, interface, route_cost(path)))
}

/// Number of prefixes crossed: device and prefix nodes alternate along a path
fn route_cost(path: &Path) -> u32 {
    u32::try_from(path.len().div_ceil(2)).unwrap_or(u32::MAX)
}
