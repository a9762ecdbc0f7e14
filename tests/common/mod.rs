//! Common test helpers and utilities
//!
//! Shared topology fixtures and a recording routing interface for the
//! integration tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sdnroute::{LinkStateInfo, NetworkMap, RouteInfo, RoutingInterface, ShortestPathAlgorithm};

/// Install a test log subscriber, filtered by `RUST_LOG`
///
/// Safe to call from every test; only the first call installs it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .with_target(false)
        .try_init();
}

/// Create a link-state entry with unit cost
pub fn lsi(address: &str, prefix: &str) -> LinkStateInfo {
    LinkStateInfo::new(address, prefix, 1)
}

/// Link states of the three-device chain `D1 -[P1]- D2 -[P2]- D3`
pub fn three_device_link_states() -> Vec<(&'static str, Vec<LinkStateInfo>)> {
    vec![
        ("D1", vec![lsi("if-a", "P1")]),
        ("D2", vec![lsi("if-b", "P1"), lsi("if-c", "P2")]),
        ("D3", vec![lsi("if-d", "P2")]),
    ]
}

/// Network map holding the three-device chain
pub fn three_device_map(algorithm: ShortestPathAlgorithm) -> NetworkMap {
    let map = NetworkMap::new(algorithm);
    for (device, link_state) in three_device_link_states() {
        map.add_link_state(device, &link_state).unwrap();
    }
    map
}

/// Random link states for `devices` devices sharing `prefixes` prefixes
///
/// Each device attaches to one to three prefixes. The same seed always
/// yields the same topology.
pub fn random_link_states(
    seed: u64,
    devices: usize,
    prefixes: usize,
) -> Vec<(String, Vec<LinkStateInfo>)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..devices)
        .map(|d| {
            let links = rng.gen_range(1..=3);
            let link_state = (0..links)
                .map(|l| {
                    let prefix = rng.gen_range(0..prefixes);
                    LinkStateInfo::new(format!("r{d}-if{l}"), format!("net{prefix}"), 1)
                })
                .collect();
            (format!("r{d}"), link_state)
        })
        .collect()
}

/// Network map built from [`random_link_states`]
pub fn random_map(
    algorithm: ShortestPathAlgorithm,
    seed: u64,
    devices: usize,
    prefixes: usize,
) -> NetworkMap {
    let map = NetworkMap::new(algorithm);
    for (device, link_state) in random_link_states(seed, devices, prefixes) {
        map.add_link_state(&device, &link_state).unwrap();
    }
    map
}

/// Link states of an `rows` x `cols` grid of routers
///
/// Neighbouring routers share a point-to-point prefix; every router also
/// has a LAN prefix of its own.
pub fn grid_link_states(rows: usize, cols: usize) -> Vec<(String, Vec<LinkStateInfo>)> {
    let mut link_states = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let mut links = vec![lsi(&format!("lan-{r}-{c}.1"), &format!("lan-{r}-{c}"))];
            let mut link = |prefix: String, side: &str| {
                links.push(LinkStateInfo::new(format!("{prefix}.{side}"), prefix, 1));
            };
            if c + 1 < cols {
                link(format!("h-{r}-{c}"), "1");
            }
            if c > 0 {
                link(format!("h-{r}-{}", c - 1), "2");
            }
            if r + 1 < rows {
                link(format!("v-{r}-{c}"), "1");
            }
            if r > 0 {
                link(format!("v-{}-{c}", r - 1), "2");
            }
            link_states.push((format!("router-{r}-{c}"), links));
        }
    }
    link_states
}

/// Routing interface recording every route update it receives
#[derive(Default)]
pub struct RecordingInterface {
    updates: Mutex<Vec<Vec<RouteInfo>>>,
}

impl RecordingInterface {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of updates received
    pub fn update_count(&self) -> usize {
        self.updates.lock().len()
    }

    /// Routes of the most recent update
    pub fn last_routes(&self) -> Option<Vec<RouteInfo>> {
        self.updates.lock().last().cloned()
    }
}

impl RoutingInterface for RecordingInterface {
    fn update_routing(&self, routes: Vec<RouteInfo>) {
        self.updates.lock().push(routes);
    }
}

/// Destination and cost of every route, the part all algorithms agree on
pub fn route_costs(routes: &[RouteInfo]) -> Vec<(String, u32)> {
    routes
        .iter()
        .map(|r| (r.destination.clone(), r.cost))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_link_states_are_seeded() {
        assert_eq!(random_link_states(7, 10, 5), random_link_states(7, 10, 5));
    }

    #[test]
    fn test_grid_link_states() {
        let grid = grid_link_states(2, 3);
        assert_eq!(grid.len(), 6);
        // corner: LAN + one horizontal + one vertical link
        assert_eq!(grid[0].1.len(), 3);
        // top middle: LAN + two horizontal + one vertical link
        assert_eq!(grid[1].1.len(), 4);
    }
}
