//! Centralized SDN routing controller

use crate::config::RoutingConfig;
use crate::error::{Result, RoutingError};
use crate::graph::Graph;
use crate::routing::{LinkStateInfo, NetworkMap, ShortestPathAlgorithm};
use crate::sdn::interface::{DynamicRouting, RoutingInterface};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Centralized routing controller
///
/// Devices connect with their link state and a [`RoutingInterface`] callback.
/// The controller keeps the whole topology in a [`NetworkMap`] and pushes
/// routes to a device on [`update`](Self::update).
///
/// # Example
///
/// ```
/// use sdnroute::routing::{LinkStateInfo, RouteInfo, ShortestPathAlgorithm};
/// use sdnroute::sdn::{DynamicRouting, RoutingInterface, SdnRouting};
/// use std::sync::{Arc, Mutex};
///
/// #[derive(Default)]
/// struct Table(Mutex<Vec<RouteInfo>>);
///
/// impl RoutingInterface for Table {
///     fn update_routing(&self, routes: Vec<RouteInfo>) {
///         *self.0.lock().unwrap() = routes;
///     }
/// }
///
/// # fn main() -> sdnroute::Result<()> {
/// let sdn = SdnRouting::new(ShortestPathAlgorithm::Dijkstra);
/// let table = Arc::new(Table::default());
///
/// sdn.connect("d1", vec![LinkStateInfo::new("if-a", "p1", 1)], table.clone())?;
/// sdn.update("d1")?;
///
/// assert_eq!(table.0.lock().unwrap().len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct SdnRouting {
    /// Topology and path computation
    network_map: NetworkMap,

    /// Callbacks of connected devices
    routing_interfaces: DashMap<String, Arc<dyn RoutingInterface>>,

    /// Push routes to every device after each topology change
    auto_update: bool,
}

impl SdnRouting {
    /// Create a controller using the given algorithm
    pub fn new(algorithm: ShortestPathAlgorithm) -> Self {
        Self::from_config(&RoutingConfig::new(algorithm))
    }

    /// Create a controller from configuration
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            network_map: NetworkMap::from_config(config),
            routing_interfaces: DashMap::new(),
            auto_update: config.auto_update,
        }
    }

    /// The network map backing this controller
    pub fn network_map(&self) -> &NetworkMap {
        &self.network_map
    }

    /// Snapshot of the network graph
    pub fn network_graph(&self) -> Graph {
        self.network_map.network_graph()
    }

    /// Compute the routes of a device and push them to its callback
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::NotConnected`] if the device has no callback.
    pub fn update(&self, device_id: &str) -> Result<()> {
        let routing_interface = self
            .routing_interfaces
            .get(device_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RoutingError::NotConnected {
                device_id: device_id.to_string(),
            })?;

        let routes = self.network_map.get_routes(device_id);
        debug!(device = device_id, routes = routes.len(), "pushing routes");
        routing_interface.update_routing(routes);
        Ok(())
    }

    /// Push fresh routes to every connected device
    ///
    /// Devices are updated in id order; the first failure stops the sweep.
    pub fn update_all_nodes(&self) -> Result<()> {
        for device_id in self.connected_devices() {
            self.update(&device_id)?;
        }
        Ok(())
    }

    /// Ids of connected devices, sorted
    pub fn connected_devices(&self) -> Vec<String> {
        let mut devices: Vec<String> = self
            .routing_interfaces
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        devices.sort_unstable();
        devices
    }

    /// Whether a device is connected
    pub fn is_connected(&self, device_id: &str) -> bool {
        self.routing_interfaces.contains_key(device_id)
    }

    /// Push routes to every device still connected once the sweep reaches it
    ///
    /// Callbacks may disconnect other devices mid-sweep; those are skipped.
    fn topology_changed(&self) {
        if !self.auto_update {
            return;
        }
        for device_id in self.connected_devices() {
            if let Err(err) = self.update(&device_id) {
                debug!(device = %device_id, %err, "device left during route push, skipped");
            }
        }
    }
}

impl DynamicRouting for SdnRouting {
    fn connect(
        &self,
        device_id: &str,
        link_state: Vec<LinkStateInfo>,
        routing_interface: Arc<dyn RoutingInterface>,
    ) -> Result<()> {
        self.network_map.add_link_state(device_id, &link_state)?;
        self.routing_interfaces
            .insert(device_id.to_string(), routing_interface);

        info!(device = device_id, links = link_state.len(), "device connected");
        self.topology_changed();
        Ok(())
    }

    fn disconnect(&self, device_id: &str) -> Result<()> {
        if self.routing_interfaces.remove(device_id).is_none() {
            return Err(RoutingError::NotConnected {
                device_id: device_id.to_string(),
            }
            .into());
        }
        self.network_map.remove_link_state(device_id)?;

        info!(device = device_id, "device disconnected");
        self.topology_changed();
        Ok(())
    }

    fn process_received_packet(&self, _device_id: &str, packet: Vec<u8>) -> Option<Vec<u8>> {
        Some(packet)
    }
}
