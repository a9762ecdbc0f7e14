//! Device-facing routing traits

use crate::routing::{LinkStateInfo, RouteInfo};
use std::sync::Arc;

/// Device-side callback receiving computed routes
///
/// Implemented by whatever owns a device's forwarding table. Invoked with no
/// engine lock held, so implementations may call back into the controller.
pub trait RoutingInterface: Send + Sync {
    /// Replace the device's routes with `routes`
    fn update_routing(&self, routes: Vec<RouteInfo>);
}

/// A dynamic routing mechanism devices attach to
///
/// Every routing mechanism (centralized or distributed) is driven through
/// this trait: a device connects with its link state and a callback, may
/// hand over routing packets, and eventually disconnects.
pub trait DynamicRouting: Send + Sync {
    /// Attach a device with its link state
    ///
    /// # Errors
    ///
    /// Fails if the device cannot join the topology, e.g. because it is
    /// already connected.
    fn connect(
        &self,
        device_id: &str,
        link_state: Vec<LinkStateInfo>,
        routing_interface: Arc<dyn RoutingInterface>,
    ) -> crate::Result<()>;

    /// Detach a device and withdraw its link state
    fn disconnect(&self, device_id: &str) -> crate::Result<()>;

    /// Handle a routing packet received by a device
    ///
    /// Returns the packet to deliver onward, or `None` if the mechanism
    /// consumed it.
    fn process_received_packet(&self, device_id: &str, packet: Vec<u8>) -> Option<Vec<u8>>;
}
