//! Link-state advertisements and computed route records

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of a device's link-state advertisement
///
/// Describes an interface of the device and the network prefix it is
/// attached to. Addresses and prefixes are only used through their string
/// form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStateInfo {
    /// Interface address
    pub address: String,
    /// Attached network prefix
    pub prefix: String,
    /// Advertised link cost
    ///
    /// Carried for completeness; paths are measured in hops.
    pub cost: u32,
}

impl LinkStateInfo {
    /// Create a new link-state entry
    pub fn new(address: impl fmt::Display, prefix: impl fmt::Display, cost: u32) -> Self {
        Self {
            address: address.to_string(),
            prefix: prefix.to_string(),
            cost,
        }
    }
}

impl fmt::Display for LinkStateInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "addr={};prefix={};cost={}",
            self.address, self.prefix, self.cost
        )
    }
}

/// A route computed for a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Destination prefix
    pub destination: String,
    /// Next-hop address, or `None` if the destination is directly attached
    pub next_hop: Option<String>,
    /// Address of the outgoing interface
    pub interface: String,
    /// Number of links crossed to reach the destination
    pub cost: u32,
}

impl RouteInfo {
    /// Create a new route
    pub fn new(
        destination: impl Into<String>,
        next_hop: Option<String>,
        interface: impl Into<String>,
        cost: u32,
    ) -> Self {
        Self {
            destination: destination.into(),
            next_hop,
            interface: interface.into(),
            cost,
        }
    }

    /// Whether the destination is directly attached to the device
    pub fn is_direct(&self) -> bool {
        self.next_hop.is_none()
    }
}

impl fmt::Display for RouteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dest={};via={};if={};cost={}",
            self.destination,
            self.next_hop.as_deref().unwrap_or("null"),
            self.interface,
            self.cost
        )
    }
}
