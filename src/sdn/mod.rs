//! Software-defined routing
//!
//! Devices attach to a [`DynamicRouting`] mechanism with their link state
//! and receive routes through their [`RoutingInterface`]. [`SdnRouting`] is
//! the centralized mechanism: it knows the whole topology and computes every
//! device's routes itself, so it never exchanges routing packets.

mod controller;
mod interface;

pub use controller::SdnRouting;
pub use interface::{DynamicRouting, RoutingInterface};
