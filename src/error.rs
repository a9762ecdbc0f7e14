//! Error types for sdnroute

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sdnroute operations
#[derive(Error, Debug)]
pub enum RouteError {
    /// Topology graph errors
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Link-state and controller errors
    #[error("Routing error: {0}")]
    Routing(#[from] RoutingError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration file errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors raised by the topology graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No node with the given id exists
    #[error("node '{id}' not found in the network graph")]
    NodeNotFound {
        /// The missing node id
        id: String,
    },
}

/// Errors raised while ingesting link state or pushing routes to devices
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// A device advertised its link state twice
    #[error("node '{device_id}' already exists in the network graph")]
    DuplicateDevice {
        /// Id of the device that was already registered
        device_id: String,
    },

    /// A device id is not a registered device
    #[error("device '{device_id}' is not part of the network map")]
    UnknownDevice {
        /// The unknown device id
        device_id: String,
    },

    /// No routing interface is registered for the device
    #[error("device '{device_id}' is not connected")]
    NotConnected {
        /// Id of the device without a routing interface
        device_id: String,
    },
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Unknown shortest-path algorithm tag
    #[error("unsupported shortest-path algorithm: {algorithm}")]
    UnsupportedAlgorithm {
        /// The rejected tag
        algorithm: String,
    },

    /// Configuration content could not be parsed
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What was wrong with it
        reason: String,
    },
}

/// Errors reading or writing configuration files
#[derive(Error, Debug)]
pub enum StorageError {
    /// Configuration file does not exist
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Serialization to JSON failed
    #[error("serialization failed: {reason}")]
    SerializationFailed {
        /// Underlying failure
        reason: String,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, RouteError>;
