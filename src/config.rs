//! Routing engine configuration
//!
//! The configuration is fixed when a [`NetworkMap`](crate::routing::NetworkMap)
//! or [`SdnRouting`](crate::sdn::SdnRouting) controller is created; there is no
//! runtime reconfiguration. It can be stored as human-readable JSON.

use crate::error::{ConfigError, Result, StorageError};
use crate::routing::ShortestPathAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{fs, io};

/// Routing engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RoutingConfig {
    /// Shortest-path algorithm
    #[serde(default)]
    pub algorithm: ShortestPathAlgorithm,

    /// Push fresh routes to every connected device after each connect or
    /// disconnect
    ///
    /// When disabled, routes are only pushed by explicit `update` calls.
    #[serde(default)]
    pub auto_update: bool,
}

impl RoutingConfig {
    /// Create a configuration using the given algorithm
    pub fn new(algorithm: ShortestPathAlgorithm) -> Self {
        Self {
            algorithm,
            ..Default::default()
        }
    }

    /// Set the shortest-path algorithm
    pub fn with_algorithm(mut self, algorithm: ShortestPathAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Enable or disable pushing routes on topology changes
    pub fn with_auto_update(mut self, auto_update: bool) -> Self {
        self.auto_update = auto_update;
        self
    }
}

/// Save configuration to a JSON file
///
/// # Example
///
/// ```no_run
/// use sdnroute::config::{save_config, RoutingConfig};
/// use std::path::Path;
///
/// let config = RoutingConfig::default();
/// save_config(Path::new("routing.json"), &config).unwrap();
/// ```
pub fn save_config(path: &Path, config: &RoutingConfig) -> Result<()> {
    let json =
        serde_json::to_string_pretty(config).map_err(|e| StorageError::SerializationFailed {
            reason: e.to_string(),
        })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(StorageError::from)?;
    }
    fs::write(path, json).map_err(StorageError::from)?;
    Ok(())
}

/// Load configuration from a JSON file
///
/// # Errors
///
/// Returns an error if:
/// - The file doesn't exist
/// - The file contains invalid JSON
/// - The algorithm tag is not supported
pub fn load_config(path: &Path) -> Result<RoutingConfig> {
    let json = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StorageError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => StorageError::Io(e),
    })?;
    parse_config(&json)
}

/// Parse configuration from a JSON string
pub fn parse_config(json: &str) -> Result<RoutingConfig> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(|e| ConfigError::Invalid {
        reason: format!("Failed to deserialize config: {}", e),
    })?;

    // report a bad algorithm tag as such rather than as a generic parse failure
    if let Some(tag) = value.get("algorithm").and_then(serde_json::Value::as_str) {
        tag.parse::<ShortestPathAlgorithm>()?;
    }

    let config = serde_json::from_value(value).map_err(|e| ConfigError::Invalid {
        reason: format!("Failed to deserialize config: {}", e),
    })?;

    Ok(config)
}

/// Check if a configuration file exists
pub fn config_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// Get default configuration
///
/// # Example
///
/// ```
/// use sdnroute::config::default_config;
/// use sdnroute::routing::ShortestPathAlgorithm;
///
/// let config = default_config();
/// assert_eq!(config.algorithm, ShortestPathAlgorithm::Dijkstra);
/// ```
pub fn default_config() -> RoutingConfig {
    RoutingConfig::default()
}
