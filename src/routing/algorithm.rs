//! Shortest-path algorithm selection

use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shortest-path algorithm used by a [`NetworkMap`](crate::routing::NetworkMap)
///
/// The algorithm is chosen once, when the map is created. Every algorithm
/// measures paths in hops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ShortestPathAlgorithm {
    /// Single-source Dijkstra over the live graph
    #[default]
    Dijkstra,

    /// Single-source Dijkstra over an adjacency-matrix snapshot
    ///
    /// Only one edge per ordered node pair is kept in the snapshot.
    DijkstraSimple,

    /// All-pairs Floyd-Warshall
    FloydWarshall,

    /// All-pairs Bellman-Ford, run as rounds of distance-vector exchange
    BellmanFord,
}

impl ShortestPathAlgorithm {
    /// All supported algorithms
    pub const ALL: [ShortestPathAlgorithm; 4] = [
        Self::Dijkstra,
        Self::DijkstraSimple,
        Self::FloydWarshall,
        Self::BellmanFord,
    ];

    /// Whether the algorithm computes paths between every pair of nodes at once
    pub fn is_all_pairs(&self) -> bool {
        match self {
            Self::Dijkstra | Self::DijkstraSimple => false,
            Self::FloydWarshall | Self::BellmanFord => true,
        }
    }

    /// Configuration tag of the algorithm
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Dijkstra => "dijkstra",
            Self::DijkstraSimple => "dijkstra-simple",
            Self::FloydWarshall => "floyd-warshall",
            Self::BellmanFord => "bellman-ford",
        }
    }
}

impl fmt::Display for ShortestPathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dijkstra => "Dijkstra",
            Self::DijkstraSimple => "Dijkstra (with simple graph)",
            Self::FloydWarshall => "Floyd-Warshall",
            Self::BellmanFord => "Bellman-Ford",
        };
        f.write_str(name)
    }
}

impl FromStr for ShortestPathAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|algo| algo.tag() == tag)
            .ok_or_else(|| ConfigError::UnsupportedAlgorithm {
                algorithm: s.to_string(),
            })
    }
}

// Accepts the same spellings as `FromStr`.
impl<'de> Deserialize<'de> for ShortestPathAlgorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}
