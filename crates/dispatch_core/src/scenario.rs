//! Network configuration: the serializable description a deployment loads
//! at startup and builds a [`RoadNetwork`] from.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::NetworkError;
use crate::network::{NodeId, RoadNetwork};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeConfig {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: u32,
}

/// Node bound plus undirected edge list, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub node_count: usize,
    pub edges: Vec<EdgeConfig>,
}

impl NetworkConfig {
    /// The fixed 12-node demo city used by the original deployment.
    pub fn city_demo() -> Self {
        let edges = [
            (1, 2, 4),
            (1, 3, 2),
            (2, 3, 1),
            (2, 4, 7),
            (3, 5, 3),
            (5, 4, 2),
            (4, 6, 1),
            (5, 7, 5),
            (6, 7, 3),
            (6, 8, 6),
            (7, 9, 4),
            (8, 9, 2),
            (9, 10, 3),
            (10, 11, 4),
            (11, 12, 2),
            (8, 12, 8),
        ];
        Self {
            node_count: 12,
            edges: edges
                .into_iter()
                .map(|(from, to, weight)| EdgeConfig { from, to, weight })
                .collect(),
        }
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let data = fs::read_to_string(path)?;
        let config: NetworkConfig = serde_json::from_str(&data)?;
        Ok(config)
    }

    /// Validate and build the immutable network. A malformed configuration
    /// is fatal at startup; the error propagates to `main`.
    pub fn build(&self) -> Result<RoadNetwork, NetworkError> {
        let edges: Vec<(NodeId, NodeId, u32)> = self
            .edges
            .iter()
            .map(|e| (e.from, e.to, e.weight))
            .collect();
        RoadNetwork::new(self.node_count, &edges)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::city_demo()
    }
}
