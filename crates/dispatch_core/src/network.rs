//! Road network model: immutable weighted undirected graph over integer nodes.
//!
//! Nodes are 1-based identifiers in `[1, node_count]`. Edges carry
//! non-negative integer weights and are symmetric. "No edge" is `None`,
//! never a magic large number, so unreachable can't collide with a real
//! distance.

use crate::error::NetworkError;

/// 1-based node identifier. Valid range is `[1, RoadNetwork::node_count()]`.
pub type NodeId = usize;

/// Hard cap on network size, inherited from the original deployment.
pub const MAX_NODES: usize = 20;

/// Immutable weighted undirected road network.
///
/// Backed by a dense adjacency matrix; the networks this engine serves are
/// small (≤ [`MAX_NODES`] nodes) and the shortest-path solver scans rows
/// anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadNetwork {
    node_count: usize,
    // (node_count + 1)^2 matrix, row/col 0 unused so NodeId indexes directly.
    adjacency: Vec<Vec<Option<u32>>>,
}

impl RoadNetwork {
    /// Build a network from a node bound and an undirected edge list.
    ///
    /// Each `(u, v, weight)` entry sets both directions. Endpoints outside
    /// `[1, node_count]` are a construction error, not a skipped row: a
    /// malformed network configuration is fatal at startup.
    ///
    /// Self-loops always weigh 0, regardless of any `(u, u, w)` input.
    pub fn new(node_count: usize, edges: &[(NodeId, NodeId, u32)]) -> Result<Self, NetworkError> {
        if node_count == 0 {
            return Err(NetworkError::EmptyNetwork);
        }
        if node_count > MAX_NODES {
            return Err(NetworkError::TooManyNodes {
                requested: node_count,
            });
        }

        let mut adjacency = vec![vec![None; node_count + 1]; node_count + 1];
        for node in 1..=node_count {
            adjacency[node][node] = Some(0);
        }

        for &(u, v, weight) in edges {
            if u < 1 || u > node_count || v < 1 || v > node_count {
                return Err(NetworkError::InvalidEndpoint {
                    from: u,
                    to: v,
                    node_count,
                });
            }
            if u == v {
                continue;
            }
            adjacency[u][v] = Some(weight);
            adjacency[v][u] = Some(weight);
        }

        Ok(Self {
            node_count,
            adjacency,
        })
    }

    /// Number of nodes `N`; valid node ids are `1..=N`.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Whether `node` is a valid id for this network.
    pub fn contains(&self, node: NodeId) -> bool {
        node >= 1 && node <= self.node_count
    }

    /// Edge weight between `u` and `v`: `Some(w)` for an edge, `Some(0)` for
    /// `u == v`, `None` when there is no edge or either endpoint is out of
    /// range.
    pub fn weight(&self, u: NodeId, v: NodeId) -> Option<u32> {
        if !self.contains(u) || !self.contains(v) {
            return None;
        }
        self.adjacency[u][v]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_symmetric() {
        let network = RoadNetwork::new(3, &[(1, 2, 4), (2, 3, 1)]).expect("valid network");
        assert_eq!(network.weight(1, 2), Some(4));
        assert_eq!(network.weight(2, 1), Some(4));
        assert_eq!(network.weight(1, 3), None);
    }

    #[test]
    fn self_loop_weight_is_zero_even_when_configured() {
        let network = RoadNetwork::new(2, &[(1, 1, 99), (1, 2, 3)]).expect("valid network");
        assert_eq!(network.weight(1, 1), Some(0));
        assert_eq!(network.weight(2, 2), Some(0));
    }

    #[test]
    fn rejects_out_of_range_endpoints() {
        let err = RoadNetwork::new(3, &[(1, 4, 2)]).expect_err("endpoint 4 is out of range");
        assert!(matches!(
            err,
            NetworkError::InvalidEndpoint {
                from: 1,
                to: 4,
                node_count: 3
            }
        ));
        assert!(RoadNetwork::new(3, &[(0, 2, 2)]).is_err());
    }

    #[test]
    fn rejects_empty_and_oversized_networks() {
        assert!(matches!(
            RoadNetwork::new(0, &[]),
            Err(NetworkError::EmptyNetwork)
        ));
        assert!(matches!(
            RoadNetwork::new(MAX_NODES + 1, &[]),
            Err(NetworkError::TooManyNodes { .. })
        ));
    }

    #[test]
    fn weight_out_of_range_is_none() {
        let network = RoadNetwork::new(2, &[(1, 2, 1)]).expect("valid network");
        assert_eq!(network.weight(0, 1), None);
        assert_eq!(network.weight(1, 3), None);
    }
}
