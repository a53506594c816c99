//! Single-source shortest paths over a [`RoadNetwork`].
//!
//! Classic dense Dijkstra: each round scans for the unvisited node with the
//! minimum finite tentative distance (first minimum in node-id order wins),
//! then relaxes every finite-weight neighbor. For the network sizes this
//! engine serves a binary heap buys nothing.
//!
//! A [`ShortestPaths`] value is scoped to one query from one source. It is
//! never cached across network or driver mutations; callers recompute.

use crate::network::{NodeId, RoadNetwork};

/// Distances and predecessors from one source node.
///
/// `None` distance means unreachable (the "infinite" sentinel). Index 0 of
/// both vectors is unused so node ids index directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    source: NodeId,
    dist: Vec<Option<u32>>,
    parent: Vec<Option<NodeId>>,
}

impl ShortestPaths {
    /// Shortest distance from the source to `dest`, or `None` when `dest`
    /// is unreachable or out of range. `distance_to(source)` is `Some(0)`.
    pub fn distance_to(&self, dest: NodeId) -> Option<u32> {
        self.dist.get(dest).copied().flatten()
    }

    /// Reconstruct the forward-ordered route `source, …, dest`.
    ///
    /// Returns `[source]` when `dest == source`, and an empty vec when the
    /// predecessor walk from `dest` never reaches the source (no route).
    /// The empty result is what distinguishes "no route" from the trivial
    /// one-node route.
    pub fn path_to(&self, dest: NodeId) -> Vec<NodeId> {
        if dest >= self.parent.len() || dest < 1 {
            return Vec::new();
        }
        if dest == self.source {
            return vec![self.source];
        }

        let mut route = Vec::new();
        let mut current = dest;
        loop {
            route.push(current);
            match self.parent[current] {
                Some(prev) if prev == self.source => {
                    route.push(self.source);
                    route.reverse();
                    return route;
                }
                Some(prev) => current = prev,
                None => return Vec::new(),
            }
        }
    }
}

/// Run Dijkstra from `source` over the whole network.
///
/// A source outside the network yields an all-unreachable result rather than
/// panicking; the caller validated the node when the request was built.
pub fn shortest_paths(network: &RoadNetwork, source: NodeId) -> ShortestPaths {
    let n = network.node_count();
    let mut dist: Vec<Option<u32>> = vec![None; n + 1];
    let mut parent: Vec<Option<NodeId>> = vec![None; n + 1];
    let mut visited = vec![false; n + 1];

    if network.contains(source) {
        dist[source] = Some(0);

        for _ in 0..n {
            // Unvisited node with minimum finite tentative distance; the
            // first minimum in the scan wins ties.
            let mut current: Option<(NodeId, u32)> = None;
            for node in 1..=n {
                if visited[node] {
                    continue;
                }
                if let Some(d) = dist[node] {
                    if current.map_or(true, |(_, best)| d < best) {
                        current = Some((node, d));
                    }
                }
            }

            let Some((u, d_u)) = current else {
                // Every remaining node is unreachable.
                break;
            };
            visited[u] = true;

            for v in 1..=n {
                if let Some(weight) = network.weight(u, v) {
                    // A path cost past u32::MAX is not representable;
                    // treat such a route as infinite instead of wrapping.
                    let Some(candidate) = d_u.checked_add(weight) else {
                        continue;
                    };
                    if dist[v].map_or(true, |d_v| candidate < d_v) {
                        dist[v] = Some(candidate);
                        parent[v] = Some(u);
                    }
                }
            }
        }
    }

    ShortestPaths {
        source,
        dist,
        parent,
    }
}
