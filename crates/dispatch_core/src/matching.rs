//! Driver-to-request matching over a shortest-path query.
//!
//! The policy sees the per-query [`ShortestPaths`] plus the candidate
//! drivers the dispatcher collected (available drivers with a valid
//! location, in registry order), and picks one. Kept behind a trait so the
//! nearest-driver rule can be swapped without touching the dispatcher.

use crate::drivers::DriverId;
use crate::network::NodeId;
use crate::routing::ShortestPaths;

/// A chosen driver and the shortest-path distance to the pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCandidate {
    pub driver: DriverId,
    pub location: NodeId,
    pub distance: u32,
}

pub trait MatchingPolicy: Send + Sync {
    /// Pick a driver from `candidates`, or `None` when no candidate
    /// qualifies. `paths` was computed from the request's pickup node.
    fn find_match(
        &self,
        paths: &ShortestPaths,
        candidates: &[(DriverId, NodeId)],
    ) -> Option<MatchCandidate>;
}

/// Nearest available driver by shortest-path distance to the pickup.
///
/// Scans candidates in order and keeps the minimum; only a strictly smaller
/// distance replaces the current best, so the first driver at the minimum
/// distance wins. Drivers at unreachable locations never qualify.
#[derive(Debug, Default)]
pub struct NearestAvailable;

impl MatchingPolicy for NearestAvailable {
    fn find_match(
        &self,
        paths: &ShortestPaths,
        candidates: &[(DriverId, NodeId)],
    ) -> Option<MatchCandidate> {
        let mut best: Option<MatchCandidate> = None;
        for &(driver, location) in candidates {
            let Some(distance) = paths.distance_to(location) else {
                continue;
            };
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(MatchCandidate {
                    driver,
                    location,
                    distance,
                });
            }
        }
        best
    }
}
