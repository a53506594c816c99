//! Error types for network construction, dispatch operations and roster I/O.
//!
//! Dispatch errors are recoverable outcomes reported to the caller; none of
//! them should terminate the process. Network errors are configuration-time
//! contract violations and are fatal at startup.

use std::error::Error;
use std::fmt;

use crate::drivers::DriverId;
use crate::network::{NodeId, MAX_NODES};

/// Configuration-time network construction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkError {
    /// `node_count == 0`.
    EmptyNetwork,
    /// `node_count` above [`MAX_NODES`].
    TooManyNodes { requested: usize },
    /// An edge endpoint outside `[1, node_count]`.
    InvalidEndpoint {
        from: NodeId,
        to: NodeId,
        node_count: usize,
    },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::EmptyNetwork => write!(f, "network must have at least one node"),
            NetworkError::TooManyNodes { requested } => {
                write!(f, "{requested} nodes requested, maximum is {MAX_NODES}")
            }
            NetworkError::InvalidEndpoint {
                from,
                to,
                node_count,
            } => write!(
                f,
                "edge {from}-{to} has an endpoint outside 1..={node_count}"
            ),
        }
    }
}

impl Error for NetworkError {}

/// Recoverable dispatch outcome. State is left exactly as before the failed
/// attempt, with one deliberate exception: [`DispatchError::RouteUnreachable`]
/// is reported *after* the trip has been resolved (driver reverted, request
/// dequeued) — see `Dispatcher::assign_front`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Pickup or drop outside `[1, node_count]`; the request never enters
    /// the queue.
    InvalidNode { node: NodeId, node_count: usize },
    /// No pending ride request to act on.
    EmptyQueue,
    /// No available driver can reach the pickup node.
    NoAvailableDriver,
    /// Supplied trip code does not match the request's code.
    CodeMismatch,
    /// Accepted trip has no route from pickup to drop.
    RouteUnreachable { pickup: NodeId, drop_off: NodeId },
    /// No driver with this id in the registry.
    UnknownDriver(DriverId),
    /// Driver id already present in the registry.
    DuplicateDriver(DriverId),
    /// Roster operation rejected while the driver is on a ride.
    DriverOnRide(DriverId),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::InvalidNode { node, node_count } => {
                write!(f, "node {node} is outside 1..={node_count}")
            }
            DispatchError::EmptyQueue => write!(f, "no pending ride requests"),
            DispatchError::NoAvailableDriver => write!(f, "no available driver"),
            DispatchError::CodeMismatch => write!(f, "trip code does not match"),
            DispatchError::RouteUnreachable { pickup, drop_off } => {
                write!(f, "no route from pickup {pickup} to drop {drop_off}")
            }
            DispatchError::UnknownDriver(id) => write!(f, "no driver with id {}", id.0),
            DispatchError::DuplicateDriver(id) => {
                write!(f, "driver id {} already registered", id.0)
            }
            DispatchError::DriverOnRide(id) => {
                write!(f, "driver {} is on a ride", id.0)
            }
        }
    }
}

impl Error for DispatchError {}

/// Roster persistence failure (I/O or CSV).
#[derive(Debug)]
pub enum RosterError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Io(err) => write!(f, "roster file error: {err}"),
            RosterError::Csv(err) => write!(f, "roster format error: {err}"),
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RosterError::Io(err) => Some(err),
            RosterError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        RosterError::Io(err)
    }
}

impl From<csv::Error> for RosterError {
    fn from(err: csv::Error) -> Self {
        RosterError::Csv(err)
    }
}
