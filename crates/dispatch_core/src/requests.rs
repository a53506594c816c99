//! Ride requests and the pending-request queue.
//!
//! A request is validated against the network when it is built and is
//! immutable afterwards. The queue is strictly head-of-line FIFO: only the
//! front request is ever offered for assignment, and it leaves the queue
//! only when its trip has been executed.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DispatchError;
use crate::network::{NodeId, RoadNetwork};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u32);

/// Numeric one-time code the passenger presents to start the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripCode(u32);

impl TripCode {
    pub fn new(code: u32) -> Self {
        Self(code)
    }

    /// Random 4-digit code, generated at request intake.
    pub fn generate(rng: &mut impl Rng) -> Self {
        Self(rng.gen_range(1000..=9999))
    }

    /// The single verification point: exact equality with the supplied code.
    pub fn verify(&self, supplied: TripCode) -> bool {
        self.0 == supplied.0
    }

    /// Raw code value, for showing the passenger their OTP.
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// An accepted ride request. Pickup and drop are valid nodes by
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    id: RequestId,
    passenger: String,
    code: TripCode,
    pickup: NodeId,
    drop_off: NodeId,
}

impl RideRequest {
    /// Build a request, rejecting pickup or drop outside the network.
    pub fn new(
        id: RequestId,
        passenger: impl Into<String>,
        code: TripCode,
        pickup: NodeId,
        drop_off: NodeId,
        network: &RoadNetwork,
    ) -> Result<Self, DispatchError> {
        for node in [pickup, drop_off] {
            if !network.contains(node) {
                return Err(DispatchError::InvalidNode {
                    node,
                    node_count: network.node_count(),
                });
            }
        }
        Ok(Self {
            id,
            passenger: passenger.into(),
            code,
            pickup,
            drop_off,
        })
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn passenger(&self) -> &str {
        &self.passenger
    }

    pub fn code(&self) -> TripCode {
        self.code
    }

    pub fn pickup(&self) -> NodeId {
        self.pickup
    }

    pub fn drop_off(&self) -> NodeId {
        self.drop_off
    }
}

/// FIFO queue of pending ride requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchQueue {
    requests: VecDeque<RideRequest>,
}

impl DispatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, request: RideRequest) {
        self.requests.push_back(request);
    }

    /// The only request ever considered for assignment.
    pub fn front(&self) -> Option<&RideRequest> {
        self.requests.front()
    }

    // Dequeue happens only through trip execution; keeping this
    // crate-private preserves that invariant for library users.
    pub(crate) fn pop_front(&mut self) -> Option<RideRequest> {
        self.requests.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RideRequest> {
        self.requests.iter()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> RoadNetwork {
        RoadNetwork::new(12, &[(1, 2, 4)]).expect("network")
    }

    fn request(id: u32, pickup: NodeId, drop_off: NodeId) -> RideRequest {
        RideRequest::new(
            RequestId(id),
            "pat",
            TripCode::new(1234),
            pickup,
            drop_off,
            &network(),
        )
        .expect("valid request")
    }

    #[test]
    fn rejects_out_of_range_pickup_and_drop() {
        let network = network();
        let err = RideRequest::new(RequestId(1), "pat", TripCode::new(1), 0, 5, &network)
            .expect_err("pickup 0");
        assert_eq!(
            err,
            DispatchError::InvalidNode {
                node: 0,
                node_count: 12
            }
        );
        let err = RideRequest::new(RequestId(1), "pat", TripCode::new(1), 1, 13, &network)
            .expect_err("drop 13");
        assert_eq!(
            err,
            DispatchError::InvalidNode {
                node: 13,
                node_count: 12
            }
        );
    }

    #[test]
    fn queue_is_fifo() {
        let mut queue = DispatchQueue::new();
        queue.enqueue(request(1, 1, 2));
        queue.enqueue(request(2, 2, 1));
        queue.enqueue(request(3, 1, 3));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.front().expect("front").id(), RequestId(1));
        assert_eq!(queue.pop_front().expect("first").id(), RequestId(1));
        assert_eq!(queue.pop_front().expect("second").id(), RequestId(2));
        assert_eq!(queue.front().expect("front").id(), RequestId(3));
    }

    #[test]
    fn code_verifies_on_exact_match_only() {
        let code = TripCode::new(4321);
        assert!(code.verify(TripCode::new(4321)));
        assert!(!code.verify(TripCode::new(4322)));
    }
}
