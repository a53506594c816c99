//! The dispatcher: ties queue, matching, verification and trip execution
//! together.
//!
//! One sequential actor owns the network, the driver registry and the
//! request queue; every operation runs to completion before the next. A
//! failed assignment attempt (no driver, wrong code) leaves all state
//! exactly as it was. Embedding this in a concurrent server would need an
//! exclusive lock around the read-status / verify-code / write-status
//! sequence and a per-request lock; the sequential contract here assumes
//! neither.

use tracing::{debug, info, warn};

use crate::drivers::{DriverId, DriverRegistry, DriverStatus};
use crate::error::DispatchError;
use crate::matching::{MatchCandidate, MatchingPolicy, NearestAvailable};
use crate::network::{NodeId, RoadNetwork};
use crate::pricing::trip_fare;
use crate::requests::{DispatchQueue, RequestId, RideRequest, TripCode};
use crate::routing::shortest_paths;

/// Outcome of a successfully executed trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripReceipt {
    pub request_id: RequestId,
    pub driver: DriverId,
    pub passenger: String,
    pub distance: u32,
    pub fare: f64,
    /// Forward-ordered route pickup → drop.
    pub route: Vec<NodeId>,
}

pub struct Dispatcher {
    network: RoadNetwork,
    registry: DriverRegistry,
    queue: DispatchQueue,
    matching: Box<dyn MatchingPolicy>,
}

impl Dispatcher {
    /// Dispatcher with the nearest-available matching rule.
    pub fn new(network: RoadNetwork, registry: DriverRegistry) -> Self {
        Self::with_matching(network, registry, Box::new(NearestAvailable))
    }

    pub fn with_matching(
        network: RoadNetwork,
        registry: DriverRegistry,
        matching: Box<dyn MatchingPolicy>,
    ) -> Self {
        Self {
            network,
            registry,
            queue: DispatchQueue::new(),
            matching,
        }
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    /// Mutable roster access for driver management (add/remove/status).
    /// The `OnRide` transition stays private to trip execution.
    pub fn registry_mut(&mut self) -> &mut DriverRegistry {
        &mut self.registry
    }

    pub fn queue(&self) -> &DispatchQueue {
        &self.queue
    }

    /// Append a validated request to the pending queue.
    pub fn submit(&mut self, request: RideRequest) {
        debug!(
            request = request.id().0,
            pickup = request.pickup(),
            drop_off = request.drop_off(),
            "ride request queued"
        );
        self.queue.enqueue(request);
    }

    /// Available drivers with a valid location, in registry order.
    fn candidates(&self) -> Vec<(DriverId, NodeId)> {
        self.registry
            .iter()
            .filter(|d| d.status == DriverStatus::Available && self.network.contains(d.location))
            .map(|d| (d.id, d.location))
            .collect()
    }

    /// Preview the match for the front request without mutating anything.
    ///
    /// Runs one shortest-path query from the pickup and applies the matching
    /// policy. The caller typically shows the result before collecting the
    /// trip code; [`Dispatcher::assign_front`] re-runs the match rather than
    /// trusting a stale preview.
    pub fn match_front(&self) -> Result<MatchCandidate, DispatchError> {
        let request = self.queue.front().ok_or(DispatchError::EmptyQueue)?;
        let paths = shortest_paths(&self.network, request.pickup());
        let candidate = self
            .matching
            .find_match(&paths, &self.candidates())
            .ok_or(DispatchError::NoAvailableDriver)?;
        debug!(
            request = request.id().0,
            driver = candidate.driver.0,
            distance = candidate.distance,
            "matched nearest driver"
        );
        Ok(candidate)
    }

    /// Assign the front request: match, verify the trip code, execute the
    /// trip.
    ///
    /// On `EmptyQueue`, `NoAvailableDriver` or `CodeMismatch` nothing is
    /// mutated and the request (if any) stays at the head for a retry.
    ///
    /// Once the code verifies, the trip executes and the request is
    /// dequeued — even when the drop turns out to be unreachable. In that
    /// case the driver reverts to `Available` with location and earnings
    /// untouched and `RouteUnreachable` is returned: the trip is resolved,
    /// not retried.
    pub fn assign_front(&mut self, supplied: TripCode) -> Result<TripReceipt, DispatchError> {
        let request = self.queue.front().ok_or(DispatchError::EmptyQueue)?;
        let paths = shortest_paths(&self.network, request.pickup());
        let candidate = self
            .matching
            .find_match(&paths, &self.candidates())
            .ok_or(DispatchError::NoAvailableDriver)?;

        if !request.code().verify(supplied) {
            debug!(request = request.id().0, "trip code mismatch");
            return Err(DispatchError::CodeMismatch);
        }

        // Commit point: the driver goes on ride and the request will leave
        // the queue whatever the routing outcome.
        let request = self
            .queue
            .pop_front()
            .ok_or(DispatchError::EmptyQueue)?;
        let driver = self
            .registry
            .get_mut(candidate.driver)
            .ok_or(DispatchError::UnknownDriver(candidate.driver))?;
        driver.status = DriverStatus::OnRide;

        self.execute_trip(candidate.driver, &request)
    }

    /// Drive the pickup → drop leg and settle the fare.
    fn execute_trip(
        &mut self,
        driver_id: DriverId,
        request: &RideRequest,
    ) -> Result<TripReceipt, DispatchError> {
        let paths = shortest_paths(&self.network, request.pickup());
        let route = paths.path_to(request.drop_off());
        let distance = paths.distance_to(request.drop_off());

        let driver = self
            .registry
            .get_mut(driver_id)
            .ok_or(DispatchError::UnknownDriver(driver_id))?;

        let (Some(distance), false) = (distance, route.is_empty()) else {
            driver.status = DriverStatus::Available;
            warn!(
                request = request.id().0,
                pickup = request.pickup(),
                drop_off = request.drop_off(),
                "trip resolved without route"
            );
            return Err(DispatchError::RouteUnreachable {
                pickup: request.pickup(),
                drop_off: request.drop_off(),
            });
        };

        let fare = trip_fare(distance);
        driver.earnings += fare;
        driver.location = request.drop_off();
        driver.status = DriverStatus::Available;

        info!(
            request = request.id().0,
            driver = driver_id.0,
            distance,
            fare,
            "trip completed"
        );

        Ok(TripReceipt {
            request_id: request.id(),
            driver: driver_id,
            passenger: request.passenger().to_string(),
            distance,
            fare,
            route,
        })
    }
}
