//! End-to-end dispatch flow over the demo city network.

use dispatch_core::dispatch::Dispatcher;
use dispatch_core::drivers::{Driver, DriverId, DriverRegistry, DriverStatus};
use dispatch_core::error::DispatchError;
use dispatch_core::requests::{RequestId, RideRequest, TripCode};
use dispatch_core::routing::shortest_paths;
use dispatch_core::scenario::NetworkConfig;

fn dispatcher_with_driver_at(location: usize) -> Dispatcher {
    let network = NetworkConfig::city_demo().build().expect("demo network");
    let mut registry = DriverRegistry::new();
    registry
        .add(Driver::new(DriverId(7001), "marta", location))
        .expect("unique id");
    Dispatcher::new(network, registry)
}

#[test]
fn demo_city_reference_route() {
    let network = NetworkConfig::city_demo().build().expect("demo network");
    let paths = shortest_paths(&network, 1);
    assert_eq!(paths.distance_to(9), Some(14));
    assert_eq!(paths.path_to(9), vec![1, 3, 5, 7, 9]);
}

#[test]
fn full_trip_from_request_to_receipt() {
    let mut dispatcher = dispatcher_with_driver_at(1);
    let request = RideRequest::new(
        RequestId(1),
        "jon",
        TripCode::new(8642),
        1,
        9,
        dispatcher.network(),
    )
    .expect("valid request");
    dispatcher.submit(request);

    // Preview, then assign with the right code.
    let preview = dispatcher.match_front().expect("preview");
    assert_eq!(preview.driver, DriverId(7001));
    assert_eq!(preview.distance, 0);

    let receipt = dispatcher
        .assign_front(TripCode::new(8642))
        .expect("trip completes");
    assert_eq!(receipt.passenger, "jon");
    assert_eq!(receipt.distance, 14);
    assert_eq!(receipt.fare, 70.0);
    assert_eq!(receipt.route, vec![1, 3, 5, 7, 9]);

    let marta = dispatcher.registry().get(DriverId(7001)).expect("driver");
    assert_eq!(marta.location, 9);
    assert_eq!(marta.earnings, 70.0);
    assert_eq!(marta.status, DriverStatus::Available);
    assert!(dispatcher.queue().is_empty());
}

#[test]
fn out_of_bounds_requests_never_enter_the_queue() {
    let dispatcher = dispatcher_with_driver_at(1);
    let network = dispatcher.network();

    for (pickup, drop_off) in [(0, 5), (1, 13)] {
        let err = RideRequest::new(
            RequestId(2),
            "nina",
            TripCode::new(1000),
            pickup,
            drop_off,
            network,
        )
        .expect_err("out of bounds");
        assert!(matches!(err, DispatchError::InvalidNode { .. }));
    }
    assert!(dispatcher.queue().is_empty());
}

#[test]
fn code_mismatch_keeps_request_at_head_and_driver_available() {
    let mut dispatcher = dispatcher_with_driver_at(3);
    let request = RideRequest::new(
        RequestId(3),
        "omar",
        TripCode::new(5555),
        1,
        9,
        dispatcher.network(),
    )
    .expect("valid request");
    dispatcher.submit(request);

    let err = dispatcher
        .assign_front(TripCode::new(5554))
        .expect_err("wrong code");
    assert_eq!(err, DispatchError::CodeMismatch);

    assert_eq!(
        dispatcher.queue().front().expect("still queued").id(),
        RequestId(3)
    );
    assert_eq!(
        dispatcher.registry().get(DriverId(7001)).expect("driver").status,
        DriverStatus::Available
    );

    // A retry with the right code goes through.
    dispatcher
        .assign_front(TripCode::new(5555))
        .expect("retry succeeds");
}

#[test]
fn tie_between_equally_distant_drivers_goes_to_the_first_registered() {
    let network = NetworkConfig::city_demo().build().expect("demo network");
    let mut registry = DriverRegistry::new();
    // Both drivers sit on the pickup node: distance 0 for each.
    registry
        .add(Driver::new(DriverId(1), "first", 5))
        .expect("unique id");
    registry
        .add(Driver::new(DriverId(2), "second", 5))
        .expect("unique id");
    let mut dispatcher = Dispatcher::new(network, registry);

    let request = RideRequest::new(
        RequestId(4),
        "kay",
        TripCode::new(2468),
        5,
        4,
        dispatcher.network(),
    )
    .expect("valid request");
    dispatcher.submit(request);

    let candidate = dispatcher.match_front().expect("match");
    assert_eq!(candidate.driver, DriverId(1));
    assert_eq!(candidate.distance, 0);
}
