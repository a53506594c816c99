//! Driver records and the ordered driver registry.
//!
//! The registry is an explicitly ordered sequence: iteration order is
//! insertion order, and matching ties resolve to the first driver in that
//! order. Callers hold [`DriverId`] handles instead of references so no
//! borrow lives across a dispatch verification step.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DispatchError;
use crate::network::{NodeId, RoadNetwork};

/// Copyable handle into the [`DriverRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DriverId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverStatus {
    Available,
    OnRide,
    Offline,
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverStatus::Available => write!(f, "Available"),
            DriverStatus::OnRide => write!(f, "On Ride"),
            DriverStatus::Offline => write!(f, "Offline"),
        }
    }
}

/// One driver. Earnings only ever increase; location only changes when a
/// trip completes; `OnRide` is entered and left exclusively by the
/// dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub status: DriverStatus,
    pub earnings: f64,
    pub location: NodeId,
}

impl Driver {
    /// A fresh driver: available, zero earnings.
    pub fn new(id: DriverId, name: impl Into<String>, location: NodeId) -> Self {
        Self {
            id,
            name: name.into(),
            status: DriverStatus::Available,
            earnings: 0.0,
            location,
        }
    }

    /// A fresh driver with a random 4-digit id and a random valid location,
    /// the way the intake flow creates them.
    pub fn spawn_random(
        name: impl Into<String>,
        network: &RoadNetwork,
        rng: &mut impl Rng,
    ) -> Self {
        let id = DriverId(rng.gen_range(1000..=9999));
        let location = rng.gen_range(1..=network.node_count());
        Self::new(id, name, location)
    }
}

/// Ordered collection of drivers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverRegistry {
    drivers: Vec<Driver>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver. Ids are unique; a duplicate is rejected so handle
    /// lookups stay unambiguous.
    pub fn add(&mut self, driver: Driver) -> Result<DriverId, DispatchError> {
        if self.get(driver.id).is_some() {
            return Err(DispatchError::DuplicateDriver(driver.id));
        }
        let id = driver.id;
        self.drivers.push(driver);
        Ok(id)
    }

    /// Remove a driver from the roster, returning the record.
    pub fn remove(&mut self, id: DriverId) -> Result<Driver, DispatchError> {
        let index = self
            .drivers
            .iter()
            .position(|d| d.id == id)
            .ok_or(DispatchError::UnknownDriver(id))?;
        Ok(self.drivers.remove(index))
    }

    pub fn get(&self, id: DriverId) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == id)
    }

    pub fn get_mut(&mut self, id: DriverId) -> Option<&mut Driver> {
        self.drivers.iter_mut().find(|d| d.id == id)
    }

    /// Drivers in insertion order. Matching scans this order, so the order
    /// is part of the tie-break contract.
    pub fn iter(&self) -> impl Iterator<Item = &Driver> {
        self.drivers.iter()
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Roster-management status change (Available/Offline). Rejected while
    /// the driver is on a ride; the dispatcher owns that transition.
    pub fn set_status(&mut self, id: DriverId, status: DriverStatus) -> Result<(), DispatchError> {
        let driver = self
            .drivers
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(DispatchError::UnknownDriver(id))?;
        if driver.status == DriverStatus::OnRide {
            return Err(DispatchError::DriverOnRide(id));
        }
        driver.status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(names: &[(u32, &str)]) -> DriverRegistry {
        let mut registry = DriverRegistry::new();
        for &(id, name) in names {
            registry
                .add(Driver::new(DriverId(id), name, 1))
                .expect("unique id");
        }
        registry
    }

    #[test]
    fn iterates_in_insertion_order() {
        let registry = registry_with(&[(3, "carol"), (1, "alice"), (2, "bob")]);
        let ids: Vec<u32> = registry.iter().map(|d| d.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut registry = registry_with(&[(7, "dora")]);
        let err = registry
            .add(Driver::new(DriverId(7), "impostor", 2))
            .expect_err("duplicate id");
        assert_eq!(err, DispatchError::DuplicateDriver(DriverId(7)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn status_change_is_blocked_while_on_ride() {
        let mut registry = registry_with(&[(5, "eve")]);
        registry.get_mut(DriverId(5)).expect("driver").status = DriverStatus::OnRide;

        let err = registry
            .set_status(DriverId(5), DriverStatus::Offline)
            .expect_err("on-ride driver");
        assert_eq!(err, DispatchError::DriverOnRide(DriverId(5)));
        assert_eq!(
            registry.get(DriverId(5)).expect("driver").status,
            DriverStatus::OnRide
        );
    }

    #[test]
    fn remove_unknown_driver_fails() {
        let mut registry = registry_with(&[(5, "eve")]);
        assert_eq!(
            registry.remove(DriverId(9)),
            Err(DispatchError::UnknownDriver(DriverId(9)))
        );
        let removed = registry.remove(DriverId(5)).expect("present");
        assert_eq!(removed.name, "eve");
        assert!(registry.is_empty());
    }

    #[test]
    fn random_spawn_lands_on_a_valid_node() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let network = RoadNetwork::new(5, &[(1, 2, 1)]).expect("network");
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let driver = Driver::spawn_random("sam", &network, &mut rng);
            assert!(network.contains(driver.location));
            assert!((1000..=9999).contains(&driver.id.0));
            assert_eq!(driver.status, DriverStatus::Available);
            assert_eq!(driver.earnings, 0.0);
        }
    }
}
