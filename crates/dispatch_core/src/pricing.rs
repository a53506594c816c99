//! Flat-rate fare calculation.

/// Fare per network distance unit, in currency units.
pub const RATE_PER_UNIT: f64 = 5.0;

/// Fare for a trip of the given shortest-path distance.
pub fn trip_fare(distance: u32) -> f64 {
    f64::from(distance) * RATE_PER_UNIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fare_is_distance_times_rate() {
        assert_eq!(trip_fare(14), 70.0);
        assert_eq!(trip_fare(0), 0.0);
    }
}
