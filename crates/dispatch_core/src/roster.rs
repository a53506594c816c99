//! Flat-file persistence for the driver roster.
//!
//! Headered CSV, one row per driver. Loading is forgiving: a missing file
//! is an empty roster (first run) and malformed rows are skipped with a
//! warning, so one bad line doesn't take the whole roster down.

use std::path::Path;

use tracing::warn;

use crate::drivers::{Driver, DriverRegistry};
use crate::error::RosterError;

/// Load the roster from `path`. Missing file = empty registry.
pub fn load_roster(path: impl AsRef<Path>) -> Result<DriverRegistry, RosterError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(DriverRegistry::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut registry = DriverRegistry::new();
    for (row, record) in reader.deserialize::<Driver>().enumerate() {
        match record {
            Ok(driver) => {
                if let Err(err) = registry.add(driver) {
                    warn!(row, %err, "skipping roster row");
                }
            }
            Err(err) => warn!(row, %err, "skipping malformed roster row"),
        }
    }
    Ok(registry)
}

/// Write the roster to `path`, replacing any previous contents.
pub fn save_roster(path: impl AsRef<Path>, registry: &DriverRegistry) -> Result<(), RosterError> {
    let mut writer = csv::Writer::from_path(path)?;
    for driver in registry.iter() {
        writer.serialize(driver)?;
    }
    writer.flush()?;
    Ok(())
}
