use crate::shared_data::current_timestamp;
use crate::simulation_engine::vehicles::Vehicle;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;

/// One completed crossing, as appended to the history CSV.
#[derive(Debug, Serialize, Deserialize)]
pub struct CrossingRecord {
    pub timestamp: u64,
    pub vehicle_id: u64,
    pub vehicle_type: String,
    pub origin: String,
    pub destination: String,
    pub wait_ms: u64,
}

impl CrossingRecord {
    pub fn for_vehicle(vehicle: &Vehicle, wait_ms: u64) -> Self {
        Self {
            timestamp: current_timestamp(),
            vehicle_id: vehicle.id,
            vehicle_type: vehicle.vehicle_type.label().to_string(),
            origin: vehicle.origin.to_string(),
            destination: vehicle.destination.to_string(),
            wait_ms,
        }
    }
}

/// Generic helper to append a record to a CSV file.
fn log_to_csv<T: Serialize>(filename: &str, record: &T) -> Result<(), Box<dyn Error>> {
    let file_exists = Path::new(filename).exists();
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(filename)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);
    wtr.serialize(record)?;
    wtr.flush()?;
    Ok(())
}

pub fn log_crossing(filename: &str, record: CrossingRecord) {
    if let Err(e) = log_to_csv(filename, &record) {
        eprintln!("Error logging crossing record: {}", e);
    }
}
