// src/shared_data.rs

use crate::simulation_engine::directions::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wait statistics for the vehicles of one origin direction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectionStats {
    pub vehicles: usize,
    pub min_wait_ms: u64,
    pub max_wait_ms: u64,
    pub mean_wait_ms: f64,
}

/// Summary of one finished simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub total_vehicles: usize,
    pub elapsed_ms: u64,
    pub per_direction: HashMap<Direction, DirectionStats>,
    pub timestamp: u64,
}

impl SimulationReport {
    /// Aggregates per-vehicle wait times, in milliseconds, keyed by origin.
    pub fn from_waits(waits: &[(Direction, u64)], elapsed_ms: u64) -> Self {
        let mut per_direction: HashMap<Direction, DirectionStats> = HashMap::new();
        for &(origin, wait_ms) in waits {
            let stats = per_direction.entry(origin).or_default();
            if stats.vehicles == 0 {
                stats.min_wait_ms = wait_ms;
                stats.max_wait_ms = wait_ms;
            } else {
                stats.min_wait_ms = stats.min_wait_ms.min(wait_ms);
                stats.max_wait_ms = stats.max_wait_ms.max(wait_ms);
            }
            stats.mean_wait_ms += wait_ms as f64;
            stats.vehicles += 1;
        }
        for stats in per_direction.values_mut() {
            stats.mean_wait_ms /= stats.vehicles as f64;
        }
        Self {
            total_vehicles: waits.len(),
            elapsed_ms,
            per_direction,
            timestamp: current_timestamp(),
        }
    }
}

/// Returns the current Unix timestamp in seconds.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_aggregates_per_direction() {
        let waits = vec![
            (Direction::North, 10),
            (Direction::North, 30),
            (Direction::East, 5),
        ];
        let report = SimulationReport::from_waits(&waits, 120);
        assert_eq!(report.total_vehicles, 3);
        let north = &report.per_direction[&Direction::North];
        assert_eq!(north.vehicles, 2);
        assert_eq!(north.min_wait_ms, 10);
        assert_eq!(north.max_wait_ms, 30);
        assert!((north.mean_wait_ms - 20.0).abs() < f64::EPSILON);
        assert_eq!(report.per_direction[&Direction::East].vehicles, 1);
    }
}
