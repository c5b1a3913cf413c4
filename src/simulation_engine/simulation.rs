// simulation.rs
use crate::control_system::intersection_sync::IntersectionSync;
use crate::global_variables::{
    BASE_CROSSING_TIME_MS, CROSSING_LOG_FILE, MAX_SPAWN_DELAY_MS, SIMULATION_SEED, VEHICLE_COUNT,
};
use crate::monitoring::crossing_log::{log_crossing, CrossingRecord};
use crate::shared_data::SimulationReport;
use crate::simulation_engine::directions::Direction;
use crate::simulation_engine::vehicles::{Vehicle, VehicleType};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Tunables for one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub vehicles: usize,
    pub max_spawn_delay_ms: u64,
    pub base_crossing_time_ms: u64,
    pub seed: u64,
    /// CSV file the per-vehicle history is appended to; `None` disables it.
    pub crossing_log: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            vehicles: VEHICLE_COUNT,
            max_spawn_delay_ms: MAX_SPAWN_DELAY_MS,
            base_crossing_time_ms: BASE_CROSSING_TIME_MS,
            seed: SIMULATION_SEED,
            crossing_log: Some(CROSSING_LOG_FILE.to_string()),
        }
    }
}

/// Generates a random vehicle. Destination is always distinct from origin.
pub fn spawn_vehicle(id: u64, rng: &mut SmallRng) -> Vehicle {
    let rand_val: f64 = rng.random_range(0.0..1.0);
    let vehicle_type = if rand_val < 0.65 {
        VehicleType::Car
    } else if rand_val < 0.8 {
        VehicleType::Bus
    } else if rand_val < 0.95 {
        VehicleType::Truck
    } else {
        VehicleType::EmergencyVan
    };

    let origin = Direction::ALL[rng.random_range(0..4)];
    let mut destination = Direction::ALL[rng.random_range(0..4)];
    while destination == origin {
        destination = Direction::ALL[rng.random_range(0..4)];
    }

    Vehicle::new(id, vehicle_type, origin, destination)
}

/// Runs the full simulation: one OS thread per vehicle, each entering and
/// leaving the shared intersection exactly once. Returns once every thread
/// has been joined.
pub fn run_simulation(config: &SimulationConfig) -> SimulationReport {
    let sync = Arc::new(IntersectionSync::new());
    let waits: Arc<Mutex<Vec<(Direction, u64)>>> = Arc::new(Mutex::new(Vec::new()));
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let started = Instant::now();

    let mut handles = Vec::with_capacity(config.vehicles);
    for id in 0..config.vehicles as u64 {
        let vehicle = spawn_vehicle(id, &mut rng);
        let spawn_delay = Duration::from_millis(rng.random_range(0..=config.max_spawn_delay_ms));
        let crossing_time = Duration::from_millis(
            (config.base_crossing_time_ms as f64 * vehicle.vehicle_type.crossing_factor()) as u64,
        );
        let sync = Arc::clone(&sync);
        let waits = Arc::clone(&waits);
        let crossing_log = config.crossing_log.clone();

        handles.push(thread::spawn(move || {
            thread::sleep(spawn_delay);

            let arrived = Instant::now();
            sync.before_entry(vehicle.origin, vehicle.destination);
            let wait_ms = arrived.elapsed().as_millis() as u64;
            log::info!(
                "vehicle {} ({}) crossing {} -> {} after waiting {} ms",
                vehicle.id,
                vehicle.vehicle_type.label(),
                vehicle.origin,
                vehicle.destination,
                wait_ms
            );

            thread::sleep(crossing_time);
            sync.after_exit(vehicle.origin, vehicle.destination);

            if let Some(ref filename) = crossing_log {
                log_crossing(filename, CrossingRecord::for_vehicle(&vehicle, wait_ms));
            }
            waits.lock().unwrap().push((vehicle.origin, wait_ms));
        }));
    }

    for handle in handles {
        handle.join().expect("vehicle thread panicked");
    }

    // All vehicle threads have drained; the controller must be idle before
    // it is torn down with the last Arc clone.
    assert!(sync.snapshot().is_idle(), "intersection not drained after join");

    let waits = waits.lock().unwrap();
    let report = SimulationReport::from_waits(&waits, started.elapsed().as_millis() as u64);
    log::info!(
        "simulation finished: {} vehicles in {} ms",
        report.total_vehicles,
        report.elapsed_ms
    );
    report
}
