// Simulation defaults

pub const VEHICLE_COUNT: usize = 40;
pub const MAX_SPAWN_DELAY_MS: u64 = 60;
pub const BASE_CROSSING_TIME_MS: u64 = 10;
pub const SIMULATION_SEED: u64 = 1;

// Monitoring output
pub const CROSSING_LOG_FILE: &str = "crossing_history.csv";
