// simulation_main.rs
use traffic_synch::simulation_engine::simulation::{run_simulation, SimulationConfig};

fn main() {
    env_logger::init();

    let config = SimulationConfig::default();
    let report = run_simulation(&config);

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing simulation report: {}", e),
    }
}
