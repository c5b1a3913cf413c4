// simulation_engine/mod.rs
pub mod directions;
pub mod simulation;
pub mod vehicles;
