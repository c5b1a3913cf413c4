use crate::simulation_engine::directions::Direction;

/// Different types of vehicles in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    Car,
    Bus,
    Truck,
    EmergencyVan,
}

impl VehicleType {
    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Car => "Car",
            VehicleType::Bus => "Bus",
            VehicleType::Truck => "Truck",
            VehicleType::EmergencyVan => "EmergencyVan",
        }
    }

    /// How much longer than a car this vehicle occupies the intersection.
    /// Vehicle type never affects admission, only the simulated crossing time.
    pub fn crossing_factor(self) -> f64 {
        match self {
            VehicleType::Car => 1.0,
            VehicleType::Bus => 1.8,
            VehicleType::Truck => 2.2,
            VehicleType::EmergencyVan => 0.8,
        }
    }
}

/// A vehicle approaching the intersection. It exists only as the arguments
/// carried by one simulation thread; the controller never stores vehicles.
#[derive(Debug, Clone, Copy)]
pub struct Vehicle {
    pub id: u64,
    pub vehicle_type: VehicleType,
    pub origin: Direction,
    pub destination: Direction,
}

impl Vehicle {
    pub fn new(
        id: u64,
        vehicle_type: VehicleType,
        origin: Direction,
        destination: Direction,
    ) -> Self {
        Self {
            id,
            vehicle_type,
            origin,
            destination,
        }
    }
}
