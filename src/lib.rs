pub mod config;
pub mod constants;
pub mod environment_system;
pub mod errors;
pub mod inversion_system;
pub mod telemetry_system;
pub mod trajectory_system;

pub use constants::*;
pub use environment_system::atmosphere::{Atmosphere, DensityTable, Interpolation};
pub use environment_system::planet::Planet;
pub use environment_system::Environment;
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::acceleration::{acceleration, AccelerationModel};
pub use trajectory_system::aerodynamics::BallisticBody;
pub use trajectory_system::kinematics::{
    integrate, IntegrationPhase, IntegratorSettings, SimulationResult, Simulator, State,
};

// Re-export commonly used items from inversion_system
pub use inversion_system::golden_section::{minimize, GoldenSectionSearch, SearchResult};
pub use inversion_system::time_of_flight::{time_to_altitude, TimeOfFlightInversion};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::Telemetry;

pub use config::{load_config, SimulationConfig};

/// Gravity-only acceleration above Earth at `altitude`.
pub fn gravity_acceleration(altitude: f64) -> errors::Result<f64> {
    Planet::earth().gravity_acceleration(altitude)
}
