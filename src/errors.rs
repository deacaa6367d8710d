use thiserror::Error;

use crate::config::ConfigError;
use crate::trajectory_system::kinematics::State;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(
        "Integration did not converge after {iterations} steps \
         (altitude = {:.3} m, velocity = {:.3} m/s, t = {:.2} s)",
        .state.altitude,
        .state.velocity,
        .state.elapsed_time
    )]
    DidNotConverge { iterations: usize, state: State },

    #[error("Invalid search bracket [{lo}, {hi}]")]
    InvalidBracket { lo: f64, hi: f64 },

    #[error("Search exhausted {iterations} iterations with bracket [{lo}, {hi}] still open")]
    SearchExhausted { iterations: usize, lo: f64, hi: f64 },

    #[error("Numeric domain error: {0}")]
    NumericDomainError(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
