use std::f64::consts::PI;

use crate::errors::{Result, SimulationError};

/// Point-mass body parameters. The drag coefficient is derived from the
/// other three so the set stays consistent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallisticBody {
    pub mass: f64,                  // kg
    pub radius: f64,                // m
    pub ballistic_coefficient: f64, // kg/m²
}

impl BallisticBody {
    pub fn new(mass: f64, radius: f64, ballistic_coefficient: f64) -> Result<Self> {
        for (label, value) in [
            ("mass", mass),
            ("radius", radius),
            ("ballistic coefficient", ballistic_coefficient),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::InvalidParameter(format!(
                    "body {} must be positive and finite, got {}",
                    label, value
                )));
            }
        }

        Ok(BallisticBody {
            mass,
            radius,
            ballistic_coefficient,
        })
    }

    pub fn diameter(&self) -> f64 {
        2.0 * self.radius
    }

    pub fn cross_section_area(&self) -> f64 {
        PI * self.radius.powi(2)
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.mass / (self.diameter().powi(2) * self.ballistic_coefficient)
    }

    pub fn dynamic_pressure(&self, air_density: f64, velocity: f64) -> f64 {
        0.5 * air_density * velocity.powi(2)
    }

    /// Drag deceleration magnitude; never negative.
    pub fn drag_acceleration(&self, air_density: f64, velocity: f64) -> f64 {
        self.dynamic_pressure(air_density, velocity)
            * self.drag_coefficient()
            * self.cross_section_area()
            / self.mass
    }
}
