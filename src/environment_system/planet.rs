use crate::constants::{EARTH_MASS, EARTH_RADIUS, GRAVITATIONAL_CONSTANT};
use crate::errors::{Result, SimulationError};

#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    pub name: String,
    pub gravitational_constant: f64,
    pub mass: f64,
    pub radius: f64,
}

impl Planet {
    pub fn new(name: String, gravitational_constant: f64, mass: f64, radius: f64) -> Result<Self> {
        for (label, value) in [
            ("gravitational constant", gravitational_constant),
            ("planet mass", mass),
            ("planet radius", radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::InvalidParameter(format!(
                    "{} must be positive and finite, got {}",
                    label, value
                )));
            }
        }

        Ok(Planet {
            name,
            gravitational_constant,
            mass,
            radius,
        })
    }

    pub fn earth() -> Self {
        Planet {
            name: "Earth".to_string(),
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            mass: EARTH_MASS,
            radius: EARTH_RADIUS,
        }
    }

    pub fn gravitational_parameter(&self) -> f64 {
        self.gravitational_constant * self.mass
    }

    /// Signed radial acceleration at `altitude`, negative toward the surface.
    ///
    /// Altitudes below the surface are extrapolated; the planet's center
    /// (`altitude == -radius`) is singular and reported as an error.
    pub fn gravity_acceleration(&self, altitude: f64) -> Result<f64> {
        let distance = self.radius + altitude;
        if distance == 0.0 || !distance.is_finite() {
            return Err(SimulationError::NumericDomainError(format!(
                "gravity is undefined at altitude {} m (planet radius {} m)",
                altitude, self.radius
            )));
        }

        Ok(-self.gravitational_parameter() / distance.powi(2))
    }

    pub fn surface_gravity(&self) -> f64 {
        self.gravitational_parameter() / self.radius.powi(2)
    }

    pub fn escape_velocity(&self, altitude: f64) -> f64 {
        let distance = self.radius + altitude;
        (2.0 * self.gravitational_parameter() / distance).sqrt()
    }
}
