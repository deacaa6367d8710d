pub mod atmosphere;
pub mod planet;

use crate::errors::Result;

use atmosphere::Atmosphere;
use planet::Planet;

/// Planet and atmosphere a descent runs in. Shared read-only by every step.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub planet: Planet,
    pub atmosphere: Atmosphere,
}

impl Environment {
    pub fn new(planet: Planet, atmosphere: Atmosphere) -> Self {
        Environment { planet, atmosphere }
    }

    pub fn earth() -> Self {
        Environment {
            planet: Planet::earth(),
            atmosphere: Atmosphere::standard(),
        }
    }

    pub fn gravity_acceleration(&self, altitude: f64) -> Result<f64> {
        self.planet.gravity_acceleration(altitude)
    }

    pub fn air_density(&self, altitude: f64) -> f64 {
        self.atmosphere.density(altitude)
    }

    pub fn is_in_atmosphere(&self, altitude: f64) -> bool {
        self.atmosphere.is_in_atmosphere(altitude)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::earth()
    }
}
