//! Scenario configuration loaded from TOML.
//!
//! Every section and field has a default, so an empty file describes the
//! standard Earth setup. Values are validated when converted into the
//! simulation types, not when parsed.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    ATMOSPHERE_BOUNDARY, EARTH_MASS, EARTH_RADIUS, GRAVITATIONAL_CONSTANT, MAX_INTEGRATION_STEPS,
    MAX_SEARCH_ITERATIONS, SEARCH_LOWER_ALTITUDE, SEARCH_TOLERANCE, SEARCH_UPPER_ALTITUDE,
    STANDARD_DENSITY_TABLE, TARGET_ALTITUDE, TELEMETRY_SAMPLE_INTERVAL, TIME_STEP,
};
use crate::environment_system::atmosphere::{Atmosphere, DensityTable, Interpolation};
use crate::environment_system::planet::Planet;
use crate::environment_system::Environment;
use crate::errors::Result;
use crate::inversion_system::golden_section::GoldenSectionSearch;
use crate::inversion_system::time_of_flight::TimeOfFlightInversion;
use crate::trajectory_system::acceleration::AccelerationModel;
use crate::trajectory_system::kinematics::{IntegratorSettings, Simulator};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render TOML: {0}")]
    Render(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub planet: PlanetConfig,
    pub atmosphere: AtmosphereConfig,
    pub integrator: IntegratorConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanetConfig {
    pub name: String,
    pub gravitational_constant: f64,
    pub mass_kg: f64,
    pub radius_m: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AtmosphereConfig {
    pub boundary_altitude_m: f64,
    pub interpolation: Interpolation,
    pub density: Vec<DensityBreakpoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DensityBreakpoint {
    pub altitude_m: f64,
    pub density_kg_m3: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegratorConfig {
    pub step_s: f64,
    pub target_altitude_m: f64,
    pub max_iterations: usize,
    /// Steps between telemetry samples; 0 disables sampling.
    pub sample_interval: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub tolerance_m: f64,
    pub lower_m: f64,
    pub upper_m: f64,
    pub max_iterations: usize,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        PlanetConfig {
            name: "Earth".to_string(),
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            mass_kg: EARTH_MASS,
            radius_m: EARTH_RADIUS,
        }
    }
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        AtmosphereConfig {
            boundary_altitude_m: ATMOSPHERE_BOUNDARY,
            interpolation: Interpolation::Nearest,
            density: STANDARD_DENSITY_TABLE
                .iter()
                .map(|&(altitude_m, density_kg_m3)| DensityBreakpoint {
                    altitude_m,
                    density_kg_m3,
                })
                .collect(),
        }
    }
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        IntegratorConfig {
            step_s: TIME_STEP,
            target_altitude_m: TARGET_ALTITUDE,
            max_iterations: MAX_INTEGRATION_STEPS,
            sample_interval: TELEMETRY_SAMPLE_INTERVAL,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            tolerance_m: SEARCH_TOLERANCE,
            lower_m: SEARCH_LOWER_ALTITUDE,
            upper_m: SEARCH_UPPER_ALTITUDE,
            max_iterations: MAX_SEARCH_ITERATIONS,
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> std::result::Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn planet(&self) -> Result<Planet> {
        Planet::new(
            self.planet.name.clone(),
            self.planet.gravitational_constant,
            self.planet.mass_kg,
            self.planet.radius_m,
        )
    }

    pub fn atmosphere(&self) -> Result<Atmosphere> {
        let table = DensityTable::new(
            self.atmosphere
                .density
                .iter()
                .map(|row| (row.altitude_m, row.density_kg_m3))
                .collect(),
        )?;
        Atmosphere::new(
            self.atmosphere.boundary_altitude_m,
            table,
            self.atmosphere.interpolation,
        )
    }

    pub fn environment(&self) -> Result<Environment> {
        Ok(Environment::new(self.planet()?, self.atmosphere()?))
    }

    pub fn integrator_settings(&self) -> Result<IntegratorSettings> {
        let settings = IntegratorSettings {
            step: self.integrator.step_s,
            target_altitude: self.integrator.target_altitude_m,
            max_iterations: self.integrator.max_iterations,
            sample_interval: Some(self.integrator.sample_interval).filter(|&interval| interval > 0),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn golden_section(&self) -> Result<GoldenSectionSearch> {
        GoldenSectionSearch::new(self.search.tolerance_m, self.search.max_iterations)
    }

    pub fn simulator(&self, model: AccelerationModel) -> Result<Simulator> {
        Simulator::new(self.environment()?, model, self.integrator_settings()?)
    }

    /// Gravity-only inversion over the configured search bracket.
    pub fn inversion(&self) -> Result<TimeOfFlightInversion> {
        let mut simulator = self.simulator(AccelerationModel::GravityOnly)?;
        simulator.settings.sample_interval = None;
        TimeOfFlightInversion::new(
            simulator,
            self.golden_section()?,
            self.search.lower_m,
            self.search.upper_m,
        )
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SimulationConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::from)?;
    Ok(SimulationConfig::from_toml_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SimulationError;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_file_is_standard_earth() {
        let config = SimulationConfig::from_toml_str("").unwrap();

        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.environment().unwrap(), Environment::earth());
        assert_eq!(
            config.integrator_settings().unwrap(),
            IntegratorSettings::default()
        );
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [integrator]
            step_s = 0.05

            [atmosphere]
            interpolation = "linear"
            "#,
        )
        .unwrap();

        let settings = config.integrator_settings().unwrap();
        assert_relative_eq!(settings.step, 0.05);
        assert_eq!(settings.max_iterations, MAX_INTEGRATION_STEPS);
        assert_eq!(
            config.atmosphere().unwrap().interpolation,
            Interpolation::LinearInterpolate
        );
        assert_eq!(config.atmosphere.density.len(), STANDARD_DENSITY_TABLE.len());
    }

    #[test]
    fn test_custom_planet_and_table() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [planet]
            name = "Mars"
            mass_kg = 6.39e23
            radius_m = 3389500.0

            [atmosphere]
            boundary_altitude_m = 80000.0

            [[atmosphere.density]]
            altitude_m = 0.0
            density_kg_m3 = 0.020

            [[atmosphere.density]]
            altitude_m = 10000.0
            density_kg_m3 = 0.009
            "#,
        )
        .unwrap();

        let environment = config.environment().unwrap();
        assert_eq!(environment.planet.name, "Mars");
        assert_relative_eq!(environment.planet.gravitational_constant, GRAVITATIONAL_CONSTANT);
        assert_relative_eq!(environment.air_density(6_000.0), 0.009);
        assert!(!environment.is_in_atmosphere(90_000.0));
    }

    #[test]
    fn test_zero_sample_interval_disables_sampling() {
        let config = SimulationConfig::from_toml_str("[integrator]\nsample_interval = 0\n").unwrap();

        assert_eq!(config.integrator_settings().unwrap().sample_interval, None);
    }

    #[test]
    fn test_invalid_values_fail_on_conversion() {
        let config = SimulationConfig::from_toml_str("[planet]\nradius_m = -1.0\n").unwrap();
        assert!(matches!(
            config.environment(),
            Err(SimulationError::InvalidParameter(_))
        ));

        let config = SimulationConfig::from_toml_str("[integrator]\nstep_s = 0.0\n").unwrap();
        assert!(config.integrator_settings().is_err());

        let config =
            SimulationConfig::from_toml_str("[search]\nlower_m = 5.0\nupper_m = 1.0\n").unwrap();
        assert!(matches!(
            config.inversion(),
            Err(SimulationError::InvalidBracket { .. })
        ));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = SimulationConfig::from_toml_str("[planet]\nmass = 1.0\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rendered_config_parses_back() {
        let config = SimulationConfig::default();

        let rendered = config.to_toml_string().unwrap();

        assert_eq!(SimulationConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = load_config("does/not/exist.toml");

        assert!(matches!(
            result,
            Err(SimulationError::Config(ConfigError::Io(_)))
        ));
    }
}
