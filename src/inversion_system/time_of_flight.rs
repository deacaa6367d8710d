use crate::constants::{SEARCH_LOWER_ALTITUDE, SEARCH_UPPER_ALTITUDE};
use crate::environment_system::Environment;
use crate::errors::{Result, SimulationError};
use crate::trajectory_system::kinematics::{IntegratorSettings, Simulator};

use super::golden_section::{GoldenSectionSearch, SearchResult};

/// Finds the release altitude whose fall from rest lasts a given time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeOfFlightInversion {
    pub simulator: Simulator,
    pub search: GoldenSectionSearch,
    pub lower: f64,
    pub upper: f64,
}

impl TimeOfFlightInversion {
    pub fn new(
        simulator: Simulator,
        search: GoldenSectionSearch,
        lower: f64,
        upper: f64,
    ) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(SimulationError::InvalidBracket {
                lo: lower,
                hi: upper,
            });
        }

        Ok(TimeOfFlightInversion {
            simulator,
            search,
            lower,
            upper,
        })
    }

    pub fn time_of_flight(&self, altitude: f64) -> Result<f64> {
        Ok(self.simulator.integrate(altitude, 0.0)?.elapsed_time)
    }

    pub fn objective(&self, altitude: f64, target_time: f64) -> Result<f64> {
        Ok((self.time_of_flight(altitude)? - target_time).abs())
    }

    pub fn invert(&self, target_time: f64) -> Result<SearchResult> {
        if !target_time.is_finite() || target_time < 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "target time must be non-negative and finite, got {}",
                target_time
            )));
        }

        let result = self.search.try_minimize(
            |altitude| self.objective(altitude, target_time),
            self.lower,
            self.upper,
        )?;

        tracing::info!(
            target_time,
            altitude = result.argmin,
            iterations = result.iterations,
            model = self.simulator.model.name(),
            "inverted time of flight"
        );

        Ok(result)
    }

    pub fn solve(&self, target_time: f64) -> Result<f64> {
        Ok(self.invert(target_time)?.argmin)
    }
}

impl Default for TimeOfFlightInversion {
    fn default() -> Self {
        let simulator = Simulator {
            settings: IntegratorSettings {
                sample_interval: None,
                ..IntegratorSettings::default()
            },
            ..Simulator::gravity_only(Environment::earth())
        };

        TimeOfFlightInversion {
            simulator,
            search: GoldenSectionSearch::default(),
            lower: SEARCH_LOWER_ALTITUDE,
            upper: SEARCH_UPPER_ALTITUDE,
        }
    }
}

/// Free-fall release altitude above Earth for a `target_time` second fall,
/// searched over [0, 10,000 km].
pub fn time_to_altitude(target_time: f64) -> Result<f64> {
    TimeOfFlightInversion::default().solve(target_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fifteen_minute_fall() {
        let altitude = time_to_altitude(900.0).unwrap();

        assert_abs_diff_eq!(altitude, 2_340_862.34, epsilon = 50.0);
    }

    #[test]
    fn test_round_trip_with_integrator() {
        let inversion = TimeOfFlightInversion::default();
        let start = 2_150_000.0;

        let time = inversion.time_of_flight(start).unwrap();
        let recovered = inversion.solve(time).unwrap();

        assert_abs_diff_eq!(recovered, start, epsilon = 100.0);
        assert_abs_diff_eq!(
            inversion.time_of_flight(recovered).unwrap(),
            time,
            epsilon = 2.0 * inversion.simulator.settings.step
        );
    }

    #[test]
    fn test_short_fall_matches_uniform_gravity() {
        let mut inversion = TimeOfFlightInversion::default();
        inversion.simulator.settings.step = 0.001;
        inversion.upper = 1_000.0;
        let g = inversion.simulator.environment.planet.surface_gravity();

        let altitude = inversion.solve(10.0).unwrap();

        // h = g t² / 2 for a short drop
        assert_abs_diff_eq!(altitude, 0.5 * g * 100.0, epsilon = 0.5);
    }

    #[test]
    fn test_negative_target_time_is_rejected() {
        assert!(matches!(
            time_to_altitude(-1.0),
            Err(SimulationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_invalid_bracket_is_rejected() {
        let result = TimeOfFlightInversion::new(
            Simulator::default(),
            GoldenSectionSearch::default(),
            1_000.0,
            0.0,
        );

        assert!(matches!(result, Err(SimulationError::InvalidBracket { .. })));
    }
}
