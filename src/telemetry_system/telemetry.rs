use crate::trajectory_system::kinematics::State;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    pub step: usize,
    pub time: f64,
    pub altitude: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

/// Moment the body first descends through the atmosphere boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryCrossing {
    pub step: usize,
    pub time: f64,
    pub velocity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Telemetry {
    pub samples: Vec<TelemetrySample>,
    sample_interval: Option<usize>,
    max_speed: f64,
    peak_deceleration: f64,
    peak_dynamic_pressure: f64,
    boundary_crossing: Option<BoundaryCrossing>,
}

impl Telemetry {
    pub fn new(sample_interval: Option<usize>) -> Self {
        Telemetry {
            samples: Vec::new(),
            sample_interval: sample_interval.filter(|&interval| interval > 0),
            max_speed: 0.0,
            peak_deceleration: 0.0,
            peak_dynamic_pressure: 0.0,
            boundary_crossing: None,
        }
    }

    pub fn record(&mut self, step: usize, state: &State, acceleration: f64, dynamic_pressure: f64) {
        let speed = state.velocity.abs();
        if speed > self.max_speed {
            self.max_speed = speed;
        }

        // positive when the acceleration works against the direction of travel
        let deceleration = -acceleration * state.velocity.signum();
        if deceleration > self.peak_deceleration {
            self.peak_deceleration = deceleration;
        }
        if dynamic_pressure > self.peak_dynamic_pressure {
            self.peak_dynamic_pressure = dynamic_pressure;
        }

        if let Some(interval) = self.sample_interval {
            if step % interval == 0 {
                let sample = TelemetrySample {
                    step,
                    time: state.elapsed_time,
                    altitude: state.altitude,
                    velocity: state.velocity,
                    acceleration,
                };
                tracing::trace!(
                    step,
                    time = sample.time,
                    altitude = sample.altitude,
                    velocity = sample.velocity,
                    acceleration = sample.acceleration,
                    "telemetry sample"
                );
                self.samples.push(sample);
            }
        }
    }

    pub fn record_boundary_crossing(&mut self, step: usize, state: &State) {
        if self.boundary_crossing.is_none() {
            self.boundary_crossing = Some(BoundaryCrossing {
                step,
                time: state.elapsed_time,
                velocity: state.velocity,
            });
        }
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn peak_deceleration(&self) -> f64 {
        self.peak_deceleration
    }

    pub fn peak_dynamic_pressure(&self) -> f64 {
        self.peak_dynamic_pressure
    }

    pub fn boundary_crossing(&self) -> Option<BoundaryCrossing> {
        self.boundary_crossing
    }

    pub fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    pub fn format_altitude(altitude: f64) -> String {
        if altitude.abs() >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![
            "--- Descent Summary ---".to_string(),
            format!("Max Speed: {:.2} m/s", self.max_speed),
            format!("Peak Deceleration: {:.2} m/s²", self.peak_deceleration),
            format!("Peak Dynamic Pressure: {:.2} Pa", self.peak_dynamic_pressure),
        ];

        match self.boundary_crossing {
            Some(crossing) => lines.push(format!(
                "Atmosphere reached at: {} ({:.2} m/s)",
                Self::format_time(crossing.time),
                crossing.velocity
            )),
            None => lines.push("Atmosphere boundary not crossed".to_string()),
        }

        if !self.samples.is_empty() {
            lines.push("--- Samples ---".to_string());
            for sample in &self.samples {
                lines.push(format!(
                    "t = {} | Alt: {} | Vel: {:.2} m/s | Acc: {:.4} m/s²",
                    Self::format_time(sample.time),
                    Self::format_altitude(sample.altitude),
                    sample.velocity,
                    sample.acceleration
                ));
            }
        }

        lines.join("\n")
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Telemetry::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn state(altitude: f64, velocity: f64, elapsed_time: f64) -> State {
        State {
            altitude,
            velocity,
            elapsed_time,
        }
    }

    #[test]
    fn test_samples_follow_interval() {
        let mut telemetry = Telemetry::new(Some(3));

        for step in 1..=10 {
            telemetry.record(step, &state(1_000.0, -(step as f64), step as f64), -9.8, 0.0);
        }

        let steps: Vec<usize> = telemetry.samples.iter().map(|sample| sample.step).collect();
        assert_eq!(steps, vec![3, 6, 9]);
    }

    #[test]
    fn test_disabled_sampling_keeps_peaks() {
        let mut telemetry = Telemetry::new(Some(0));

        telemetry.record(1, &state(1_000.0, -50.0, 0.1), -9.8, 10.0);
        telemetry.record(2, &state(900.0, -40.0, 0.2), 30.0, 25.0);

        assert!(telemetry.samples.is_empty());
        assert_relative_eq!(telemetry.max_speed(), 50.0);
        assert_relative_eq!(telemetry.peak_deceleration(), 30.0);
        assert_relative_eq!(telemetry.peak_dynamic_pressure(), 25.0);
    }

    #[test]
    fn test_first_boundary_crossing_is_kept() {
        let mut telemetry = Telemetry::default();

        telemetry.record_boundary_crossing(10, &state(99_990.0, -1_200.0, 0.1));
        telemetry.record_boundary_crossing(20, &state(99_000.0, -1_300.0, 0.2));

        let crossing = telemetry.boundary_crossing().unwrap();
        assert_eq!(crossing.step, 10);
        assert_relative_eq!(crossing.velocity, -1_200.0);
    }

    #[test]
    fn test_time_formatting() {
        assert_eq!(Telemetry::format_time(42.5), "42.50s");
        assert_eq!(Telemetry::format_time(900.0), "15m 0.00s");
        assert_eq!(Telemetry::format_time(3_725.0), "1h 2m 5.00s");
    }

    #[test]
    fn test_altitude_formatting() {
        assert_eq!(Telemetry::format_altitude(2_155_000.0), "2155.00 km");
        assert_eq!(Telemetry::format_altitude(-5.5), "-5.50 m");
    }

    #[test]
    fn test_summary_mentions_crossing() {
        let mut telemetry = Telemetry::default();
        telemetry.record_boundary_crossing(1, &state(99_999.0, -5_000.0, 829.62));

        let summary = telemetry.summary();

        assert!(summary.contains("Atmosphere reached at: 13m 49.62s"));
    }
}
