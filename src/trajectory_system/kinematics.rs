use crate::constants::{
    MAX_INTEGRATION_STEPS, TARGET_ALTITUDE, TELEMETRY_SAMPLE_INTERVAL, TIME_STEP,
};
use crate::environment_system::Environment;
use crate::errors::{Result, SimulationError};
use crate::telemetry_system::telemetry::Telemetry;

use super::acceleration::{acceleration, AccelerationModel};

/// Radial state of the body. Velocity is negative while descending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub altitude: f64,
    pub velocity: f64,
    pub elapsed_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationPhase {
    Running,
    Converged,
    Exceeded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorSettings {
    pub step: f64,
    pub target_altitude: f64,
    pub max_iterations: usize,
    pub sample_interval: Option<usize>,
}

impl IntegratorSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "integration step must be positive and finite, got {}",
                self.step
            )));
        }
        if !self.target_altitude.is_finite() {
            return Err(SimulationError::InvalidParameter(format!(
                "target altitude must be finite, got {}",
                self.target_altitude
            )));
        }
        Ok(())
    }
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        IntegratorSettings {
            step: TIME_STEP,
            target_altitude: TARGET_ALTITUDE,
            max_iterations: MAX_INTEGRATION_STEPS,
            sample_interval: Some(TELEMETRY_SAMPLE_INTERVAL),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub elapsed_time: f64,
    pub terminal_velocity: f64,
    /// May sit up to one step below the target altitude.
    pub final_altitude: f64,
    pub steps: usize,
    pub telemetry: Telemetry,
}

#[derive(Debug)]
pub struct Kinematics {
    pub state: State,
    pub phase: IntegrationPhase,
    pub steps: usize,
}

impl Kinematics {
    pub fn new(altitude: f64, velocity: f64) -> Self {
        Kinematics {
            state: State {
                altitude,
                velocity,
                elapsed_time: 0.0,
            },
            phase: IntegrationPhase::Running,
            steps: 0,
        }
    }

    /// Advances one step and returns the acceleration that drove it.
    pub fn update(
        &mut self,
        environment: &Environment,
        model: &AccelerationModel,
        delta_time: f64,
    ) -> Result<f64> {
        let a = acceleration(environment, model, self.state.altitude, self.state.velocity)?;

        self.state.velocity += a * delta_time;
        self.state.altitude += self.state.velocity * delta_time + 0.5 * a * delta_time.powi(2);
        self.state.elapsed_time += delta_time;
        self.steps += 1;

        if !self.state.altitude.is_finite() || !self.state.velocity.is_finite() {
            return Err(SimulationError::NumericDomainError(format!(
                "state became non-finite after {} steps",
                self.steps
            )));
        }

        Ok(a)
    }
}

/// Steps the body from `altitude` until it first drops below
/// `settings.target_altitude`.
///
/// The target check happens before each step, so the final state overshoots
/// the target by up to one step. A start already below the target returns
/// immediately with zero elapsed time. Hitting `settings.max_iterations`
/// first yields [`SimulationError::DidNotConverge`] with the partial state;
/// an upward initial velocity that gravity cannot turn around ends that way.
pub fn integrate(
    environment: &Environment,
    model: &AccelerationModel,
    altitude: f64,
    velocity: f64,
    settings: &IntegratorSettings,
) -> Result<SimulationResult> {
    settings.validate()?;
    if !altitude.is_finite() || !velocity.is_finite() {
        return Err(SimulationError::InvalidParameter(format!(
            "initial state must be finite (altitude = {}, velocity = {})",
            altitude, velocity
        )));
    }

    let mut kinematics = Kinematics::new(altitude, velocity);
    let mut telemetry = Telemetry::new(settings.sample_interval);

    loop {
        match kinematics.phase {
            IntegrationPhase::Running => {
                if kinematics.state.altitude < settings.target_altitude {
                    kinematics.phase = IntegrationPhase::Converged;
                    continue;
                }
                if kinematics.steps >= settings.max_iterations {
                    kinematics.phase = IntegrationPhase::Exceeded;
                    continue;
                }

                let previous_altitude = kinematics.state.altitude;
                let a = kinematics.update(environment, model, settings.step)?;

                let state = kinematics.state;
                let dynamic_pressure = match model.body() {
                    Some(body) if environment.is_in_atmosphere(state.altitude) => {
                        body.dynamic_pressure(environment.air_density(state.altitude), state.velocity)
                    }
                    _ => 0.0,
                };
                telemetry.record(kinematics.steps, &state, a, dynamic_pressure);

                if !environment.is_in_atmosphere(previous_altitude)
                    && environment.is_in_atmosphere(state.altitude)
                {
                    telemetry.record_boundary_crossing(kinematics.steps, &state);
                }
            }

            IntegrationPhase::Converged => {
                let state = kinematics.state;
                tracing::debug!(
                    model = model.name(),
                    steps = kinematics.steps,
                    elapsed_time = state.elapsed_time,
                    terminal_velocity = state.velocity,
                    "integration converged"
                );
                return Ok(SimulationResult {
                    elapsed_time: state.elapsed_time,
                    terminal_velocity: state.velocity,
                    final_altitude: state.altitude,
                    steps: kinematics.steps,
                    telemetry,
                });
            }

            IntegrationPhase::Exceeded => {
                tracing::warn!(
                    model = model.name(),
                    steps = kinematics.steps,
                    altitude = kinematics.state.altitude,
                    velocity = kinematics.state.velocity,
                    "integration exceeded its step budget"
                );
                return Err(SimulationError::DidNotConverge {
                    iterations: kinematics.steps,
                    state: kinematics.state,
                });
            }
        }
    }
}

/// An environment, force model and step configuration bundled for repeated runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulator {
    pub environment: Environment,
    pub model: AccelerationModel,
    pub settings: IntegratorSettings,
}

impl Simulator {
    pub fn new(
        environment: Environment,
        model: AccelerationModel,
        settings: IntegratorSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Simulator {
            environment,
            model,
            settings,
        })
    }

    pub fn gravity_only(environment: Environment) -> Self {
        Simulator {
            environment,
            model: AccelerationModel::GravityOnly,
            settings: IntegratorSettings::default(),
        }
    }

    pub fn integrate(&self, altitude: f64, velocity: f64) -> Result<SimulationResult> {
        integrate(
            &self.environment,
            &self.model,
            altitude,
            velocity,
            &self.settings,
        )
    }

    pub fn integrate_to(
        &self,
        altitude: f64,
        velocity: f64,
        target_altitude: f64,
    ) -> Result<SimulationResult> {
        let settings = IntegratorSettings {
            target_altitude,
            ..self.settings
        };
        integrate(&self.environment, &self.model, altitude, velocity, &settings)
    }

    /// Descent until the body drops below the atmosphere boundary.
    pub fn time_to_boundary(&self, altitude: f64, velocity: f64) -> Result<SimulationResult> {
        self.integrate_to(
            altitude,
            velocity,
            self.environment.atmosphere.boundary_altitude,
        )
    }

    pub fn impact(&self, altitude: f64, velocity: f64) -> Result<SimulationResult> {
        self.integrate_to(altitude, velocity, 0.0)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Simulator::gravity_only(Environment::earth())
    }
}
