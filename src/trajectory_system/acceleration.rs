use crate::environment_system::Environment;
use crate::errors::{Result, SimulationError};

use super::aerodynamics::BallisticBody;

/// Force model applied at every integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccelerationModel {
    /// Inverse-square gravity only, at every altitude.
    GravityOnly,
    /// Gravity above the atmosphere boundary, drag magnitude alone below it.
    /// The drag term is always positive and gravity is not summed in.
    BoundarySwitched(BallisticBody),
    /// Gravity everywhere plus drag opposing the direction of travel inside
    /// the atmosphere.
    GravityWithDrag(BallisticBody),
}

impl AccelerationModel {
    pub fn body(&self) -> Option<&BallisticBody> {
        match self {
            AccelerationModel::GravityOnly => None,
            AccelerationModel::BoundarySwitched(body)
            | AccelerationModel::GravityWithDrag(body) => Some(body),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AccelerationModel::GravityOnly => "gravity-only",
            AccelerationModel::BoundarySwitched(_) => "boundary-switched",
            AccelerationModel::GravityWithDrag(_) => "gravity-with-drag",
        }
    }
}

/// Net radial acceleration (m/s², positive up) at the given state.
pub fn acceleration(
    environment: &Environment,
    model: &AccelerationModel,
    altitude: f64,
    velocity: f64,
) -> Result<f64> {
    let acceleration = match model {
        AccelerationModel::GravityOnly => environment.gravity_acceleration(altitude)?,
        AccelerationModel::BoundarySwitched(body) => {
            if environment.is_in_atmosphere(altitude) {
                body.drag_acceleration(environment.air_density(altitude), velocity)
            } else {
                environment.gravity_acceleration(altitude)?
            }
        }
        AccelerationModel::GravityWithDrag(body) => {
            let gravity = environment.gravity_acceleration(altitude)?;
            if environment.is_in_atmosphere(altitude) {
                let drag = body.drag_acceleration(environment.air_density(altitude), velocity);
                gravity - velocity.signum() * drag
            } else {
                gravity
            }
        }
    };

    if !acceleration.is_finite() {
        return Err(SimulationError::NumericDomainError(format!(
            "non-finite acceleration at altitude {} m, velocity {} m/s",
            altitude, velocity
        )));
    }

    Ok(acceleration)
}
