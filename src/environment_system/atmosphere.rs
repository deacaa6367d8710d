use serde::{Deserialize, Serialize};

use crate::constants::{ATMOSPHERE_BOUNDARY, STANDARD_DENSITY_TABLE};
use crate::errors::{Result, SimulationError};

/// How densities are resolved between table breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Density of the closest breakpoint; ties go to the lower breakpoint.
    #[default]
    Nearest,
    /// Linear blend between the bracketing breakpoints, clamped at the ends.
    #[serde(alias = "linear")]
    LinearInterpolate,
}

impl std::str::FromStr for Interpolation {
    type Err = SimulationError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "linear" | "linear_interpolate" => Ok(Self::LinearInterpolate),
            other => Err(SimulationError::InvalidParameter(format!(
                "unknown density interpolation '{}'",
                other
            ))),
        }
    }
}

/// Air density breakpoints ordered by strictly increasing altitude.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityTable {
    breakpoints: Vec<(f64, f64)>,
}

impl DensityTable {
    pub fn new(breakpoints: Vec<(f64, f64)>) -> Result<Self> {
        if breakpoints.is_empty() {
            return Err(SimulationError::InvalidParameter(
                "density table must contain at least one breakpoint".to_string(),
            ));
        }

        for &(altitude, density) in &breakpoints {
            if !altitude.is_finite() || !density.is_finite() || density < 0.0 {
                return Err(SimulationError::InvalidParameter(format!(
                    "invalid density breakpoint ({} m, {} kg/m³)",
                    altitude, density
                )));
            }
        }

        if breakpoints.windows(2).any(|pair| pair[0].0 >= pair[1].0) {
            return Err(SimulationError::InvalidParameter(
                "density breakpoints must be strictly increasing in altitude".to_string(),
            ));
        }

        Ok(DensityTable { breakpoints })
    }

    pub fn standard() -> Self {
        DensityTable {
            breakpoints: STANDARD_DENSITY_TABLE.to_vec(),
        }
    }

    pub fn breakpoints(&self) -> &[(f64, f64)] {
        &self.breakpoints
    }

    pub fn nearest(&self, altitude: f64) -> f64 {
        let mut best = self.breakpoints[0];
        for &breakpoint in &self.breakpoints[1..] {
            // strict comparison keeps the first minimal breakpoint on ties
            if (breakpoint.0 - altitude).abs() < (best.0 - altitude).abs() {
                best = breakpoint;
            }
        }
        best.1
    }

    pub fn interpolate(&self, altitude: f64) -> f64 {
        let first = self.breakpoints[0];
        let last = self.breakpoints[self.breakpoints.len() - 1];

        if altitude <= first.0 {
            return first.1;
        }
        if altitude >= last.0 {
            return last.1;
        }

        let upper = self
            .breakpoints
            .partition_point(|&(breakpoint, _)| breakpoint <= altitude);
        let (h0, rho0) = self.breakpoints[upper - 1];
        let (h1, rho1) = self.breakpoints[upper];
        rho0 + (rho1 - rho0) * (altitude - h0) / (h1 - h0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Atmosphere {
    pub boundary_altitude: f64,
    pub table: DensityTable,
    pub interpolation: Interpolation,
}

impl Atmosphere {
    pub fn new(
        boundary_altitude: f64,
        table: DensityTable,
        interpolation: Interpolation,
    ) -> Result<Self> {
        if !boundary_altitude.is_finite() {
            return Err(SimulationError::InvalidParameter(format!(
                "atmosphere boundary must be finite, got {}",
                boundary_altitude
            )));
        }

        Ok(Atmosphere {
            boundary_altitude,
            table,
            interpolation,
        })
    }

    pub fn standard() -> Self {
        Atmosphere {
            boundary_altitude: ATMOSPHERE_BOUNDARY,
            table: DensityTable::standard(),
            interpolation: Interpolation::Nearest,
        }
    }

    pub fn density(&self, altitude: f64) -> f64 {
        match self.interpolation {
            Interpolation::Nearest => self.table.nearest(altitude),
            Interpolation::LinearInterpolate => self.table.interpolate(altitude),
        }
    }

    /// The boundary altitude itself counts as inside the atmosphere.
    pub fn is_in_atmosphere(&self, altitude: f64) -> bool {
        altitude <= self.boundary_altitude
    }
}
