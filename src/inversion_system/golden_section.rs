//! Derivative-free minimization of a unimodal scalar function.
//!
//! The bracket shrinks by a factor of 1/φ per iteration. Both interior points
//! are recomputed from the updated bracket every iteration, so each iteration
//! costs exactly two objective calls.
//!
//! Unimodality is assumed, not checked: an objective with several minima on
//! the bracket converges to one of them without any error.

use crate::constants::{GOLDEN_RATIO, MAX_SEARCH_ITERATIONS, SEARCH_TOLERANCE};
use crate::errors::{Result, SimulationError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub argmin: f64,
    pub lo: f64,
    pub hi: f64,
    pub iterations: usize,
    pub evaluations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoldenSectionSearch {
    /// Stop once the interior points are within this distance.
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl GoldenSectionSearch {
    pub fn new(tolerance: f64, max_iterations: usize) -> Result<Self> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "search tolerance must be positive and finite, got {}",
                tolerance
            )));
        }

        Ok(GoldenSectionSearch {
            tolerance,
            max_iterations,
        })
    }

    pub fn minimize<F>(&self, mut objective: F, lo: f64, hi: f64) -> Result<SearchResult>
    where
        F: FnMut(f64) -> f64,
    {
        self.try_minimize(|x| Ok(objective(x)), lo, hi)
    }

    pub fn try_minimize<F>(&self, mut objective: F, lo: f64, hi: f64) -> Result<SearchResult>
    where
        F: FnMut(f64) -> Result<f64>,
    {
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(SimulationError::InvalidBracket { lo, hi });
        }

        let mut evaluate = |x: f64| -> Result<f64> {
            let value = objective(x)?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(SimulationError::NumericDomainError(format!(
                    "objective returned {} at {}",
                    value, x
                )))
            }
        };

        let (mut lo, mut hi) = (lo, hi);
        let mut c = hi - (hi - lo) / GOLDEN_RATIO;
        let mut d = lo + (hi - lo) / GOLDEN_RATIO;
        let mut iterations = 0;

        while (c - d).abs() > self.tolerance {
            if iterations >= self.max_iterations {
                return Err(SimulationError::SearchExhausted { iterations, lo, hi });
            }

            if evaluate(c)? < evaluate(d)? {
                hi = d;
            } else {
                lo = c;
            }

            c = hi - (hi - lo) / GOLDEN_RATIO;
            d = lo + (hi - lo) / GOLDEN_RATIO;
            iterations += 1;
        }

        let argmin = (lo + hi) / 2.0;
        tracing::debug!(argmin, iterations, lo, hi, "golden-section search converged");

        Ok(SearchResult {
            argmin,
            lo,
            hi,
            iterations,
            evaluations: 2 * iterations,
        })
    }
}

impl Default for GoldenSectionSearch {
    fn default() -> Self {
        GoldenSectionSearch {
            tolerance: SEARCH_TOLERANCE,
            max_iterations: MAX_SEARCH_ITERATIONS,
        }
    }
}

/// Location of the minimum of `objective` on `[lo, hi]`.
pub fn minimize<F>(objective: F, lo: f64, hi: f64, tolerance: f64) -> Result<f64>
where
    F: FnMut(f64) -> f64,
{
    let search = GoldenSectionSearch::new(tolerance, MAX_SEARCH_ITERATIONS)?;
    Ok(search.minimize(objective, lo, hi)?.argmin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_parabola_minimum() {
        let argmin = minimize(|x| (x - 2.0).powi(2), 1.0, 5.0, 1e-5).unwrap();

        assert_abs_diff_eq!(argmin, 2.0, epsilon = 1e-4);
        assert_relative_eq!(argmin, 2.000_009_644_875_677_7, epsilon = 1e-12);
    }

    #[test]
    fn test_two_evaluations_per_iteration() {
        let search = GoldenSectionSearch::default();
        let mut calls = 0;

        let result = search
            .minimize(
                |x| {
                    calls += 1;
                    (x - 2.0).powi(2)
                },
                1.0,
                5.0,
            )
            .unwrap();

        assert_eq!(result.iterations, 24);
        assert_eq!(result.evaluations, 2 * result.iterations);
        assert_eq!(calls, result.evaluations);
    }

    #[test]
    fn test_bracket_narrows_around_minimum() {
        let search = GoldenSectionSearch::default();

        let result = search.minimize(|x| (x + 3.5).abs(), -10.0, 10.0).unwrap();

        assert!(result.lo <= result.hi);
        assert!(result.hi - result.lo < 1e-4);
        assert!(result.lo <= -3.5 + 1e-4 && result.hi >= -3.5 - 1e-4);
    }

    #[test]
    fn test_random_parabolas() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let center: f64 = rng.gen_range(-100.0..100.0);
            let scale: f64 = rng.gen_range(0.1..10.0);

            let argmin =
                minimize(|x| scale * (x - center).powi(2), -150.0, 150.0, 1e-6).unwrap();

            assert_abs_diff_eq!(argmin, center, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_minimum_at_bracket_edge() {
        let argmin = minimize(|x| x, 0.0, 1.0, 1e-8).unwrap();

        assert_abs_diff_eq!(argmin, 0.0, epsilon = 1e-7);
    }

    #[test]
    fn test_degenerate_brackets_are_rejected() {
        for (lo, hi) in [(1.0, 1.0), (5.0, 1.0), (f64::NAN, 1.0), (0.0, f64::INFINITY)] {
            let result = minimize(|x| x * x, lo, hi, 1e-5);
            assert!(
                matches!(result, Err(SimulationError::InvalidBracket { .. })),
                "Bracket [{}, {}] should be rejected",
                lo,
                hi
            );
        }
    }

    #[test]
    fn test_invalid_tolerance_is_rejected() {
        assert!(matches!(
            minimize(|x| x * x, -1.0, 1.0, 0.0),
            Err(SimulationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_iteration_cap_is_enforced() {
        let search = GoldenSectionSearch::new(1e-12, 40).unwrap();

        let result = search.minimize(|x| (x - 2.0e7).powi(2), 0.0, 1.0e8);

        assert!(matches!(
            result,
            Err(SimulationError::SearchExhausted { iterations: 40, .. })
        ));
    }

    #[test]
    fn test_non_finite_objective_is_a_domain_error() {
        let result = minimize(|_| f64::NAN, 0.0, 1.0, 1e-5);

        assert!(matches!(result, Err(SimulationError::NumericDomainError(_))));
    }

    #[test]
    fn test_objective_errors_propagate() {
        let search = GoldenSectionSearch::default();

        let result = search.try_minimize(
            |_| Err(SimulationError::InvalidParameter("boom".to_string())),
            0.0,
            1.0,
        );

        assert!(matches!(result, Err(SimulationError::InvalidParameter(_))));
    }
}
