//! Bracketed false-position solver for monotonic functions.

use crate::error::SolverError;
use tracing::{trace, warn};

/// Bracketed solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct BracketSolverConfig {
    /// Converged when `|f(x)| < tolerance`
    pub tolerance: f64,
    /// Maximum interpolation steps after both bounds are evaluated
    pub max_iterations: usize,
    /// Lower clamp on the interpolated position within the bracket
    pub min_fraction: f64,
    /// Upper clamp on the interpolated position within the bracket
    pub max_fraction: f64,
}

impl Default for BracketSolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 10_000,
            min_fraction: 1e-3,
            max_fraction: 0.999,
        }
    }
}

/// Converged point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BracketSolution {
    /// Root estimate
    pub x: f64,
    /// Residual at `x` (for a machine-precision exit, the residual at the nearest bound)
    pub residual: f64,
    /// Number of interpolation steps
    pub iterations: usize,
    /// Number of target function evaluations
    pub evaluations: usize,
}

/// Root finder for a function that is monotonic on `[lo, hi]` and changes sign there.
#[derive(Clone, Copy, Debug, Default)]
pub struct BracketSolver {
    config: BracketSolverConfig,
}

impl BracketSolver {
    pub fn new(config: BracketSolverConfig) -> Self {
        Self { config }
    }

    /// Default configuration with a different convergence tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self::new(BracketSolverConfig {
            tolerance,
            ..BracketSolverConfig::default()
        })
    }

    pub fn config(&self) -> &BracketSolverConfig {
        &self.config
    }

    /// Find `x` in `[lo, hi]` with `|f(x)| < tolerance`.
    ///
    /// The bounds are tried first and returned as-is when they already
    /// satisfy the tolerance. Errors returned by `f` abort the search and are
    /// propagated unchanged.
    pub fn solve<F, E>(&self, lo: f64, hi: f64, mut f: F) -> Result<BracketSolution, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
        E: From<SolverError>,
    {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(SolverError::InvalidBracket { lo, hi }.into());
        }

        let tol = self.config.tolerance;
        let mut evaluations = 0;

        let mut f_lo = evaluate(&mut f, lo)?;
        evaluations += 1;
        if f_lo.abs() < tol {
            return Ok(BracketSolution {
                x: lo,
                residual: f_lo,
                iterations: 0,
                evaluations,
            });
        }

        let mut f_hi = evaluate(&mut f, hi)?;
        evaluations += 1;
        if f_hi.abs() < tol {
            return Ok(BracketSolution {
                x: hi,
                residual: f_hi,
                iterations: 0,
                evaluations,
            });
        }

        if f_lo * f_hi > 0.0 {
            return Err(SolverError::BracketInvalid { lo, hi, f_lo, f_hi }.into());
        }

        let increasing = f_hi > f_lo;
        let (mut lo, mut hi) = (lo, hi);

        for iteration in 1..=self.config.max_iterations {
            let frac = 1.0 - f_hi / (f_hi - f_lo);
            let frac = if frac.is_nan() {
                0.5
            } else {
                frac.clamp(self.config.min_fraction, self.config.max_fraction)
            };

            let mut x = lo + frac * (hi - lo);
            if x == lo || x == hi {
                x = 0.5 * (lo + hi);
                if x == lo || x == hi {
                    let residual = if f_lo.abs() < f_hi.abs() { f_lo } else { f_hi };
                    warn!(x, residual, "bracket collapsed to machine precision");
                    return Ok(BracketSolution {
                        x,
                        residual,
                        iterations: iteration,
                        evaluations,
                    });
                }
            }

            let fx = evaluate(&mut f, x)?;
            evaluations += 1;
            trace!(iteration, x, residual = fx, lo, hi, "bracket step");

            if fx.abs() < tol {
                return Ok(BracketSolution {
                    x,
                    residual: fx,
                    iterations: iteration,
                    evaluations,
                });
            }

            let go_up = if increasing { fx < 0.0 } else { fx > 0.0 };
            if go_up {
                lo = x;
                f_lo = fx;
            } else {
                hi = x;
                f_hi = fx;
            }
        }

        let (x, residual) = if f_lo.abs() < f_hi.abs() {
            (lo, f_lo)
        } else {
            (hi, f_hi)
        };
        Err(SolverError::NotConverged {
            iterations: self.config.max_iterations,
            x,
            residual,
        }
        .into())
    }
}

fn evaluate<F, E>(f: &mut F, x: f64) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    let value = f(x)?;
    if value.is_nan() {
        return Err(SolverError::NonFiniteResidual { x }.into());
    }
    Ok(value)
}
