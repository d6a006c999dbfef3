//! Error types for root finding.

use thiserror::Error;

/// Errors raised by the bracketed solver itself.
///
/// Failures of the target function are not wrapped; they pass through the
/// solver unchanged in the caller's error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Allowed region does not contain solution (f({lo}) = {f_lo}, f({hi}) = {f_hi})")]
    BracketInvalid {
        lo: f64,
        hi: f64,
        f_lo: f64,
        f_hi: f64,
    },

    #[error("Solver did not converge in {iterations} iterations (x = {x}, residual = {residual})")]
    NotConverged {
        iterations: usize,
        x: f64,
        residual: f64,
    },

    #[error("Target function returned a non-finite value at x = {x}")]
    NonFiniteResidual { x: f64 },

    #[error("Invalid search interval [{lo}, {hi}]")]
    InvalidBracket { lo: f64, hi: f64 },
}

pub type SolverResult<T> = Result<T, SolverError>;
