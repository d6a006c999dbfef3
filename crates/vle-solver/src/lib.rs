//! One-dimensional root finding for the flash engine.
//!
//! Every iterative flash reduces to finding the root of a monotonic scalar
//! function on a known bracket: vapor fraction in the Rachford-Rice equation,
//! pressure for a vapor fraction target, temperature for a pressure, enthalpy
//! or entropy target. [`BracketSolver`] keeps the bracket throughout and
//! interpolates linearly between its ends.

pub mod bracket;
pub mod error;

pub use bracket::{BracketSolution, BracketSolver, BracketSolverConfig};
pub use error::{SolverError, SolverResult};
