//! TP flash sweeps over temperature or pressure.
//!
//! Points are independent, so they are flashed in parallel. A failed point
//! is recorded as `None` and does not stop the sweep.

use crate::flash::{self, FlashResult, FlashSpec};
use crate::package::PropertyPackage;
use crate::phase::AllowedPhases;
use crate::sweeps::SweepDefinition;
use crate::units::Quantity;
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, warn};

/// Error in sweep execution.
#[derive(Debug, Clone)]
pub enum SweepError {
    /// The sweep cannot run at all
    InvalidConfiguration(String),
    /// Every point failed; carries the first failure
    AllPointsFailed { points: usize, first_error: String },
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::AllPointsFailed {
                points,
                first_error,
            } => write!(f, "All {} sweep points failed (first: {})", points, first_error),
        }
    }
}

impl std::error::Error for SweepError {}

/// Flash results across a sweep.
#[derive(Debug, Clone)]
pub struct SweepResult {
    /// Swept quantity
    pub quantity: Quantity,
    /// Value of the variable held fixed (SI)
    pub fixed_value: f64,
    /// Swept values (SI)
    pub independent_values: Vec<f64>,
    /// Flash result per point, `None` where the flash failed
    pub states: Vec<Option<FlashResult>>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepResult {
    /// Swept values of the points that converged.
    pub fn successful_independent_values(&self) -> Vec<f64> {
        self.independent_values
            .iter()
            .zip(&self.states)
            .filter_map(|(val, state)| state.as_ref().map(|_| *val))
            .collect()
    }

    /// Molar vapor fraction per converged point.
    pub fn vapor_fractions(&self) -> Vec<f64> {
        self.states
            .iter()
            .filter_map(|s| s.as_ref().map(FlashResult::vapor_fraction))
            .collect()
    }

    /// Number of phases per converged point.
    pub fn phase_counts(&self) -> Vec<usize> {
        self.states
            .iter()
            .filter_map(|s| s.as_ref().map(|state| state.phases.len()))
            .collect()
    }
}

/// TP flash at every point of `sweep`, the other variable held at `fixed_value`.
///
/// A temperature sweep holds pressure fixed and vice versa. Input errors
/// shared by all points (unloaded package, bad indices or composition) fail
/// the whole sweep.
pub fn execute_tp_sweep(
    package: &PropertyPackage,
    compound_indices: &[usize],
    composition: &[f64],
    sweep: &SweepDefinition,
    fixed_value: f64,
    allowed: AllowedPhases,
) -> Result<SweepResult, SweepError> {
    sweep
        .validate()
        .map_err(|e| SweepError::InvalidConfiguration(e.to_string()))?;
    let spec_at: fn(f64, f64) -> FlashSpec = match sweep.quantity {
        Quantity::Temperature => |x: f64, fixed: f64| FlashSpec::Tp { t: x, p: fixed },
        Quantity::Pressure => |x: f64, fixed: f64| FlashSpec::Tp { t: fixed, p: x },
        other => {
            return Err(SweepError::InvalidConfiguration(format!(
                "TP sweeps vary Temperature or Pressure, not {}",
                other
            )));
        }
    };
    flash::check_feed(package, compound_indices, composition)
        .map_err(|e| SweepError::InvalidConfiguration(e.to_string()))?;

    let values = sweep.generate_points();
    debug!(%sweep, fixed_value, "executing TP sweep");
    let outcomes: Vec<_> = values
        .par_iter()
        .map(|&x| {
            package.flash(
                compound_indices,
                composition,
                spec_at(x, fixed_value),
                allowed,
            )
        })
        .collect();

    let num_failed = outcomes.iter().filter(|o| o.is_err()).count();
    let num_successful = outcomes.len() - num_failed;
    if num_successful == 0 {
        let first_error = outcomes
            .iter()
            .find_map(|o| o.as_ref().err())
            .map(ToString::to_string)
            .unwrap_or_default();
        return Err(SweepError::AllPointsFailed {
            points: outcomes.len(),
            first_error,
        });
    }
    if num_failed > 0 {
        warn!(num_failed, num_successful, "sweep points failed");
    }

    Ok(SweepResult {
        quantity: sweep.quantity,
        fixed_value,
        independent_values: values,
        states: outcomes.into_iter().map(Result::ok).collect(),
        num_successful,
        num_failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweeps::SweepSpacing;
    use vle_compounds::{BuiltinProvider, CompoundDataProvider};

    fn package() -> PropertyPackage {
        let compounds = BuiltinProvider
            .load_compounds(&["benzene".to_string(), "toluene".to_string()])
            .unwrap();
        PropertyPackage::with_compounds(compounds).unwrap()
    }

    #[test]
    fn temperature_sweep_crosses_the_envelope() {
        let pp = package();
        let sweep = SweepDefinition::from_text(
            "350 K",
            "400 K",
            Quantity::Temperature,
            11,
            SweepSpacing::Linear,
        )
        .unwrap();
        let result =
            execute_tp_sweep(&pp, &[0, 1], &[0.5, 0.5], &sweep, 101_325.0, AllowedPhases::default())
                .unwrap();
        assert_eq!(result.num_successful, 11);
        assert_eq!(result.num_failed, 0);
        let vf = result.vapor_fractions();
        assert_eq!(vf[0], 0.0);
        assert_eq!(vf[10], 1.0);
        assert!(vf.windows(2).all(|w| w[0] <= w[1] + 1e-9));
        assert!(result.phase_counts().contains(&2));
        let first = result.states[0].as_ref().unwrap();
        assert_eq!(first.temperature_k(), 350.0);
        assert_eq!(first.pressure_pa(), 101_325.0);
    }

    #[test]
    fn pressure_sweep_keeps_temperature() {
        let pp = package();
        let sweep = SweepDefinition::from_text(
            "0.5 atm",
            "2 atm",
            Quantity::Pressure,
            4,
            SweepSpacing::Logarithmic,
        )
        .unwrap();
        let result =
            execute_tp_sweep(&pp, &[0, 1], &[0.5, 0.5], &sweep, 370.0, AllowedPhases::default())
                .unwrap();
        assert_eq!(result.num_successful, 4);
        for state in result.states.iter().flatten() {
            assert_eq!(state.temperature_k(), 370.0);
        }
    }

    #[test]
    fn points_above_critical_are_recorded_as_failures() {
        let pp = package();
        let sweep = SweepDefinition::from_text(
            "500 K",
            "600 K",
            Quantity::Temperature,
            3,
            SweepSpacing::Linear,
        )
        .unwrap();
        let result =
            execute_tp_sweep(&pp, &[0, 1], &[0.5, 0.5], &sweep, 1e6, AllowedPhases::default())
                .unwrap();
        // 600 K is above benzene's critical temperature
        assert_eq!(result.num_failed, 1);
        assert!(result.states[2].is_none());
        assert_eq!(result.successful_independent_values(), vec![500.0, 550.0]);
    }

    #[test]
    fn rejects_unsweepable_quantity_and_bad_mixture() {
        let pp = package();
        let fraction = SweepDefinition::from_text(
            "0.1",
            "0.9",
            Quantity::VaporFraction,
            3,
            SweepSpacing::Linear,
        )
        .unwrap();
        assert!(matches!(
            execute_tp_sweep(&pp, &[0, 1], &[0.5, 0.5], &fraction, 1e5, AllowedPhases::default()),
            Err(SweepError::InvalidConfiguration(_))
        ));

        let t = SweepDefinition::from_text("350K", "360K", Quantity::Temperature, 3, SweepSpacing::Linear)
            .unwrap();
        assert!(matches!(
            execute_tp_sweep(&pp, &[0, 0], &[0.5, 0.5], &t, 1e5, AllowedPhases::default()),
            Err(SweepError::InvalidConfiguration(_))
        ));
    }
}
