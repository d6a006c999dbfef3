//! Phase equilibrium ("flash") calculations.
//!
//! Every flash reduces to repeated TP flashes: the vapor fraction and
//! energy specified flashes search for the free temperature or pressure
//! with [`BracketSolver`](vle_solver::BracketSolver), then evaluate the TP
//! flash once more at the solution.
//!
//! Compounds with a zero feed fraction take no part in the calculation and
//! are reported with zero mole fractions.

mod context;
mod energy;
mod result;
mod tp;
mod vapor_fraction;

pub use result::{FlashResult, PhaseResult};

use crate::error::ThermoResult;
use crate::package::PropertyPackage;
use crate::phase::{AllowedPhases, FlashType, Phase};
use context::{FlashContext, FlashState};
use tracing::debug;
use vle_core::{k, pa};

/// Convergence tolerance of the Rachford-Rice equation.
pub(crate) const RACHFORD_RICE_TOLERANCE: f64 = 1e-8;
/// Convergence tolerance of the outer searches over T or P.
pub(crate) const OUTER_TOLERANCE: f64 = 1e-4;
/// Lowest temperature any flash searches at [K].
pub(crate) const MIN_TEMPERATURE: f64 = 50.0;
/// Distance kept from the highest vapor pressure pole [K].
pub(crate) const POLE_MARGIN: f64 = 10.0;

/// The two fixed quantities of a flash, in SI units (K, Pa, J/mol, J/(mol·K)).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashSpec {
    Tp { t: f64, p: f64 },
    Tvf { t: f64, vf: f64 },
    Pvf { p: f64, vf: f64 },
    /// Vapor fraction on a mass basis
    TvfMass { t: f64, vf: f64 },
    /// Vapor fraction on a mass basis
    PvfMass { p: f64, vf: f64 },
    Ph { p: f64, h: f64 },
    Ps { p: f64, s: f64 },
}

impl FlashSpec {
    /// Build from a flash type and its two values, in the order of
    /// [`FlashType::first_label`] and [`FlashType::second_label`].
    pub fn new(flash_type: FlashType, spec1: f64, spec2: f64) -> Self {
        match flash_type {
            FlashType::TP => FlashSpec::Tp { t: spec1, p: spec2 },
            FlashType::TVF => FlashSpec::Tvf { t: spec1, vf: spec2 },
            FlashType::PVF => FlashSpec::Pvf { p: spec1, vf: spec2 },
            FlashType::TVFm => FlashSpec::TvfMass { t: spec1, vf: spec2 },
            FlashType::PVFm => FlashSpec::PvfMass { p: spec1, vf: spec2 },
            FlashType::PH => FlashSpec::Ph { p: spec1, h: spec2 },
            FlashType::PS => FlashSpec::Ps { p: spec1, s: spec2 },
        }
    }

    pub fn flash_type(&self) -> FlashType {
        match self {
            FlashSpec::Tp { .. } => FlashType::TP,
            FlashSpec::Tvf { .. } => FlashType::TVF,
            FlashSpec::Pvf { .. } => FlashType::PVF,
            FlashSpec::TvfMass { .. } => FlashType::TVFm,
            FlashSpec::PvfMass { .. } => FlashType::PVFm,
            FlashSpec::Ph { .. } => FlashType::PH,
            FlashSpec::Ps { .. } => FlashType::PS,
        }
    }

    pub fn values(&self) -> (f64, f64) {
        match *self {
            FlashSpec::Tp { t, p } => (t, p),
            FlashSpec::Tvf { t, vf } | FlashSpec::TvfMass { t, vf } => (t, vf),
            FlashSpec::Pvf { p, vf } | FlashSpec::PvfMass { p, vf } => (p, vf),
            FlashSpec::Ph { p, h } => (p, h),
            FlashSpec::Ps { p, s } => (p, s),
        }
    }
}

impl PropertyPackage {
    /// Equilibrium state of a feed at the given specification.
    ///
    /// `composition` lines up with `compound_indices` and does not need to
    /// be normalized; it is divided by its sum, and reported phase
    /// compositions always sum to one. Flashes at a specified vapor fraction
    /// report both phases, an incipient phase with fraction zero.
    ///
    /// PH and PS flashes of a single compound whose target lies between the
    /// saturated liquid and saturated vapor values have no temperature
    /// solution. The search then stops at the saturation temperature, and the
    /// result is the single phase found there, with an enthalpy or entropy
    /// that differs from the target.
    pub fn flash(
        &self,
        compound_indices: &[usize],
        composition: &[f64],
        spec: FlashSpec,
        allowed: AllowedPhases,
    ) -> ThermoResult<FlashResult> {
        self.loaded()?;
        let ctx = FlashContext::new(self, compound_indices, composition, allowed)?;
        let (spec1, spec2) = spec.values();
        debug!(
            flash = %spec.flash_type(),
            spec1,
            spec2,
            active = ctx.feed().len(),
            %allowed,
            "flash"
        );

        let state = match spec {
            FlashSpec::Tp { t, p } => ctx.tp_flash(t, p)?,
            FlashSpec::Tvf { t, vf } => ctx.tvf_flash(t, vf)?,
            FlashSpec::Pvf { p, vf } => ctx.pvf_flash(p, vf)?,
            FlashSpec::TvfMass { t, vf } => ctx.tvf_mass_flash(t, vf)?,
            FlashSpec::PvfMass { p, vf } => ctx.pvf_mass_flash(p, vf)?,
            FlashSpec::Ph { p, h } => ctx.ph_flash(p, h)?,
            FlashSpec::Ps { p, s } => ctx.ps_flash(p, s)?,
        };
        debug!(
            t = state.t,
            p = state.p,
            vapor_fraction = state.split.vapor_fraction,
            "flash converged"
        );
        Ok(assemble(&ctx, state, compound_indices.len()))
    }
}

/// Validate a feed the way [`PropertyPackage::flash`] does, without flashing it.
pub(crate) fn check_feed(
    package: &PropertyPackage,
    compound_indices: &[usize],
    composition: &[f64],
) -> ThermoResult<()> {
    package.loaded()?;
    FlashContext::new(package, compound_indices, composition, AllowedPhases::default())?;
    Ok(())
}

fn assemble(ctx: &FlashContext<'_>, state: FlashState, count: usize) -> FlashResult {
    let expand = |x: &[f64]| {
        let mut full = vec![0.0; count];
        for (&i, &v) in ctx.mapping().iter().zip(x) {
            full[i] = v;
        }
        full
    };
    let split = &state.split;
    let mut phases = Vec::with_capacity(2);
    if split.vapor_exists {
        phases.push(PhaseResult {
            phase: Phase::Vapor,
            fraction: split.vapor_fraction,
            composition: expand(&split.vapor_x),
        });
    }
    if split.liquid_exists {
        phases.push(PhaseResult {
            phase: Phase::Liquid,
            fraction: split.liquid_fraction(),
            composition: expand(&split.liquid_x),
        });
    }
    FlashResult {
        temperature: k(state.t),
        pressure: pa(state.p),
        phases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_from_type_and_values() {
        for flash_type in FlashType::ALL {
            let spec = FlashSpec::new(flash_type, 1.0, 2.0);
            assert_eq!(spec.flash_type(), flash_type);
            assert_eq!(spec.values(), (1.0, 2.0));
        }
        assert_eq!(
            FlashSpec::new(FlashType::PH, 1e5, -2e4),
            FlashSpec::Ph { p: 1e5, h: -2e4 }
        );
    }
}
