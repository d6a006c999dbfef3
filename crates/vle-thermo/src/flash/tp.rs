//! Temperature/pressure flash.

use super::RACHFORD_RICE_TOLERANCE;
use super::context::{FlashContext, FlashState, PhaseSplit};
use crate::error::{ThermoError, ThermoResult};
use crate::phase::Phase;
use crate::validation;
use vle_solver::BracketSolver;

/// `Σ X_i (K_i − 1) / (1 + VF (K_i − 1))`, decreasing in `vf`.
pub(crate) fn rachford_rice(feed: &[f64], k_minus_1: &[f64], vf: f64) -> f64 {
    feed.iter()
        .zip(k_minus_1)
        .map(|(x, km1)| x * km1 / (1.0 + vf * km1))
        .sum()
}

impl FlashContext<'_> {
    /// Phase split at fixed `t` and `p`.
    ///
    /// Outside `[Pdew, Pbub]` the feed is a single phase; inside, the
    /// Rachford-Rice equation with constant `K_i = Psat_i/P` is solved for
    /// the vapor fraction.
    pub(crate) fn tp_flash(&self, t: f64, p: f64) -> ThermoResult<FlashState> {
        self.check_temperature(t)?;
        validation::check_pressure(p)?;
        let single = |phase| {
            Ok(FlashState {
                t,
                p,
                split: PhaseSplit::single(phase, self.feed()),
            })
        };

        if let Some(phase) = self.allowed().single_phase() {
            return single(phase);
        }

        let psat = self.vapor_pressures(t);
        if self.is_single_compound() {
            return single(if p > psat[0] { Phase::Liquid } else { Phase::Vapor });
        }
        if p > self.bubble_pressure(&psat) {
            return single(Phase::Liquid);
        }
        if p < self.dew_pressure(&psat) {
            return single(Phase::Vapor);
        }

        let k_minus_1: Vec<f64> = psat.iter().map(|ps| ps / p - 1.0).collect();
        let feed = self.feed();
        let solution = BracketSolver::with_tolerance(RACHFORD_RICE_TOLERANCE)
            .solve(0.0, 1.0, |vf| {
                Ok::<_, ThermoError>(rachford_rice(feed, &k_minus_1, vf))
            })
            .map_err(|e| ThermoError::in_flash("TP", e))?;

        let vf = solution.x;
        let liquid_x: Vec<f64> = feed
            .iter()
            .zip(&k_minus_1)
            .map(|(x, km1)| x / (1.0 + vf * km1))
            .collect();
        let vapor_x = liquid_x
            .iter()
            .zip(&k_minus_1)
            .map(|(x, km1)| (1.0 + km1) * x)
            .collect();
        Ok(FlashState {
            t,
            p,
            split: PhaseSplit::coexisting(vf, vapor_x, liquid_x),
        })
    }
}
