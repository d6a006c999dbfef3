//! Flashes at a specified vapor fraction, molar or mass based.

use super::OUTER_TOLERANCE;
use super::context::{FlashContext, FlashState, PhaseSplit};
use crate::error::{ThermoError, ThermoResult};
use crate::validation;
use vle_solver::BracketSolver;

/// Which saturation condition a temperature search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Saturation {
    Bubble,
    Dew,
}

impl FlashContext<'_> {
    /// Pressure at which the feed splits into the requested molar vapor fraction.
    pub(crate) fn tvf_flash(&self, t: f64, vf: f64) -> ThermoResult<FlashState> {
        self.check_temperature(t)?;
        validation::check_vapor_fraction(vf)?;
        self.require_two_phase()?;

        let psat = self.vapor_pressures(t);
        if self.is_single_compound() {
            return Ok(FlashState {
                t,
                p: psat[0],
                split: PhaseSplit::coexisting(vf, vec![1.0], vec![1.0]),
            });
        }
        if vf == 0.0 {
            let p = self.bubble_pressure(&psat);
            return Ok(self.bubble_state(t, p, &psat));
        }
        if vf == 1.0 {
            let p = self.dew_pressure(&psat);
            return Ok(self.dew_state(t, p, &psat));
        }

        let (pdew, pbub) = (self.dew_pressure(&psat), self.bubble_pressure(&psat));
        let solution = BracketSolver::with_tolerance(OUTER_TOLERANCE)
            .solve(pdew, pbub, |p| {
                Ok::<_, ThermoError>(self.tp_flash(t, p)?.split.vapor_fraction - vf)
            })
            .map_err(|e| ThermoError::in_flash("TVF", e))?;
        Ok(settle(self.tp_flash(t, solution.x)?, vf))
    }

    /// Temperature at which the feed splits into the requested molar vapor fraction.
    pub(crate) fn pvf_flash(&self, p: f64, vf: f64) -> ThermoResult<FlashState> {
        validation::check_pressure(p)?;
        validation::check_vapor_fraction(vf)?;
        self.require_two_phase()?;
        let stage = "PVF";

        if self.is_single_compound() {
            let psat = self.mixture().compounds()[0].vapor_pressure();
            let solution = BracketSolver::with_tolerance(OUTER_TOLERANCE)
                .solve(self.min_temperature(), self.max_temperature(), |t| {
                    Ok::<_, ThermoError>(psat.value(t) - p)
                })
                .map_err(|e| ThermoError::in_flash(stage, e))?;
            return Ok(FlashState {
                t: solution.x,
                p,
                split: PhaseSplit::coexisting(vf, vec![1.0], vec![1.0]),
            });
        }
        if vf == 0.0 {
            let t = self.saturation_temperature(p, Saturation::Bubble, stage)?;
            return Ok(self.bubble_state(t, p, &self.vapor_pressures(t)));
        }
        if vf == 1.0 {
            let t = self.saturation_temperature(p, Saturation::Dew, stage)?;
            return Ok(self.dew_state(t, p, &self.vapor_pressures(t)));
        }

        let (tbub, tdew) = self.saturation_window(p, stage)?;
        let solution = BracketSolver::with_tolerance(OUTER_TOLERANCE)
            .solve(tbub, tdew, |t| {
                Ok::<_, ThermoError>(self.tp_flash(t, p)?.split.vapor_fraction - vf)
            })
            .map_err(|e| ThermoError::in_flash(stage, e))?;
        Ok(settle(self.tp_flash(solution.x, p)?, vf))
    }

    /// Pressure at which the feed splits into the requested mass vapor fraction.
    ///
    /// Phase fractions in the result stay molar.
    pub(crate) fn tvf_mass_flash(&self, t: f64, vf: f64) -> ThermoResult<FlashState> {
        self.check_temperature(t)?;
        validation::check_vapor_fraction(vf)?;
        self.require_two_phase()?;
        if vf == 0.0 || vf == 1.0 || self.is_single_compound() {
            return self.tvf_flash(t, vf);
        }

        let psat = self.vapor_pressures(t);
        let (pdew, pbub) = (self.dew_pressure(&psat), self.bubble_pressure(&psat));
        let solution = BracketSolver::with_tolerance(OUTER_TOLERANCE)
            .solve(pdew, pbub, |p| {
                let state = self.tp_flash(t, p)?;
                Ok::<_, ThermoError>(self.mass_vapor_fraction(&state.split) - vf)
            })
            .map_err(|e| ThermoError::in_flash("TVFm", e))?;
        self.tp_flash(t, solution.x)
    }

    /// Temperature at which the feed splits into the requested mass vapor fraction.
    ///
    /// Phase fractions in the result stay molar.
    pub(crate) fn pvf_mass_flash(&self, p: f64, vf: f64) -> ThermoResult<FlashState> {
        validation::check_pressure(p)?;
        validation::check_vapor_fraction(vf)?;
        self.require_two_phase()?;
        if vf == 0.0 || vf == 1.0 || self.is_single_compound() {
            return self.pvf_flash(p, vf);
        }

        let stage = "PVFm";
        let (tbub, tdew) = self.saturation_window(p, stage)?;
        let solution = BracketSolver::with_tolerance(OUTER_TOLERANCE)
            .solve(tbub, tdew, |t| {
                let state = self.tp_flash(t, p)?;
                Ok::<_, ThermoError>(self.mass_vapor_fraction(&state.split) - vf)
            })
            .map_err(|e| ThermoError::in_flash(stage, e))?;
        self.tp_flash(solution.x, p)
    }

    /// Bubble and dew temperatures at `p`.
    fn saturation_window(&self, p: f64, stage: &'static str) -> ThermoResult<(f64, f64)> {
        Ok((
            self.saturation_temperature(p, Saturation::Bubble, stage)?,
            self.saturation_temperature(p, Saturation::Dew, stage)?,
        ))
    }

    fn saturation_temperature(
        &self,
        p: f64,
        kind: Saturation,
        stage: &'static str,
    ) -> ThermoResult<f64> {
        let solution = BracketSolver::with_tolerance(OUTER_TOLERANCE)
            .solve(self.min_temperature(), self.max_temperature(), |t| {
                let psat = self.vapor_pressures(t);
                let saturation = match kind {
                    Saturation::Bubble => self.bubble_pressure(&psat),
                    Saturation::Dew => self.dew_pressure(&psat),
                };
                Ok::<_, ThermoError>(saturation - p)
            })
            .map_err(|e| ThermoError::in_flash(stage, e))?;
        Ok(solution.x)
    }

    /// Liquid at the feed composition with an incipient vapor.
    fn bubble_state(&self, t: f64, p: f64, psat: &[f64]) -> FlashState {
        let feed = self.feed();
        let vapor_x = feed.iter().zip(psat).map(|(x, ps)| x * ps / p).collect();
        FlashState {
            t,
            p,
            split: PhaseSplit::coexisting(0.0, vapor_x, feed.to_vec()),
        }
    }

    /// Vapor at the feed composition with an incipient liquid.
    fn dew_state(&self, t: f64, p: f64, psat: &[f64]) -> FlashState {
        let feed = self.feed();
        let liquid_x = feed.iter().zip(psat).map(|(x, ps)| x * p / ps).collect();
        FlashState {
            t,
            p,
            split: PhaseSplit::coexisting(1.0, feed.to_vec(), liquid_x),
        }
    }
}

/// Report the specified fraction with both phases present.
fn settle(mut state: FlashState, vf: f64) -> FlashState {
    state.split.vapor_exists = true;
    state.split.liquid_exists = true;
    state.split.vapor_fraction = vf;
    state
}
