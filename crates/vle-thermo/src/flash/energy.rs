//! Pressure/enthalpy and pressure/entropy flashes.

use super::OUTER_TOLERANCE;
use super::context::{FlashContext, FlashState};
use crate::error::{ThermoError, ThermoResult};
use crate::validation;
use vle_solver::BracketSolver;

impl FlashContext<'_> {
    /// Temperature at which the TP flash at `p` has molar enthalpy `h`.
    ///
    /// The phase-weighted enthalpy jumps at the saturation temperature of a
    /// single compound. A target inside that jump ends at the saturation
    /// temperature without matching `h`.
    pub(crate) fn ph_flash(&self, p: f64, h: f64) -> ThermoResult<FlashState> {
        validation::check_pressure(p)?;
        validation::check_enthalpy(h)?;
        self.solve_temperature(p, "PH", |state| self.enthalpy(state) - h)
    }

    /// Temperature at which the TP flash at `p` has molar entropy `s`.
    /// Single compounds behave as in [`Self::ph_flash`].
    pub(crate) fn ps_flash(&self, p: f64, s: f64) -> ThermoResult<FlashState> {
        validation::check_pressure(p)?;
        validation::check_entropy(s)?;
        self.solve_temperature(p, "PS", |state| self.entropy(state) - s)
    }

    fn solve_temperature(
        &self,
        p: f64,
        stage: &'static str,
        residual: impl Fn(&FlashState) -> f64,
    ) -> ThermoResult<FlashState> {
        let solution = BracketSolver::with_tolerance(OUTER_TOLERANCE)
            .solve(self.min_temperature(), self.max_temperature(), |t| {
                Ok::<_, ThermoError>(residual(&self.tp_flash(t, p)?))
            })
            .map_err(|e| ThermoError::in_flash(stage, e))?;
        self.tp_flash(solution.x, p)
    }
}
