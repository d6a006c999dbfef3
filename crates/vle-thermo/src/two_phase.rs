//! K-values between two coexisting phases.
//!
//! `K_i = φ_i(phase 2)/φ_i(phase 1)`. With the vapor fugacity coefficient at
//! unity only the liquid side depends on anything, so K follows from the
//! liquid vapor pressure and the pressure of whichever phase is first.

use crate::error::{ThermoError, ThermoResult};
use crate::package::{PhaseConditions, PropertyPackage};
use crate::phase::Phase;
use crate::properties::{PropertyValue, TwoPhaseProperty};
use crate::validation::{self, FIRST_PHASE_COMPOSITION, SECOND_PHASE_COMPOSITION};
use nalgebra::DMatrix;

impl PropertyPackage {
    /// Two-phase properties of a mixture.
    ///
    /// Both phases are fully checked even though the compositions do not
    /// enter the ideal K-values. Composition derivatives are `n × 2n`:
    /// columns `0..n` for the first phase, `n..2n` for the second.
    pub fn two_phase_properties(
        &self,
        compound_indices: &[usize],
        first: PhaseConditions<'_>,
        second: PhaseConditions<'_>,
        properties: &[TwoPhaseProperty],
    ) -> ThermoResult<Vec<PropertyValue>> {
        self.loaded()?;
        if first.phase == second.phase {
            return Err(ThermoError::UnsupportedPhase {
                what: "phases 1 and 2 cannot be the same",
            });
        }
        if compound_indices.is_empty() {
            return Err(ThermoError::EmptyMixture);
        }
        validation::check_composition_length(compound_indices.len(), first.x.len())?;
        validation::check_composition_length(compound_indices.len(), second.x.len())?;
        let mixture = self.mixture(compound_indices)?;
        for state in [&first, &second] {
            validation::check_temperature(state.t)?;
            validation::check_below_critical(mixture.compounds().iter().copied(), state.t)?;
            validation::check_pressure(state.p)?;
        }
        validation::check_composition(first.x, &FIRST_PHASE_COMPOSITION)?;
        validation::check_composition(second.x, &SECOND_PHASE_COMPOSITION)?;

        let n = mixture.len();
        // liquid side of the pair
        let (t_liq, p_first, p_second) = match first.phase {
            Phase::Vapor => (second.t, first.p, second.p),
            Phase::Liquid => (first.t, first.p, second.p),
        };
        let psat = mixture.vapor_pressures(t_liq);
        let psat_dt: Vec<f64> = mixture
            .compounds()
            .iter()
            .map(|c| c.vapor_pressure().value_dt(t_liq))
            .collect();
        let vapor_first = first.phase == Phase::Vapor;

        let vector = |f: &dyn Fn(f64, f64) -> f64| {
            PropertyValue::Vector(psat.iter().zip(&psat_dt).map(|(&ps, &dps)| f(ps, dps)).collect())
        };

        Ok(properties
            .iter()
            .map(|prop| match (prop, vapor_first) {
                (TwoPhaseProperty::Kvalue, true) => vector(&|ps, _| ps / p_second),
                (TwoPhaseProperty::Kvalue, false) => vector(&|ps, _| p_first / ps),
                (TwoPhaseProperty::KvalueDT, true) => vector(&|_, dps| dps / p_second),
                (TwoPhaseProperty::KvalueDT, false) => {
                    vector(&|ps, dps| -p_first * dps / (ps * ps))
                }
                (TwoPhaseProperty::KvalueDP, true) => {
                    vector(&|ps, _| -ps / (p_second * p_second))
                }
                (TwoPhaseProperty::KvalueDP, false) => vector(&|ps, _| 1.0 / ps),
                (TwoPhaseProperty::LogKvalue, true) => vector(&|ps, _| (ps / p_second).ln()),
                (TwoPhaseProperty::LogKvalue, false) => vector(&|ps, _| (p_first / ps).ln()),
                (TwoPhaseProperty::LogKvalueDT, true) => vector(&|ps, dps| dps / ps),
                (TwoPhaseProperty::LogKvalueDT, false) => vector(&|ps, dps| -dps / ps),
                (TwoPhaseProperty::LogKvalueDP, true) => vector(&|_, _| -1.0 / p_second),
                (TwoPhaseProperty::LogKvalueDP, false) => vector(&|_, _| 1.0 / p_first),
                (
                    TwoPhaseProperty::KvalueDX
                    | TwoPhaseProperty::KvalueDn
                    | TwoPhaseProperty::LogKvalueDX
                    | TwoPhaseProperty::LogKvalueDn,
                    _,
                ) => PropertyValue::Matrix(DMatrix::zeros(n, 2 * n)),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vle_compounds::{BuiltinProvider, CompoundDataProvider};

    fn package() -> PropertyPackage {
        let compounds = BuiltinProvider
            .load_compounds(&["benzene".to_string(), "toluene".to_string()])
            .unwrap();
        PropertyPackage::with_compounds(compounds).unwrap()
    }

    #[test]
    fn kvalue_is_vapor_pressure_over_pressure() {
        let pp = package();
        let x = [0.5, 0.5];
        let y = [0.6, 0.4];
        let vals = pp
            .two_phase_properties(
                &[0, 1],
                PhaseConditions::vapor(370.0, 101_325.0, &y),
                PhaseConditions::liquid(370.0, 101_325.0, &x),
                &[TwoPhaseProperty::Kvalue, TwoPhaseProperty::LogKvalue],
            )
            .unwrap();
        let k = vals[0].as_vector().unwrap();
        let benzene_psat = pp.compound(0).unwrap().vapor_pressure().value(370.0);
        assert!((k[0] - benzene_psat / 101_325.0).abs() < 1e-12);
        assert!(k[0] > 1.0 && k[1] < 1.0);
        let ln_k = vals[1].as_vector().unwrap();
        assert!((ln_k[1] - k[1].ln()).abs() < 1e-12);
    }

    #[test]
    fn liquid_first_inverts_kvalue() {
        let pp = package();
        let x = [0.5, 0.5];
        let vapor_first = pp
            .two_phase_properties(
                &[0, 1],
                PhaseConditions::vapor(370.0, 1e5, &x),
                PhaseConditions::liquid(370.0, 1e5, &x),
                &[TwoPhaseProperty::Kvalue, TwoPhaseProperty::LogKvalueDT],
            )
            .unwrap();
        let liquid_first = pp
            .two_phase_properties(
                &[0, 1],
                PhaseConditions::liquid(370.0, 1e5, &x),
                PhaseConditions::vapor(370.0, 1e5, &x),
                &[TwoPhaseProperty::Kvalue, TwoPhaseProperty::LogKvalueDT],
            )
            .unwrap();
        for (a, b) in vapor_first[0].to_vec().iter().zip(liquid_first[0].to_vec()) {
            assert!((a * b - 1.0).abs() < 1e-12);
        }
        for (a, b) in vapor_first[1].to_vec().iter().zip(liquid_first[1].to_vec()) {
            assert!((a + b).abs() < 1e-15);
        }
    }

    #[test]
    fn composition_derivatives_cover_both_phases() {
        let pp = package();
        let x = [0.5, 0.5];
        let vals = pp
            .two_phase_properties(
                &[1, 0],
                PhaseConditions::vapor(350.0, 1e5, &x),
                PhaseConditions::liquid(350.0, 1e5, &x),
                &[TwoPhaseProperty::LogKvalueDn],
            )
            .unwrap();
        let m = vals[0].as_matrix().unwrap();
        assert_eq!(m.shape(), (2, 4));
        assert!(m.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn phases_must_differ_and_both_are_checked() {
        let pp = package();
        let x = [0.5, 0.5];
        let err = pp
            .two_phase_properties(
                &[0, 1],
                PhaseConditions::liquid(350.0, 1e5, &x),
                PhaseConditions::liquid(350.0, 1e5, &x),
                &[TwoPhaseProperty::Kvalue],
            )
            .unwrap_err();
        assert!(matches!(err, ThermoError::UnsupportedPhase { .. }));

        let bad = [0.5, -0.5];
        let err = pp
            .two_phase_properties(
                &[0, 1],
                PhaseConditions::vapor(350.0, 1e5, &x),
                PhaseConditions::liquid(350.0, 1e5, &bad),
                &[TwoPhaseProperty::Kvalue],
            )
            .unwrap_err();
        assert!(err.to_string().contains("phase 2"));

        let err = pp
            .two_phase_properties(
                &[0, 1],
                PhaseConditions::vapor(350.0, 1e5, &x),
                PhaseConditions::liquid(600.0, 1e5, &x),
                &[TwoPhaseProperty::Kvalue],
            )
            .unwrap_err();
        assert!(matches!(err, ThermoError::TemperatureExceedsCritical { .. }));
    }
}
