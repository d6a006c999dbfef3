//! Per-call flash state: the active compounds and the phase split helpers.

use super::{MIN_TEMPERATURE, POLE_MARGIN};
use crate::error::{ThermoError, ThermoResult};
use crate::mixture::Mixture;
use crate::package::PropertyPackage;
use crate::phase::{AllowedPhases, Phase};
use crate::validation::{self, COMPOSITION};

/// Outcome of an equilibrium calculation in terms of the active compounds.
///
/// Both compositions are always filled; for a phase that does not exist
/// the composition is the feed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PhaseSplit {
    pub vapor_exists: bool,
    pub liquid_exists: bool,
    pub vapor_fraction: f64,
    pub vapor_x: Vec<f64>,
    pub liquid_x: Vec<f64>,
}

impl PhaseSplit {
    pub(crate) fn single(phase: Phase, feed: &[f64]) -> Self {
        let vapor = phase == Phase::Vapor;
        Self {
            vapor_exists: vapor,
            liquid_exists: !vapor,
            vapor_fraction: if vapor { 1.0 } else { 0.0 },
            vapor_x: feed.to_vec(),
            liquid_x: feed.to_vec(),
        }
    }

    /// Both phases flagged as existing, including an incipient phase at fraction 0 or 1.
    pub(crate) fn coexisting(vapor_fraction: f64, vapor_x: Vec<f64>, liquid_x: Vec<f64>) -> Self {
        Self {
            vapor_exists: true,
            liquid_exists: true,
            vapor_fraction,
            vapor_x,
            liquid_x,
        }
    }

    pub(crate) fn liquid_fraction(&self) -> f64 {
        1.0 - self.vapor_fraction
    }
}

/// Temperature, pressure and phase split found by a flash.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FlashState {
    pub t: f64,
    pub p: f64,
    pub split: PhaseSplit,
}

/// Compounds with a non-zero feed fraction and how they map back to the caller's order.
///
/// The feed of the active compounds is normalized to sum to one.
pub(crate) struct FlashContext<'a> {
    mixture: Mixture<'a>,
    feed: Vec<f64>,
    mapping: Vec<usize>,
    allowed: AllowedPhases,
}

impl<'a> FlashContext<'a> {
    pub(crate) fn new(
        package: &'a PropertyPackage,
        compound_indices: &[usize],
        composition: &[f64],
        allowed: AllowedPhases,
    ) -> ThermoResult<Self> {
        let all = package.mixture(compound_indices)?;
        validation::check_composition_length(compound_indices.len(), composition.len())?;
        validation::check_composition(composition, &COMPOSITION)?;

        let mapping: Vec<usize> = composition
            .iter()
            .enumerate()
            .filter(|&(_, &x)| x > 0.0)
            .map(|(i, _)| i)
            .collect();
        if mapping.is_empty() {
            return Err(ThermoError::AllZeroComposition);
        }
        let total: f64 = mapping.iter().map(|&i| composition[i]).sum();
        if !total.is_finite() {
            return Err(ThermoError::InvalidComposition {
                what: "the sum of the mole fractions is not finite",
            });
        }
        Ok(Self {
            mixture: all.select(&mapping),
            feed: mapping.iter().map(|&i| composition[i] / total).collect(),
            mapping,
            allowed,
        })
    }

    pub(crate) fn mixture(&self) -> &Mixture<'a> {
        &self.mixture
    }

    pub(crate) fn feed(&self) -> &[f64] {
        &self.feed
    }

    pub(crate) fn mapping(&self) -> &[usize] {
        &self.mapping
    }

    pub(crate) fn allowed(&self) -> AllowedPhases {
        self.allowed
    }

    pub(crate) fn is_single_compound(&self) -> bool {
        self.feed.len() == 1
    }

    /// Valid temperature, not above any active critical temperature.
    pub(crate) fn check_temperature(&self, t: f64) -> ThermoResult<()> {
        validation::check_temperature(t)?;
        validation::check_below_critical(self.mixture.compounds().iter().copied(), t)
    }

    /// Vapor fraction flashes need both phases.
    pub(crate) fn require_two_phase(&self) -> ThermoResult<()> {
        if self.allowed.single_phase().is_some() {
            return Err(ThermoError::UnsupportedPhase {
                what: "single phase flashes with vapor fraction specification are not supported",
            });
        }
        Ok(())
    }

    pub(crate) fn vapor_pressures(&self, t: f64) -> Vec<f64> {
        self.mixture.vapor_pressures(t)
    }

    /// `Σ X_i·Psat_i`
    pub(crate) fn bubble_pressure(&self, psat: &[f64]) -> f64 {
        self.feed.iter().zip(psat).map(|(x, ps)| x * ps).sum()
    }

    /// `1 / Σ (X_i/Psat_i)`
    pub(crate) fn dew_pressure(&self, psat: &[f64]) -> f64 {
        1.0 / self
            .feed
            .iter()
            .zip(psat)
            .map(|(x, ps)| x / ps)
            .sum::<f64>()
    }

    /// Lower end of every temperature search: 50 K, or 10 K above the
    /// highest vapor pressure pole when that is warmer.
    pub(crate) fn min_temperature(&self) -> f64 {
        MIN_TEMPERATURE.max(self.mixture.max_vapor_pressure_pole() + POLE_MARGIN)
    }

    /// Upper end of every temperature search: the lowest critical temperature.
    pub(crate) fn max_temperature(&self) -> f64 {
        self.mixture.min_critical_temperature()
    }

    /// Vapor fraction on a mass basis.
    pub(crate) fn mass_vapor_fraction(&self, split: &PhaseSplit) -> f64 {
        let vf = split.vapor_fraction;
        if vf == 0.0 || vf == 1.0 {
            return vf;
        }
        let vapor_mass = vf * self.mixture.molecular_weight(&split.vapor_x);
        let liquid_mass = split.liquid_fraction() * self.mixture.molecular_weight(&split.liquid_x);
        vapor_mass / (vapor_mass + liquid_mass)
    }

    /// Phase-fraction weighted enthalpy of a split.
    pub(crate) fn enthalpy(&self, state: &FlashState) -> f64 {
        self.weighted(state, |phase, x| self.mixture.enthalpy(phase, state.t, x))
    }

    /// Phase-fraction weighted entropy of a split.
    pub(crate) fn entropy(&self, state: &FlashState) -> f64 {
        self.weighted(state, |phase, x| {
            self.mixture.entropy(phase, state.t, state.p, x)
        })
    }

    fn weighted(&self, state: &FlashState, f: impl Fn(Phase, &[f64]) -> f64) -> f64 {
        let split = &state.split;
        let mut total = 0.0;
        if split.vapor_exists {
            total += split.vapor_fraction * f(Phase::Vapor, &split.vapor_x);
        }
        if split.liquid_exists {
            total += split.liquid_fraction() * f(Phase::Liquid, &split.liquid_x);
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vle_compounds::{BuiltinProvider, CompoundDataProvider};

    fn package() -> PropertyPackage {
        let compounds = BuiltinProvider
            .load_compounds(&["benzene".to_string(), "toluene".to_string(), "water".to_string()])
            .unwrap();
        PropertyPackage::with_compounds(compounds).unwrap()
    }

    #[test]
    fn zero_fractions_are_dropped() {
        let pp = package();
        let ctx = FlashContext::new(&pp, &[2, 0, 1], &[0.0, 0.4, 0.6], AllowedPhases::default())
            .unwrap();
        assert_eq!(ctx.mapping(), &[1, 2]);
        assert_eq!(ctx.feed(), &[0.4, 0.6]);
        assert_eq!(ctx.mixture().compounds()[0].name(), "benzene");
        assert!(!ctx.is_single_compound());
    }

    #[test]
    fn feed_is_normalized() {
        let pp = package();
        let ctx = FlashContext::new(&pp, &[0, 1, 2], &[2.0, 6.0, 0.0], AllowedPhases::default())
            .unwrap();
        assert_eq!(ctx.feed(), &[0.25, 0.75]);
        let psat = ctx.vapor_pressures(370.0);
        let unit = FlashContext::new(&pp, &[0, 1], &[0.25, 0.75], AllowedPhases::default()).unwrap();
        assert_eq!(ctx.bubble_pressure(&psat), unit.bubble_pressure(&psat));
    }

    #[test]
    fn rejects_bad_feeds() {
        let pp = package();
        let allowed = AllowedPhases::default();
        assert!(matches!(
            FlashContext::new(&pp, &[0, 1], &[0.0, 0.0], allowed),
            Err(ThermoError::AllZeroComposition)
        ));
        assert!(matches!(
            FlashContext::new(&pp, &[0, 0], &[0.5, 0.5], allowed),
            Err(ThermoError::DuplicateCompound { index: 0 })
        ));
        assert!(matches!(
            FlashContext::new(&pp, &[0, 1], &[0.5], allowed),
            Err(ThermoError::CompositionLength { .. })
        ));
        assert!(matches!(
            FlashContext::new(&pp, &[0, 1], &[0.5, -0.5], allowed),
            Err(ThermoError::InvalidComposition { .. })
        ));
        assert!(matches!(
            FlashContext::new(&pp, &[0, 1], &[f64::MAX, f64::MAX], allowed),
            Err(ThermoError::InvalidComposition { what: "the sum of the mole fractions is not finite" })
        ));
    }

    #[test]
    fn bubble_exceeds_dew() {
        let pp = package();
        let ctx =
            FlashContext::new(&pp, &[0, 1], &[0.5, 0.5], AllowedPhases::default()).unwrap();
        let psat = ctx.vapor_pressures(370.0);
        let (pbub, pdew) = (ctx.bubble_pressure(&psat), ctx.dew_pressure(&psat));
        assert!(pbub > pdew);
        assert!(pbub > 101_325.0 && pdew < 101_325.0);
    }

    #[test]
    fn temperature_window() {
        let pp = package();
        let ctx =
            FlashContext::new(&pp, &[0, 1], &[0.5, 0.5], AllowedPhases::default()).unwrap();
        // toluene's vapor pressure pole sits at 53.668 K
        assert!((ctx.min_temperature() - 63.668).abs() < 1e-9);
        assert_eq!(ctx.max_temperature(), 562.05);
    }

    #[test]
    fn mass_fraction_weights_by_molecular_weight() {
        let pp = package();
        let ctx =
            FlashContext::new(&pp, &[0, 1], &[0.5, 0.5], AllowedPhases::default()).unwrap();
        let split = PhaseSplit::coexisting(0.5, vec![1.0, 0.0], vec![0.0, 1.0]);
        let mass = ctx.mass_vapor_fraction(&split);
        assert!((mass - 78.114 / (78.114 + 92.141)).abs() < 1e-12);
        let all_vapor = PhaseSplit::single(Phase::Vapor, ctx.feed());
        assert_eq!(ctx.mass_vapor_fraction(&all_vapor), 1.0);
    }
}
