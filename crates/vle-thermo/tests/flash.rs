//! Flashes through the public API, checked against the property surface.

use vle_compounds::{BuiltinProvider, Compound, CompoundData, CompoundDataProvider};
use vle_thermo::{
    AllowedPhases, Derivative, FlashResult, FlashSpec, FlashType, MixtureProperty, Phase,
    PhaseConditions, PropertyPackage, SinglePhaseProperty, ThermoError,
};

fn benzene_toluene() -> PropertyPackage {
    let names = ["benzene".to_string(), "toluene".to_string()];
    PropertyPackage::with_compounds(BuiltinProvider.load_compounds(&names).unwrap()).unwrap()
}

fn value(pp: &PropertyPackage, property: MixtureProperty, conditions: PhaseConditions<'_>) -> f64 {
    let id = SinglePhaseProperty::new(property, Derivative::Value);
    pp.single_phase_properties(&[0, 1], conditions, &[id]).unwrap()[0]
        .as_scalar()
        .unwrap()
}

/// Phase-fraction weighted molar property of a flash result.
fn weighted(pp: &PropertyPackage, property: MixtureProperty, result: &FlashResult) -> f64 {
    let (t, p) = (result.temperature_k(), result.pressure_pa());
    result
        .phases
        .iter()
        .map(|phase| {
            let conditions = PhaseConditions::new(phase.phase, t, p, &phase.composition);
            phase.fraction * value(pp, property, conditions)
        })
        .sum()
}

fn enthalpy(pp: &PropertyPackage, result: &FlashResult) -> f64 {
    weighted(pp, MixtureProperty::Enthalpy, result)
}

fn entropy(pp: &PropertyPackage, result: &FlashResult) -> f64 {
    weighted(pp, MixtureProperty::Entropy, result)
}

/// One compound whose vapor pressure is 1e5 Pa at every temperature.
fn constant_vapor_pressure() -> PropertyPackage {
    let data = CompoundData {
        name: "flat".into(),
        formula: "X".into(),
        cas: "0-00-0".into(),
        molecular_weight: 50.0,
        normal_boiling_point: 300.0,
        critical_temperature: 600.0,
        critical_pressure: 5e6,
        critical_volume: 2e-4,
        ideal_gas_heat_capacity: [30.0, 0.0, 0.0, 0.0, 0.0],
        heat_of_vaporization: [30000.0, 0.0, 0.0, 0.0, 0.0],
        liquid_density: [10000.0, 0.0, 0.0, 0.0, 0.0],
        antoine: [5.0, 0.0, 1.0],
    };
    PropertyPackage::with_compounds(vec![Compound::try_from(data).unwrap()]).unwrap()
}

#[test]
fn tp_two_phase_is_mass_balanced() {
    let pp = benzene_toluene();
    let feed = [0.5, 0.5];
    let result = pp
        .flash(&[0, 1], &feed, FlashSpec::Tp { t: 370.0, p: 101_325.0 }, AllowedPhases::default())
        .unwrap();
    assert!(result.is_two_phase());
    let vapor = result.vapor().unwrap();
    let liquid = result.liquid().unwrap();
    assert!((vapor.fraction + liquid.fraction - 1.0).abs() < 1e-12);
    for i in 0..2 {
        let recombined = vapor.fraction * vapor.composition[i] + liquid.fraction * liquid.composition[i];
        assert!((recombined - feed[i]).abs() < 1e-9);
    }
    // benzene is the more volatile compound
    assert!(vapor.composition[0] > feed[0] && liquid.composition[0] < feed[0]);
}

#[test]
fn tp_results_have_equal_fugacities() {
    let pp = benzene_toluene();
    let result = pp
        .flash(&[0, 1], &[0.4, 0.6], FlashSpec::Tp { t: 372.0, p: 101_325.0 }, AllowedPhases::default())
        .unwrap();
    let (t, p) = (result.temperature_k(), result.pressure_pa());
    let fugacity = SinglePhaseProperty::new(MixtureProperty::Fugacity, Derivative::Value);
    let per_phase: Vec<Vec<f64>> = result
        .phases
        .iter()
        .map(|phase| {
            let conditions = PhaseConditions::new(phase.phase, t, p, &phase.composition);
            pp.single_phase_properties(&[0, 1], conditions, &[fugacity]).unwrap()[0]
                .to_vec()
        })
        .collect();
    assert_eq!(per_phase.len(), 2);
    for i in 0..2 {
        let (fv, fl) = (per_phase[0][i], per_phase[1][i]);
        assert!((fv - fl).abs() / fv < 1e-6, "compound {i}: {fv} vs {fl}");
    }
}

#[test]
fn every_flash_type_reproduces_its_specification() {
    let pp = benzene_toluene();
    let feed = [0.5, 0.5];
    let reference = pp
        .flash(&[0, 1], &feed, FlashSpec::Tp { t: 368.0, p: 101_325.0 }, AllowedPhases::default())
        .unwrap();
    let h = enthalpy(&pp, &reference);
    let s = entropy(&pp, &reference);

    for flash_type in FlashType::ALL {
        let spec = match flash_type {
            FlashType::TP => FlashSpec::Tp { t: 368.0, p: 101_325.0 },
            FlashType::TVF => FlashSpec::Tvf { t: 368.0, vf: 0.3 },
            FlashType::PVF => FlashSpec::Pvf { p: 101_325.0, vf: 0.3 },
            FlashType::TVFm => FlashSpec::TvfMass { t: 368.0, vf: 0.3 },
            FlashType::PVFm => FlashSpec::PvfMass { p: 101_325.0, vf: 0.3 },
            FlashType::PH => FlashSpec::Ph { p: 101_325.0, h },
            FlashType::PS => FlashSpec::Ps { p: 101_325.0, s },
        };
        let result = pp
            .flash(&[0, 1], &feed, spec, AllowedPhases::default())
            .unwrap_or_else(|e| panic!("{flash_type} failed: {e}"));
        match flash_type {
            FlashType::TVF | FlashType::PVF => {
                assert_eq!(result.vapor_fraction(), 0.3);
            }
            FlashType::TVFm | FlashType::PVFm => {
                let vapor = result.vapor().unwrap();
                let liquid = result.liquid().unwrap();
                let mw = |x: &[f64]| 78.114 * x[0] + 92.141 * x[1];
                let vm = vapor.fraction * mw(&vapor.composition);
                let lm = liquid.fraction * mw(&liquid.composition);
                assert!((vm / (vm + lm) - 0.3).abs() < 1e-3);
            }
            FlashType::PH => {
                assert!((result.temperature_k() - 368.0).abs() < 1e-3);
                assert!((enthalpy(&pp, &result) - h).abs() <= 1e-4 * h.abs());
            }
            FlashType::PS => {
                assert!((result.temperature_k() - 368.0).abs() < 1e-3);
                assert!((entropy(&pp, &result) - s).abs() <= 1e-4 * s.abs().max(1.0));
            }
            _ => {}
        }
    }
}

#[test]
fn incipient_phases_are_reported() {
    let pp = benzene_toluene();
    let bubble = pp
        .flash(&[0, 1], &[0.5, 0.5], FlashSpec::Pvf { p: 101_325.0, vf: 0.0 }, AllowedPhases::default())
        .unwrap();
    assert_eq!(bubble.phases.len(), 2);
    assert_eq!(bubble.vapor().unwrap().fraction, 0.0);
    assert_eq!(bubble.liquid().unwrap().composition, vec![0.5, 0.5]);
    assert!((bubble.vapor().unwrap().composition.iter().sum::<f64>() - 1.0).abs() < 1e-4);
}

#[test]
fn zero_feed_compounds_are_reported_as_zero() {
    let names = ["benzene", "toluene", "n-hexane"].map(String::from);
    let pp = PropertyPackage::with_compounds(BuiltinProvider.load_compounds(&names).unwrap()).unwrap();
    let result = pp
        .flash(
            &[2, 0, 1],
            &[0.0, 0.5, 0.5],
            FlashSpec::Tp { t: 370.0, p: 101_325.0 },
            AllowedPhases::default(),
        )
        .unwrap();
    for phase in &result.phases {
        assert_eq!(phase.composition.len(), 3);
        assert_eq!(phase.composition[0], 0.0);
    }
}

#[test]
fn unnormalized_feed_is_accepted() {
    let pp = benzene_toluene();
    let allowed = AllowedPhases::default();
    let spec = FlashSpec::Tp { t: 370.0, p: 101_325.0 };
    let scaled = pp.flash(&[0, 1], &[1.0, 1.0], spec, allowed).unwrap();
    let unit = pp.flash(&[0, 1], &[0.5, 0.5], spec, allowed).unwrap();
    assert!((scaled.vapor_fraction() - unit.vapor_fraction()).abs() < 1e-9);
    for (a, b) in scaled.phases.iter().zip(&unit.phases) {
        assert_eq!(a.phase, b.phase);
        assert!((a.composition.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        for (xa, xb) in a.composition.iter().zip(&b.composition) {
            assert!((xa - xb).abs() < 1e-9);
        }
    }

    // bubble pressure at 370 K is about 116 kPa for the equimolar feed
    let bubble = FlashSpec::Tvf { t: 370.0, vf: 0.0 };
    let scaled = pp.flash(&[0, 1], &[1.0, 1.0], bubble, allowed).unwrap();
    let unit = pp.flash(&[0, 1], &[0.5, 0.5], bubble, allowed).unwrap();
    assert!((scaled.pressure_pa() - unit.pressure_pa()).abs() < 1e-6);
    assert!((unit.pressure_pa() - 116_263.0).abs() < 100.0);
    assert_eq!(scaled.liquid().unwrap().composition, vec![0.5, 0.5]);
}

#[test]
fn single_compound_phase_follows_vapor_pressure() {
    let pp = constant_vapor_pressure();
    let allowed = AllowedPhases::default();
    let below = pp.flash(&[0], &[1.0], FlashSpec::Tp { t: 300.0, p: 9e4 }, allowed).unwrap();
    assert_eq!(below.phases.len(), 1);
    assert_eq!(below.phases[0].phase, Phase::Vapor);
    assert_eq!(below.vapor_fraction(), 1.0);

    let above = pp.flash(&[0], &[1.0], FlashSpec::Tp { t: 300.0, p: 1.1e5 }, allowed).unwrap();
    assert_eq!(above.phases.len(), 1);
    assert_eq!(above.phases[0].phase, Phase::Liquid);
    assert_eq!(above.vapor_fraction(), 0.0);
    assert_eq!(above.liquid().unwrap().composition, vec![1.0]);
}

#[test]
fn single_compound_enthalpy_in_latent_gap_stops_at_saturation() {
    let names = ["benzene".to_string()];
    let pp = PropertyPackage::with_compounds(BuiltinProvider.load_compounds(&names).unwrap()).unwrap();
    let p: f64 = 101_325.0;
    // Antoine inverted at 1 atm
    let t_sat = 1211.033 / (9.030553 - p.log10()) - 52.36;

    // zero enthalpy is above saturated liquid and below saturated vapor
    let result = pp
        .flash(&[0], &[1.0], FlashSpec::Ph { p, h: 0.0 }, AllowedPhases::default())
        .unwrap();
    assert!((result.temperature_k() - t_sat).abs() < 1e-6);
    assert_eq!(result.phases.len(), 1);
    assert!(enthalpy_of_single(&pp, &result).abs() > 1000.0);
}

fn enthalpy_of_single(pp: &PropertyPackage, result: &FlashResult) -> f64 {
    let phase = &result.phases[0];
    let id = SinglePhaseProperty::new(MixtureProperty::Enthalpy, Derivative::Value);
    let conditions = PhaseConditions::new(
        phase.phase,
        result.temperature_k(),
        result.pressure_pa(),
        &phase.composition,
    );
    pp.single_phase_properties(&[0], conditions, &[id]).unwrap()[0]
        .as_scalar()
        .unwrap()
}

#[test]
fn input_errors() {
    let pp = benzene_toluene();
    let tp = FlashSpec::Tp { t: 370.0, p: 101_325.0 };
    let allowed = AllowedPhases::default();
    assert!(matches!(
        pp.flash(&[0, 1], &[0.0, 0.0], tp, allowed),
        Err(ThermoError::AllZeroComposition)
    ));
    assert!(matches!(
        pp.flash(&[0, 5], &[0.5, 0.5], tp, allowed),
        Err(ThermoError::IndexOutOfRange { index: 5, .. })
    ));
    assert!(matches!(
        pp.flash(&[0, 1], &[0.5, -0.5], tp, allowed),
        Err(ThermoError::InvalidComposition { .. })
    ));
    assert!(matches!(
        pp.flash(&[0, 1], &[0.5, 0.5], FlashSpec::Tvf { t: 370.0, vf: 1.5 }, allowed),
        Err(ThermoError::VaporFractionOutOfRange { .. })
    ));
    assert!(matches!(
        PropertyPackage::new().flash(&[0], &[1.0], tp, allowed),
        Err(ThermoError::Uninitialized)
    ));
}
