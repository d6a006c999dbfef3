//! Property packages built from the repository's data files.

use std::path::{Path, PathBuf};
use vle_compounds::{DirectoryProvider, PackageDefinition, RealConstant, StringConstant};
use vle_thermo::{
    Derivative, MixtureProperty, Phase, PhaseConditions, PropertyPackage, SinglePhaseProperty,
    ThermoError, TwoPhaseProperty,
};

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn load(package_file: &str) -> PropertyPackage {
    let provider = DirectoryProvider::new(data_dir().join("compounds"));
    let definition = PackageDefinition::load(&data_dir().join("packages").join(package_file)).unwrap();
    PropertyPackage::from_definition(&definition, &provider).unwrap()
}

fn prop(property: MixtureProperty, derivative: Derivative) -> SinglePhaseProperty {
    SinglePhaseProperty::new(property, derivative)
}

#[test]
fn legacy_package_file_loads_in_order() {
    let pp = load("alkanes.propertypackage");
    assert_eq!(pp.compound_count().unwrap(), 3);
    assert_eq!(pp.string_constant(0, StringConstant::Name).unwrap(), "n-hexane");
    assert_eq!(pp.compound_index("Cyclohexane"), Some(2));
    assert_eq!(pp.real_constant(2, RealConstant::CriticalTemperature).unwrap(), 553.6);
}

#[test]
fn yaml_package_keeps_its_name() {
    let pp = load("benzene-toluene.yaml");
    assert_eq!(pp.name(), Some("Benzene / toluene"));
    assert_eq!(pp.definition().unwrap().compounds, vec!["benzene", "toluene"]);
}

#[test]
fn density_and_volume_are_reciprocal() {
    let pp = load("alkanes.propertypackage");
    let x = [0.2, 0.5, 0.3];
    let wanted = [
        prop(MixtureProperty::Density, Derivative::Value),
        prop(MixtureProperty::Volume, Derivative::Value),
    ];
    for phase in Phase::ALL {
        let values = pp
            .single_phase_properties(&[0, 1, 2], PhaseConditions::new(phase, 330.0, 2e5, &x), &wanted)
            .unwrap();
        let rho = values[0].as_scalar().unwrap();
        let v = values[1].as_scalar().unwrap();
        assert!((rho * v - 1.0).abs() < 1e-12, "{phase}");
    }
}

#[test]
fn ideal_liquid_activity_is_the_mole_fraction() {
    let pp = load("alkanes.propertypackage");
    let x = [0.2, 0.5, 0.3];
    let activity = prop(MixtureProperty::Activity, Derivative::Value);
    let values = pp
        .single_phase_properties(&[0, 1, 2], PhaseConditions::liquid(330.0, 2e5, &x), &[activity])
        .unwrap();
    assert_eq!(values[0].as_vector().unwrap(), &x);

    let err = pp
        .single_phase_properties(&[0, 1, 2], PhaseConditions::vapor(330.0, 2e5, &x), &[activity])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unsupported phase or phase combination: activity is not supported for the vapor phase"
    );
}

#[test]
fn matrix_properties_have_compound_by_compound_shape() {
    let pp = load("alkanes.propertypackage");
    let x = [0.2, 0.5, 0.3];
    let values = pp
        .single_phase_properties(
            &[0, 1, 2],
            PhaseConditions::liquid(330.0, 2e5, &x),
            &[prop(MixtureProperty::LogFugacityCoefficient, Derivative::MoleNumber)],
        )
        .unwrap();
    let m = values[0].as_matrix().unwrap();
    assert_eq!(m.shape(), (3, 3));
    assert_eq!(values[0].to_vec().len(), 9);
}

#[test]
fn k_values_are_vapor_pressure_over_pressure() {
    let pp = load("benzene-toluene.yaml");
    let (t, p) = (370.0, 101_325.0);
    let y = [0.6, 0.4];
    let x = [0.4, 0.6];
    let values = pp
        .two_phase_properties(
            &[0, 1],
            PhaseConditions::vapor(t, p, &y),
            PhaseConditions::liquid(t, p, &x),
            &[TwoPhaseProperty::Kvalue, TwoPhaseProperty::LogKvalue],
        )
        .unwrap();
    let k = values[0].as_vector().unwrap();
    let ln_k = values[1].as_vector().unwrap();
    for i in 0..2 {
        let psat = pp
            .temperature_dependent_property(
                i,
                vle_compounds::TemperatureDependentProperty::VaporPressure,
                t,
            )
            .unwrap();
        assert!((k[i] - psat / p).abs() / k[i] < 1e-12);
        assert!((ln_k[i] - k[i].ln()).abs() < 1e-12);
    }
}

#[test]
fn same_phase_pair_is_rejected() {
    let pp = load("benzene-toluene.yaml");
    let x = [0.5, 0.5];
    let result = pp.two_phase_properties(
        &[0, 1],
        PhaseConditions::liquid(350.0, 1e5, &x),
        PhaseConditions::liquid(350.0, 1e5, &x),
        &[TwoPhaseProperty::Kvalue],
    );
    assert!(matches!(result, Err(ThermoError::UnsupportedPhase { .. })));
}
