//! Input checks shared by the property and flash calculations.
//!
//! Every check runs before any calculation starts.

use crate::error::{ThermoError, ThermoResult};
use vle_compounds::Compound;
use vle_core::is_non_negative_finite;

fn check_real(
    v: f64,
    missing: &'static str,
    not_finite: &'static str,
    err: fn(&'static str) -> ThermoError,
) -> ThermoResult<()> {
    if v.is_nan() {
        return Err(err(missing));
    }
    if !v.is_finite() {
        return Err(err(not_finite));
    }
    Ok(())
}

pub(crate) fn check_temperature(t: f64) -> ThermoResult<()> {
    let err = |what: &'static str| ThermoError::TemperatureInvalid { what };
    check_real(t, "temperature is missing", "temperature is not finite", err)?;
    if t <= 0.0 {
        return Err(err("temperature must be positive"));
    }
    Ok(())
}

pub(crate) fn check_pressure(p: f64) -> ThermoResult<()> {
    let err = |what: &'static str| ThermoError::PressureInvalid { what };
    check_real(p, "pressure is missing", "pressure is not finite", err)?;
    if p <= 0.0 {
        return Err(err("pressure must be positive"));
    }
    Ok(())
}

pub(crate) fn check_vapor_fraction(vf: f64) -> ThermoResult<()> {
    let err = |what: &'static str| ThermoError::VaporFractionOutOfRange { what };
    check_real(vf, "vapor fraction is missing", "vapor fraction is not finite", err)?;
    if vf < 0.0 {
        return Err(err("vapor fraction cannot be negative"));
    }
    if vf > 1.0 {
        return Err(err("vapor fraction cannot exceed unity"));
    }
    Ok(())
}

pub(crate) fn check_enthalpy(h: f64) -> ThermoResult<()> {
    check_real(h, "enthalpy (missing)", "enthalpy (not finite)", |what: &'static str| {
        ThermoError::EnthalpyOrEntropyInvalid { what }
    })
}

pub(crate) fn check_entropy(s: f64) -> ThermoResult<()> {
    check_real(s, "entropy (missing)", "entropy (not finite)", |what: &'static str| {
        ThermoError::EnthalpyOrEntropyInvalid { what }
    })
}

/// Indices in range and each compound used at most once.
pub(crate) fn check_indices(indices: &[usize], count: usize) -> ThermoResult<()> {
    if indices.is_empty() {
        return Err(ThermoError::EmptyMixture);
    }
    for (i, &index) in indices.iter().enumerate() {
        if index >= count {
            return Err(ThermoError::IndexOutOfRange { index, count });
        }
        if indices[..i].contains(&index) {
            return Err(ThermoError::DuplicateCompound { index });
        }
    }
    Ok(())
}

pub(crate) fn check_composition_length(expected: usize, actual: usize) -> ThermoResult<()> {
    if expected != actual {
        return Err(ThermoError::CompositionLength { expected, actual });
    }
    Ok(())
}

/// Messages for one composition vector, so two-phase checks can name the phase.
pub(crate) struct CompositionMessages {
    pub missing: &'static str,
    pub not_finite: &'static str,
    pub negative: &'static str,
}

pub(crate) const COMPOSITION: CompositionMessages = CompositionMessages {
    missing: "at least one mole fraction is missing",
    not_finite: "at least one mole fraction is not finite",
    negative: "at least one mole fraction is negative",
};

pub(crate) const FIRST_PHASE_COMPOSITION: CompositionMessages = CompositionMessages {
    missing: "at least one mole fraction of phase 1 is missing",
    not_finite: "at least one mole fraction of phase 1 is not finite",
    negative: "at least one mole fraction of phase 1 is negative",
};

pub(crate) const SECOND_PHASE_COMPOSITION: CompositionMessages = CompositionMessages {
    missing: "at least one mole fraction of phase 2 is missing",
    not_finite: "at least one mole fraction of phase 2 is not finite",
    negative: "at least one mole fraction of phase 2 is negative",
};

pub(crate) fn check_composition(x: &[f64], messages: &CompositionMessages) -> ThermoResult<()> {
    let err = |what: &'static str| Err(ThermoError::InvalidComposition { what });
    match x.iter().find(|&&v| !is_non_negative_finite(v)) {
        None => Ok(()),
        Some(v) if v.is_nan() => err(messages.missing),
        Some(v) if !v.is_finite() => err(messages.not_finite),
        Some(_) => err(messages.negative),
    }
}

/// `t` may not exceed the critical temperature of any compound.
pub(crate) fn check_below_critical<'a>(
    compounds: impl IntoIterator<Item = &'a Compound>,
    t: f64,
) -> ThermoResult<()> {
    for compound in compounds {
        if t > compound.critical_temperature() {
            return Err(ThermoError::TemperatureExceedsCritical {
                compound: compound.name().to_string(),
                t,
                tc: compound.critical_temperature(),
            });
        }
    }
    Ok(())
}
