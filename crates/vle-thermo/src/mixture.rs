//! Ideal mixture model: ideal gas vapor, ideal solution liquid.
//!
//! The liquid is incompressible with volume `Σ X_i/ρ_i(T)` and fugacity
//! `X_i·Psat_i(T)`. Enthalpy is zero for the ideal gas at the reference
//! temperature; the liquid sits `Hvap` below it. Entropy is referenced to
//! the ideal gas at the reference temperature and pressure.
//!
//! Matrix entry `(k, j)` is the derivative of the value of compound `k`
//! with respect to the mole fraction (or mole number) of compound `j`.
//! Mole number derivatives are taken at one mole in total.

use crate::package::PhaseConditions;
use crate::phase::Phase;
use crate::properties::{Derivative, MixtureProperty, PropertyValue, SinglePhaseProperty};
use nalgebra::DMatrix;
use vle_compounds::Compound;
use vle_core::{GAS_CONSTANT as R, REFERENCE_PRESSURE};

/// Stand-in for the `−R ln X` term at `X = 0`.
const LOG_TERM_FLOOR: f64 = -1e200;

/// An ordered selection of compounds from a package.
#[derive(Debug, Clone)]
pub(crate) struct Mixture<'a> {
    compounds: Vec<&'a Compound>,
}

impl<'a> Mixture<'a> {
    pub(crate) fn new(compounds: Vec<&'a Compound>) -> Self {
        Self { compounds }
    }

    pub(crate) fn len(&self) -> usize {
        self.compounds.len()
    }

    pub(crate) fn compounds(&self) -> &[&'a Compound] {
        &self.compounds
    }

    /// Compounds at the given positions of this mixture.
    pub(crate) fn select(&self, positions: &[usize]) -> Mixture<'a> {
        Mixture::new(positions.iter().map(|&i| self.compounds[i]).collect())
    }

    pub(crate) fn vapor_pressures(&self, t: f64) -> Vec<f64> {
        self.per_compound(|c| c.vapor_pressure().value(t))
    }

    pub(crate) fn min_critical_temperature(&self) -> f64 {
        self.compounds
            .iter()
            .map(|c| c.critical_temperature())
            .fold(f64::INFINITY, f64::min)
    }

    /// Highest temperature at which one of the vapor pressure correlations is singular.
    pub(crate) fn max_vapor_pressure_pole(&self) -> f64 {
        self.compounds
            .iter()
            .map(|c| c.vapor_pressure().pole_temperature())
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Mean molecular weight of a phase of composition `x`.
    pub(crate) fn molecular_weight(&self, x: &[f64]) -> f64 {
        self.zip(x).map(|(c, xi)| xi * c.molecular_weight()).sum()
    }

    pub(crate) fn enthalpy(&self, phase: Phase, t: f64, x: &[f64]) -> f64 {
        self.zip(x)
            .filter(|&(_, xi)| xi > 0.0)
            .map(|(c, xi)| {
                let mut h = c.ideal_gas_heat_capacity().int_value(t);
                if phase == Phase::Liquid {
                    h -= c.heat_of_vaporization().value(t);
                }
                xi * h
            })
            .sum()
    }

    pub(crate) fn entropy(&self, phase: Phase, t: f64, p: f64, x: &[f64]) -> f64 {
        let mut s: f64 = self
            .zip(x)
            .filter(|&(_, xi)| xi > 0.0)
            .map(|(c, xi)| {
                let mut s = c.ideal_gas_heat_capacity().int_value_over_t(t) - R * xi.ln();
                if phase == Phase::Liquid {
                    s -= liquid_entropy_offset(c, t);
                }
                xi * s
            })
            .sum();
        if phase == Phase::Vapor {
            s -= R * (p / REFERENCE_PRESSURE).ln();
        }
        s
    }

    /// One property at the given conditions, which have already been checked.
    pub(crate) fn property(
        &self,
        id: SinglePhaseProperty,
        c: &PhaseConditions<'_>,
    ) -> PropertyValue {
        match id.property {
            MixtureProperty::Density => self.density(id.derivative, c),
            MixtureProperty::Volume => self.volume(id.derivative, c),
            MixtureProperty::Enthalpy => self.enthalpy_property(id.derivative, c),
            MixtureProperty::Entropy => self.entropy_property(id.derivative, c),
            MixtureProperty::Fugacity => self.fugacity(id.derivative, c),
            MixtureProperty::FugacityCoefficient => self.fugacity_coefficient(id.derivative, c),
            MixtureProperty::LogFugacityCoefficient => {
                self.log_fugacity_coefficient(id.derivative, c)
            }
            MixtureProperty::Activity => self.activity(id.derivative, c),
        }
    }

    fn per_compound(&self, f: impl Fn(&Compound) -> f64) -> Vec<f64> {
        self.compounds.iter().map(|&c| f(c)).collect()
    }

    fn zip<'s>(&'s self, x: &'s [f64]) -> impl Iterator<Item = (&'a Compound, f64)> + 's {
        self.compounds.iter().copied().zip(x.iter().copied())
    }

    fn zeros(&self) -> PropertyValue {
        PropertyValue::Vector(vec![0.0; self.len()])
    }

    fn zero_matrix(&self) -> PropertyValue {
        PropertyValue::Matrix(DMatrix::zeros(self.len(), self.len()))
    }

    fn diagonal(&self, diag: &[f64]) -> PropertyValue {
        let n = self.len();
        PropertyValue::Matrix(DMatrix::from_fn(n, n, |k, j| if k == j { diag[k] } else { 0.0 }))
    }

    /// `scale_k · ∂X_k/∂n_j` at one mole in total.
    fn mole_number_matrix(&self, x: &[f64], scale: &[f64]) -> PropertyValue {
        let n = self.len();
        PropertyValue::Matrix(DMatrix::from_fn(n, n, |k, j| {
            let dx = if k == j { 1.0 - x[k] } else { -x[k] };
            scale[k] * dx
        }))
    }

    fn pure_liquid_volumes(&self, t: f64) -> Vec<f64> {
        self.per_compound(|c| 1.0 / c.liquid_density().value(t))
    }

    fn liquid_volume(&self, t: f64, x: &[f64]) -> f64 {
        self.zip(x)
            .map(|(c, xi)| xi / c.liquid_density().value(t))
            .sum()
    }

    fn liquid_volume_dt(&self, t: f64, x: &[f64]) -> f64 {
        self.zip(x)
            .map(|(c, xi)| {
                let rho = c.liquid_density();
                let v = 1.0 / rho.value(t);
                -xi * rho.value_dt(t) * v * v
            })
            .sum()
    }

    fn density(&self, d: Derivative, c: &PhaseConditions<'_>) -> PropertyValue {
        let rt = R * c.t;
        match c.phase {
            Phase::Vapor => match d {
                Derivative::Value => PropertyValue::Scalar(c.p / rt),
                Derivative::Temperature => PropertyValue::Scalar(-c.p / (rt * c.t)),
                Derivative::Pressure => PropertyValue::Scalar(1.0 / rt),
                Derivative::MoleFraction | Derivative::MoleNumber => self.zeros(),
            },
            Phase::Liquid => {
                let v = self.liquid_volume(c.t, c.x);
                match d {
                    Derivative::Value => PropertyValue::Scalar(1.0 / v),
                    Derivative::Temperature => {
                        PropertyValue::Scalar(-self.liquid_volume_dt(c.t, c.x) / (v * v))
                    }
                    Derivative::Pressure => PropertyValue::Scalar(0.0),
                    Derivative::MoleFraction => PropertyValue::Vector(
                        self.pure_liquid_volumes(c.t)
                            .into_iter()
                            .map(|vj| -vj / (v * v))
                            .collect(),
                    ),
                    Derivative::MoleNumber => PropertyValue::Vector(
                        self.pure_liquid_volumes(c.t)
                            .into_iter()
                            .map(|vj| -(vj - v) / (v * v))
                            .collect(),
                    ),
                }
            }
        }
    }

    fn volume(&self, d: Derivative, c: &PhaseConditions<'_>) -> PropertyValue {
        match c.phase {
            Phase::Vapor => match d {
                Derivative::Value => PropertyValue::Scalar(R * c.t / c.p),
                Derivative::Temperature => PropertyValue::Scalar(R / c.p),
                Derivative::Pressure => PropertyValue::Scalar(-R * c.t / (c.p * c.p)),
                Derivative::MoleFraction => self.zeros(),
                // partial molar volume
                Derivative::MoleNumber => PropertyValue::Vector(vec![R * c.t / c.p; self.len()]),
            },
            Phase::Liquid => match d {
                Derivative::Value => PropertyValue::Scalar(self.liquid_volume(c.t, c.x)),
                Derivative::Temperature => {
                    PropertyValue::Scalar(self.liquid_volume_dt(c.t, c.x))
                }
                Derivative::Pressure => PropertyValue::Scalar(0.0),
                Derivative::MoleFraction | Derivative::MoleNumber => {
                    PropertyValue::Vector(self.pure_liquid_volumes(c.t))
                }
            },
        }
    }

    fn enthalpy_property(&self, d: Derivative, c: &PhaseConditions<'_>) -> PropertyValue {
        let liquid = c.phase == Phase::Liquid;
        match d {
            Derivative::Value => PropertyValue::Scalar(self.enthalpy(c.phase, c.t, c.x)),
            Derivative::Temperature => PropertyValue::Scalar(
                self.zip(c.x)
                    .filter(|&(_, xi)| xi > 0.0)
                    .map(|(comp, xi)| {
                        let mut cp = comp.ideal_gas_heat_capacity().value(c.t);
                        if liquid {
                            cp -= comp.heat_of_vaporization().value_dt(c.t);
                        }
                        xi * cp
                    })
                    .sum(),
            ),
            Derivative::Pressure => PropertyValue::Scalar(0.0),
            // linear in X, so both derivatives coincide
            Derivative::MoleFraction | Derivative::MoleNumber => {
                PropertyValue::Vector(self.per_compound(|comp| {
                    let mut h = comp.ideal_gas_heat_capacity().int_value(c.t);
                    if liquid {
                        h -= comp.heat_of_vaporization().value(c.t);
                    }
                    h
                }))
            }
        }
    }

    fn entropy_property(&self, d: Derivative, c: &PhaseConditions<'_>) -> PropertyValue {
        let liquid = c.phase == Phase::Liquid;
        match d {
            Derivative::Value => PropertyValue::Scalar(self.entropy(c.phase, c.t, c.p, c.x)),
            Derivative::Temperature => PropertyValue::Scalar(
                self.zip(c.x)
                    .filter(|&(_, xi)| xi > 0.0)
                    .map(|(comp, xi)| {
                        let mut ds = comp.ideal_gas_heat_capacity().value(c.t) / c.t;
                        if liquid {
                            let psat = comp.vapor_pressure();
                            let hvap = comp.heat_of_vaporization();
                            ds -= R * psat.value_dt(c.t) / psat.value(c.t)
                                + hvap.value_dt(c.t) / c.t
                                - hvap.value(c.t) / (c.t * c.t);
                        }
                        xi * ds
                    })
                    .sum(),
            ),
            Derivative::Pressure => match c.phase {
                Phase::Vapor => PropertyValue::Scalar(-R / c.p),
                Phase::Liquid => PropertyValue::Scalar(0.0),
            },
            Derivative::MoleFraction | Derivative::MoleNumber => {
                // d(n·X ln X)/dn picks up R·ΣX that d(X ln X)/dX does not
                let correction = if d == Derivative::MoleNumber {
                    R * c.x.iter().sum::<f64>()
                } else {
                    0.0
                };
                PropertyValue::Vector(
                    self.zip(c.x)
                        .map(|(comp, xi)| {
                            let mut log_term = -R * xi.ln();
                            if !log_term.is_finite() || log_term < LOG_TERM_FLOOR {
                                log_term = LOG_TERM_FLOOR;
                            }
                            let mut s = comp.ideal_gas_heat_capacity().int_value_over_t(c.t)
                                + log_term
                                - R
                                + correction;
                            if liquid {
                                s -= liquid_entropy_offset(comp, c.t);
                            }
                            s
                        })
                        .collect(),
                )
            }
        }
    }

    fn fugacity(&self, d: Derivative, c: &PhaseConditions<'_>) -> PropertyValue {
        // fugacity_k = X_k·P_k with P_k the pressure (vapor) or vapor pressure (liquid)
        let scale = match c.phase {
            Phase::Vapor => vec![c.p; self.len()],
            Phase::Liquid => self.vapor_pressures(c.t),
        };
        match d {
            Derivative::Value => {
                PropertyValue::Vector(c.x.iter().zip(&scale).map(|(x, s)| x * s).collect())
            }
            Derivative::Temperature => match c.phase {
                Phase::Vapor => self.zeros(),
                Phase::Liquid => PropertyValue::Vector(
                    self.zip(c.x)
                        .map(|(comp, xi)| xi * comp.vapor_pressure().value_dt(c.t))
                        .collect(),
                ),
            },
            Derivative::Pressure => match c.phase {
                Phase::Vapor => PropertyValue::Vector(c.x.to_vec()),
                Phase::Liquid => self.zeros(),
            },
            Derivative::MoleFraction => self.diagonal(&scale),
            Derivative::MoleNumber => self.mole_number_matrix(c.x, &scale),
        }
    }

    fn fugacity_coefficient(&self, d: Derivative, c: &PhaseConditions<'_>) -> PropertyValue {
        if d.is_composition() {
            return self.zero_matrix();
        }
        match c.phase {
            Phase::Vapor => match d {
                Derivative::Value => PropertyValue::Vector(vec![1.0; self.len()]),
                _ => self.zeros(),
            },
            Phase::Liquid => PropertyValue::Vector(match d {
                Derivative::Temperature => {
                    self.per_compound(|comp| comp.vapor_pressure().value_dt(c.t) / c.p)
                }
                Derivative::Pressure => {
                    self.per_compound(|comp| -comp.vapor_pressure().value(c.t) / (c.p * c.p))
                }
                _ => self.per_compound(|comp| comp.vapor_pressure().value(c.t) / c.p),
            }),
        }
    }

    fn log_fugacity_coefficient(&self, d: Derivative, c: &PhaseConditions<'_>) -> PropertyValue {
        if d.is_composition() {
            return self.zero_matrix();
        }
        match c.phase {
            Phase::Vapor => self.zeros(),
            Phase::Liquid => PropertyValue::Vector(match d {
                Derivative::Temperature => self.per_compound(|comp| {
                    let psat = comp.vapor_pressure();
                    psat.value_dt(c.t) / psat.value(c.t)
                }),
                Derivative::Pressure => vec![-1.0 / c.p; self.len()],
                _ => {
                    let ln_p = c.p.ln();
                    self.per_compound(|comp| comp.vapor_pressure().value(c.t).ln() - ln_p)
                }
            }),
        }
    }

    /// Liquid only; activity coefficients are unity.
    fn activity(&self, d: Derivative, c: &PhaseConditions<'_>) -> PropertyValue {
        match d {
            Derivative::Value => PropertyValue::Vector(c.x.to_vec()),
            Derivative::Temperature | Derivative::Pressure => self.zeros(),
            Derivative::MoleFraction => self.diagonal(&vec![1.0; self.len()]),
            Derivative::MoleNumber => self.mole_number_matrix(c.x, &vec![1.0; self.len()]),
        }
    }
}

/// Pure liquid entropy below the ideal gas at the reference pressure.
fn liquid_entropy_offset(c: &Compound, t: f64) -> f64 {
    R * (c.vapor_pressure().value(t) / REFERENCE_PRESSURE).ln() + c.heat_of_vaporization().value(t) / t
}
