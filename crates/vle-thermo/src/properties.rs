//! Property identifiers and calculated property values.
//!
//! Single-phase identifiers are a mixture property combined with a
//! derivative; their numeric ids run `property * 5 + derivative`, which gives
//! the familiar order Density, DensityDT, DensityDP, DensityDX, DensityDn,
//! Volume, … ActivityDn (0..40).

use crate::error::ThermoError;
use nalgebra::DMatrix;
use std::fmt;
use std::str::FromStr;

/// Base quantity of a single-phase property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixtureProperty {
    /// mol/m³
    Density,
    /// m³/mol
    Volume,
    /// J/mol
    Enthalpy,
    /// J/(mol·K)
    Entropy,
    /// Pa, per compound
    Fugacity,
    /// per compound
    FugacityCoefficient,
    /// per compound
    LogFugacityCoefficient,
    /// per compound, liquid only
    Activity,
}

impl MixtureProperty {
    pub const ALL: [MixtureProperty; 8] = [
        MixtureProperty::Density,
        MixtureProperty::Volume,
        MixtureProperty::Enthalpy,
        MixtureProperty::Entropy,
        MixtureProperty::Fugacity,
        MixtureProperty::FugacityCoefficient,
        MixtureProperty::LogFugacityCoefficient,
        MixtureProperty::Activity,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MixtureProperty::Density => "Density",
            MixtureProperty::Volume => "Volume",
            MixtureProperty::Enthalpy => "Enthalpy",
            MixtureProperty::Entropy => "Entropy",
            MixtureProperty::Fugacity => "Fugacity",
            MixtureProperty::FugacityCoefficient => "FugacityCoefficient",
            MixtureProperty::LogFugacityCoefficient => "LogFugacityCoefficient",
            MixtureProperty::Activity => "Activity",
        }
    }

    /// Only defined for the liquid phase.
    pub fn liquid_only(self) -> bool {
        self == MixtureProperty::Activity
    }

    /// One value per compound rather than one per phase.
    pub fn is_per_compound(self) -> bool {
        matches!(
            self,
            MixtureProperty::Fugacity
                | MixtureProperty::FugacityCoefficient
                | MixtureProperty::LogFugacityCoefficient
                | MixtureProperty::Activity
        )
    }
}

/// Which derivative of a [`MixtureProperty`] is requested.
///
/// `MoleNumber` derivatives are taken at a total of one mole, so
/// `∂X_k/∂n_j = δ_kj − X_k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Derivative {
    Value,
    Temperature,
    Pressure,
    MoleFraction,
    MoleNumber,
}

impl Derivative {
    pub const ALL: [Derivative; 5] = [
        Derivative::Value,
        Derivative::Temperature,
        Derivative::Pressure,
        Derivative::MoleFraction,
        Derivative::MoleNumber,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            Derivative::Value => "",
            Derivative::Temperature => "DT",
            Derivative::Pressure => "DP",
            Derivative::MoleFraction => "DX",
            Derivative::MoleNumber => "Dn",
        }
    }

    pub fn is_composition(self) -> bool {
        matches!(self, Derivative::MoleFraction | Derivative::MoleNumber)
    }
}

/// Shape of a calculated property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Scalar,
    /// One value per compound
    Vector,
    /// `n × n`
    Matrix,
    /// `n × 2n`, derivatives with respect to the compositions of both phases
    PhasePairMatrix,
}

impl Dimension {
    pub fn value_count(self, compounds: usize) -> usize {
        match self {
            Dimension::Scalar => 1,
            Dimension::Vector => compounds,
            Dimension::Matrix => compounds * compounds,
            Dimension::PhasePairMatrix => 2 * compounds * compounds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinglePhaseProperty {
    pub property: MixtureProperty,
    pub derivative: Derivative,
}

impl SinglePhaseProperty {
    pub const COUNT: usize = 40;

    pub const fn new(property: MixtureProperty, derivative: Derivative) -> Self {
        Self {
            property,
            derivative,
        }
    }

    pub const fn value(property: MixtureProperty) -> Self {
        Self::new(property, Derivative::Value)
    }

    /// All 40 identifiers in id order.
    pub fn all() -> impl Iterator<Item = SinglePhaseProperty> {
        MixtureProperty::ALL.into_iter().flat_map(|property| {
            Derivative::ALL
                .into_iter()
                .map(move |derivative| SinglePhaseProperty::new(property, derivative))
        })
    }

    pub fn id(self) -> usize {
        self.property as usize * Derivative::ALL.len() + self.derivative as usize
    }

    pub fn dimension(self) -> Dimension {
        let rank =
            usize::from(self.property.is_per_compound()) + usize::from(self.derivative.is_composition());
        match rank {
            0 => Dimension::Scalar,
            1 => Dimension::Vector,
            _ => Dimension::Matrix,
        }
    }

    pub fn name(self) -> String {
        format!("{}{}", self.property.key(), self.derivative.suffix())
    }
}

impl fmt::Display for SinglePhaseProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for SinglePhaseProperty {
    type Err = ThermoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ThermoError::UnsupportedPropertyId {
                what: format!("\"{s}\" is not a single-phase property"),
            })
    }
}

impl TryFrom<usize> for SinglePhaseProperty {
    type Error = ThermoError;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        if id >= Self::COUNT {
            return Err(ThermoError::UnsupportedPropertyId {
                what: format!("single-phase property id {id}"),
            });
        }
        let n = Derivative::ALL.len();
        Ok(Self::new(MixtureProperty::ALL[id / n], Derivative::ALL[id % n]))
    }
}

/// Properties relating two coexisting phases.
///
/// `K = φ₂/φ₁`. The composition derivatives are returned for both phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwoPhaseProperty {
    Kvalue,
    KvalueDT,
    KvalueDP,
    LogKvalue,
    LogKvalueDT,
    LogKvalueDP,
    KvalueDX,
    KvalueDn,
    LogKvalueDX,
    LogKvalueDn,
}

impl TwoPhaseProperty {
    pub const ALL: [TwoPhaseProperty; 10] = [
        TwoPhaseProperty::Kvalue,
        TwoPhaseProperty::KvalueDT,
        TwoPhaseProperty::KvalueDP,
        TwoPhaseProperty::LogKvalue,
        TwoPhaseProperty::LogKvalueDT,
        TwoPhaseProperty::LogKvalueDP,
        TwoPhaseProperty::KvalueDX,
        TwoPhaseProperty::KvalueDn,
        TwoPhaseProperty::LogKvalueDX,
        TwoPhaseProperty::LogKvalueDn,
    ];

    pub fn id(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            TwoPhaseProperty::Kvalue => "Kvalue",
            TwoPhaseProperty::KvalueDT => "KvalueDT",
            TwoPhaseProperty::KvalueDP => "KvalueDP",
            TwoPhaseProperty::LogKvalue => "LogKvalue",
            TwoPhaseProperty::LogKvalueDT => "LogKvalueDT",
            TwoPhaseProperty::LogKvalueDP => "LogKvalueDP",
            TwoPhaseProperty::KvalueDX => "KvalueDX",
            TwoPhaseProperty::KvalueDn => "KvalueDn",
            TwoPhaseProperty::LogKvalueDX => "LogKvalueDX",
            TwoPhaseProperty::LogKvalueDn => "LogKvalueDn",
        }
    }

    pub fn dimension(self) -> Dimension {
        match self {
            TwoPhaseProperty::KvalueDX
            | TwoPhaseProperty::KvalueDn
            | TwoPhaseProperty::LogKvalueDX
            | TwoPhaseProperty::LogKvalueDn => Dimension::PhasePairMatrix,
            _ => Dimension::Vector,
        }
    }
}

impl fmt::Display for TwoPhaseProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TwoPhaseProperty {
    type Err = ThermoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ThermoError::UnsupportedPropertyId {
                what: format!("\"{s}\" is not a two-phase property"),
            })
    }
}

impl TryFrom<usize> for TwoPhaseProperty {
    type Error = ThermoError;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(id)
            .copied()
            .ok_or_else(|| ThermoError::UnsupportedPropertyId {
                what: format!("two-phase property id {id}"),
            })
    }
}

/// A calculated property.
///
/// Matrix entry `(k, j)` is the derivative of the property of compound `k`
/// with respect to the mole fraction or mole number of compound `j`.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Scalar(f64),
    Vector(Vec<f64>),
    Matrix(DMatrix<f64>),
}

impl PropertyValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            PropertyValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            PropertyValue::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&DMatrix<f64>> {
        match self {
            PropertyValue::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PropertyValue::Scalar(_) => 1,
            PropertyValue::Vector(v) => v.len(),
            PropertyValue::Matrix(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat values; matrices column by column, so index `j * n + k` holds entry `(k, j)`.
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            PropertyValue::Scalar(v) => vec![*v],
            PropertyValue::Vector(v) => v.clone(),
            PropertyValue::Matrix(m) => m.as_slice().to_vec(),
        }
    }
}
