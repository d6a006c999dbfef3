//! Identifiers for pure-compound constants and temperature-dependent properties.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identity strings of a compound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringConstant {
    Name,
    CasNumber,
    ChemicalFormula,
}

impl StringConstant {
    pub const ALL: [StringConstant; 3] = [
        StringConstant::Name,
        StringConstant::CasNumber,
        StringConstant::ChemicalFormula,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            StringConstant::Name => "name",
            StringConstant::CasNumber => "casRegistryNumber",
            StringConstant::ChemicalFormula => "chemicalFormula",
        }
    }
}

/// Scalar constants of a compound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RealConstant {
    /// Normal boiling point [K]
    NormalBoilingPoint,
    /// Relative molecular weight
    MolecularWeight,
    /// Critical temperature [K]
    CriticalTemperature,
    /// Critical pressure [Pa]
    CriticalPressure,
    /// Critical volume [m³/mol]
    CriticalVolume,
    /// Critical density [mol/m³]
    CriticalDensity,
}

impl RealConstant {
    pub const ALL: [RealConstant; 6] = [
        RealConstant::NormalBoilingPoint,
        RealConstant::MolecularWeight,
        RealConstant::CriticalTemperature,
        RealConstant::CriticalPressure,
        RealConstant::CriticalVolume,
        RealConstant::CriticalDensity,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RealConstant::NormalBoilingPoint => "normalBoilingPoint",
            RealConstant::MolecularWeight => "molecularWeight",
            RealConstant::CriticalTemperature => "criticalTemperature",
            RealConstant::CriticalPressure => "criticalPressure",
            RealConstant::CriticalVolume => "criticalVolume",
            RealConstant::CriticalDensity => "criticalDensity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            RealConstant::NormalBoilingPoint | RealConstant::CriticalTemperature => "K",
            RealConstant::MolecularWeight => "g/mol",
            RealConstant::CriticalPressure => "Pa",
            RealConstant::CriticalVolume => "m3/mol",
            RealConstant::CriticalDensity => "mol/m3",
        }
    }
}

/// Pure-compound properties that depend on temperature only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureDependentProperty {
    /// Heat of vaporization [J/mol]
    HeatOfVaporization,
    HeatOfVaporizationDT,
    /// Ideal gas heat capacity [J/(mol·K)]
    IdealGasHeatCapacity,
    IdealGasHeatCapacityDT,
    /// Vapor pressure [Pa]
    VaporPressure,
    VaporPressureDT,
    /// Liquid density [mol/m³]
    LiquidDensity,
    LiquidDensityDT,
}

impl TemperatureDependentProperty {
    pub const ALL: [TemperatureDependentProperty; 8] = [
        TemperatureDependentProperty::HeatOfVaporization,
        TemperatureDependentProperty::HeatOfVaporizationDT,
        TemperatureDependentProperty::IdealGasHeatCapacity,
        TemperatureDependentProperty::IdealGasHeatCapacityDT,
        TemperatureDependentProperty::VaporPressure,
        TemperatureDependentProperty::VaporPressureDT,
        TemperatureDependentProperty::LiquidDensity,
        TemperatureDependentProperty::LiquidDensityDT,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::HeatOfVaporization => "heatOfVaporization",
            Self::HeatOfVaporizationDT => "heatOfVaporization.Dtemperature",
            Self::IdealGasHeatCapacity => "idealGasHeatCapacity",
            Self::IdealGasHeatCapacityDT => "idealGasHeatCapacity.Dtemperature",
            Self::VaporPressure => "vaporPressure",
            Self::VaporPressureDT => "vaporPressure.Dtemperature",
            Self::LiquidDensity => "liquidDensity",
            Self::LiquidDensityDT => "liquidDensity.Dtemperature",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::HeatOfVaporization => "J/mol",
            Self::HeatOfVaporizationDT => "J/mol/K",
            Self::IdealGasHeatCapacity => "J/mol/K",
            Self::IdealGasHeatCapacityDT => "J/mol/K2",
            Self::VaporPressure => "Pa",
            Self::VaporPressureDT => "Pa/K",
            Self::LiquidDensity => "mol/m3",
            Self::LiquidDensityDT => "mol/m3/K",
        }
    }
}

/// Identifier text that matched no known identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown identifier \"{0}\"")]
pub struct UnknownIdentifier(pub String);

/// Case-insensitive match ignoring `.`, `_`, `-` and spaces.
pub(crate) fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '.' | '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_by_key<T: Copy>(s: &str, all: &[T], key: impl Fn(&T) -> &'static str) -> Option<T> {
    let wanted = normalize_key(s);
    all.iter().copied().find(|id| normalize_key(key(id)) == wanted)
}

impl FromStr for StringConstant {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "cas" | "casnumber" => Ok(StringConstant::CasNumber),
            "formula" => Ok(StringConstant::ChemicalFormula),
            _ => parse_by_key(s, &Self::ALL, Self::key)
                .ok_or_else(|| UnknownIdentifier(s.to_string())),
        }
    }
}

impl FromStr for RealConstant {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "nbp" => Ok(RealConstant::NormalBoilingPoint),
            "mw" => Ok(RealConstant::MolecularWeight),
            "tc" => Ok(RealConstant::CriticalTemperature),
            "pc" => Ok(RealConstant::CriticalPressure),
            "vc" => Ok(RealConstant::CriticalVolume),
            _ => parse_by_key(s, &Self::ALL, Self::key)
                .ok_or_else(|| UnknownIdentifier(s.to_string())),
        }
    }
}

impl FromStr for TemperatureDependentProperty {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "vaporPressureDT" and "vaporPressure.Dtemperature" both accepted
        let wanted = normalize_key(s);
        let wanted = match wanted.strip_suffix("dt") {
            Some(base) => format!("{base}dtemperature"),
            None => wanted,
        };
        Self::ALL
            .iter()
            .copied()
            .find(|id| normalize_key(id.key()) == wanted)
            .ok_or_else(|| UnknownIdentifier(s.to_string()))
    }
}

impl fmt::Display for StringConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for RealConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for TemperatureDependentProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keys_and_aliases() {
        assert_eq!("CAS".parse::<StringConstant>(), Ok(StringConstant::CasNumber));
        assert_eq!("name".parse::<StringConstant>(), Ok(StringConstant::Name));
        assert_eq!("Tc".parse::<RealConstant>(), Ok(RealConstant::CriticalTemperature));
        assert_eq!(
            "critical_density".parse::<RealConstant>(),
            Ok(RealConstant::CriticalDensity)
        );
        assert_eq!(
            "vaporPressureDT".parse::<TemperatureDependentProperty>(),
            Ok(TemperatureDependentProperty::VaporPressureDT)
        );
        assert_eq!(
            "liquidDensity".parse::<TemperatureDependentProperty>(),
            Ok(TemperatureDependentProperty::LiquidDensity)
        );
        assert!("enthalpy".parse::<RealConstant>().is_err());
    }

    #[test]
    fn keys_round_trip() {
        for id in TemperatureDependentProperty::ALL {
            assert_eq!(id.key().parse::<TemperatureDependentProperty>(), Ok(id));
        }
        for id in RealConstant::ALL {
            assert_eq!(id.to_string().parse::<RealConstant>(), Ok(id));
        }
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let err = "enthalpy".parse::<RealConstant>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown identifier \"enthalpy\"");
        let _: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
    }
}
