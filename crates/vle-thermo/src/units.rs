//! Unit-aware text input for flash specifications.
//!
//! Values are entered as a number with an optional unit tag (`"80 °C"`,
//! `"1 atm"`, `"-12.5 kJ/mol"`, `"40%"`) and converted to the SI units the
//! property package works in: K, Pa, J/mol, J/(mol·K) and plain fractions.
//! A missing unit means the SI unit.

use crate::phase::FlashType;
use std::fmt;

/// Quantity family of a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Temperature (canonical: K)
    Temperature,
    /// Absolute pressure (canonical: Pa)
    Pressure,
    /// Molar enthalpy (canonical: J/mol)
    MolarEnthalpy,
    /// Molar entropy (canonical: J/(mol·K))
    MolarEntropy,
    /// Vapor fraction (canonical: 0-1, `%` accepted)
    VaporFraction,
    /// Plain number, `%` accepted
    Dimensionless,
}

impl Quantity {
    /// Quantities of the two specification values of a flash type.
    pub fn of_flash(flash_type: FlashType) -> (Quantity, Quantity) {
        match flash_type {
            FlashType::TP => (Quantity::Temperature, Quantity::Pressure),
            FlashType::TVF | FlashType::TVFm => (Quantity::Temperature, Quantity::VaporFraction),
            FlashType::PVF | FlashType::PVFm => (Quantity::Pressure, Quantity::VaporFraction),
            FlashType::PH => (Quantity::Pressure, Quantity::MolarEnthalpy),
            FlashType::PS => (Quantity::Pressure, Quantity::MolarEntropy),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "Temperature"),
            Self::Pressure => write!(f, "Pressure"),
            Self::MolarEnthalpy => write!(f, "Molar Enthalpy"),
            Self::MolarEntropy => write!(f, "Molar Entropy"),
            Self::VaporFraction => write!(f, "Vapor Fraction"),
            Self::Dimensionless => write!(f, "Dimensionless"),
        }
    }
}

/// Error in unit parsing or conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Text did not start with a number
    ParseError(String),
    /// Unit not recognized for this quantity
    UnknownUnit { unit: String, quantity: Quantity },
    /// Unit that could mean gauge or absolute pressure
    AmbiguousUnit { unit: String, reason: &'static str },
    /// Value outside the physical range of the quantity
    OutOfRange { value: f64, reason: &'static str },
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError(msg) => write!(f, "Parse error: {}", msg),
            Self::UnknownUnit { unit, quantity } => {
                write!(f, "Unknown unit '{}' for {}", unit, quantity)
            }
            Self::AmbiguousUnit { unit, reason } => {
                write!(f, "Ambiguous unit '{}': {}", unit, reason)
            }
            Self::OutOfRange { value, reason } => {
                write!(f, "Value {} out of range: {}", value, reason)
            }
        }
    }
}

impl std::error::Error for UnitError {}

/// Parse `raw_text` as a value of `quantity`, returning it in SI units.
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let trimmed = raw_text.trim();
    match quantity {
        Quantity::Temperature => parse_temperature(trimmed),
        Quantity::Pressure => parse_pressure(trimmed),
        Quantity::MolarEnthalpy => parse_molar_enthalpy(trimmed),
        Quantity::MolarEntropy => parse_molar_entropy(trimmed),
        Quantity::VaporFraction => {
            let fraction = parse_fraction(trimmed, quantity)?;
            if !(0.0..=1.0).contains(&fraction) {
                return Err(UnitError::OutOfRange {
                    value: fraction,
                    reason: "vapor fraction must be between 0 and 1",
                });
            }
            Ok(fraction)
        }
        Quantity::Dimensionless => parse_fraction(trimmed, quantity),
    }
}

fn parse_temperature(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    let kelvin = match unit.to_lowercase().as_str() {
        "" | "k" | "kelvin" => value,
        "c" | "°c" | "degc" | "celsius" => value + 273.15,
        "f" | "°f" | "degf" | "fahrenheit" => (value + 459.67) * 5.0 / 9.0,
        "r" | "°r" | "degr" | "rankine" => value * 5.0 / 9.0,
        _ => return Err(unknown(unit, Quantity::Temperature)),
    };
    if kelvin <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: kelvin,
            reason: "absolute temperature must be > 0 K",
        });
    }
    Ok(kelvin)
}

fn parse_pressure(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    let pa = match unit.to_lowercase().as_str() {
        "" | "pa" | "pascal" => value,
        "kpa" => value * 1e3,
        "mpa" => value * 1e6,
        "bar" => value * 1e5,
        "mbar" => value * 100.0,
        "atm" => value * 101_325.0,
        "torr" | "mmhg" => value * 133.322_368,
        "psia" => value * 6_894.757,
        "psi" => {
            return Err(UnitError::AmbiguousUnit {
                unit,
                reason: "use 'psia' for absolute pressure",
            });
        }
        _ => return Err(unknown(unit, Quantity::Pressure)),
    };
    if pa < 0.0 {
        return Err(UnitError::OutOfRange {
            value: pa,
            reason: "absolute pressure cannot be negative",
        });
    }
    Ok(pa)
}

fn parse_molar_enthalpy(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    match unit.to_lowercase().as_str() {
        "" | "j/mol" => Ok(value),
        "kj/mol" | "j/mmol" => Ok(value * 1e3),
        "j/kmol" => Ok(value * 1e-3),
        _ => Err(unknown(unit, Quantity::MolarEnthalpy)),
    }
}

fn parse_molar_entropy(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    match unit.to_lowercase().as_str() {
        "" | "j/(mol·k)" | "j/(mol k)" | "j/(mol*k)" | "j/mol/k" => Ok(value),
        "kj/(mol·k)" | "kj/(mol k)" | "kj/(mol*k)" | "kj/mol/k" => Ok(value * 1e3),
        _ => Err(unknown(unit, Quantity::MolarEntropy)),
    }
}

fn parse_fraction(input: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    match unit.as_str() {
        "" => Ok(value),
        "%" => Ok(value / 100.0),
        _ => Err(unknown(unit, quantity)),
    }
}

fn unknown(unit: String, quantity: Quantity) -> UnitError {
    UnitError::UnknownUnit { unit, quantity }
}

/// Split `"14.7 psia"` into `(14.7, "psia")`; a bare number has an empty unit.
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();
    let mut split_idx = trimmed.len();
    for (i, c) in trimmed.char_indices() {
        let exponent = (c == 'e' || c == 'E')
            && trimmed[i + 1..].starts_with(|n: char| n.is_ascii_digit() || n == '-' || n == '+');
        if !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || exponent) {
            split_idx = i;
            break;
        }
    }

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse numeric value from '{}'", input))
    })?;
    Ok((value, unit_part.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperatures() {
        assert_eq!(parse_quantity("300 K", Quantity::Temperature).unwrap(), 300.0);
        assert_eq!(parse_quantity("350", Quantity::Temperature).unwrap(), 350.0);
        let c = parse_quantity("80 °C", Quantity::Temperature).unwrap();
        assert!((c - 353.15).abs() < 1e-9);
        let f = parse_quantity("212F", Quantity::Temperature).unwrap();
        assert!((f - 373.15).abs() < 1e-9);
        assert!(parse_quantity("-300C", Quantity::Temperature).is_err());
    }

    #[test]
    fn pressures() {
        assert_eq!(parse_quantity("1 atm", Quantity::Pressure).unwrap(), 101_325.0);
        assert_eq!(parse_quantity("1.5bar", Quantity::Pressure).unwrap(), 1.5e5);
        assert_eq!(parse_quantity("1e5", Quantity::Pressure).unwrap(), 1e5);
        assert!(matches!(
            parse_quantity("14.7 psi", Quantity::Pressure),
            Err(UnitError::AmbiguousUnit { unit, .. }) if unit == "psi"
        ));
    }

    #[test]
    fn energies() {
        assert_eq!(parse_quantity("-12.5 kJ/mol", Quantity::MolarEnthalpy).unwrap(), -12_500.0);
        assert_eq!(parse_quantity("-80 J/(mol·K)", Quantity::MolarEntropy).unwrap(), -80.0);
        assert!(matches!(
            parse_quantity("3 kJ/kg", Quantity::MolarEnthalpy),
            Err(UnitError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn fractions() {
        assert_eq!(parse_quantity("40%", Quantity::VaporFraction).unwrap(), 0.4);
        assert_eq!(parse_quantity("0.25", Quantity::VaporFraction).unwrap(), 0.25);
        assert!(parse_quantity("120%", Quantity::VaporFraction).is_err());
        assert_eq!(parse_quantity("2.5", Quantity::Dimensionless).unwrap(), 2.5);
    }

    #[test]
    fn malformed_numbers() {
        assert!(matches!(
            parse_quantity("warm", Quantity::Temperature),
            Err(UnitError::ParseError(_))
        ));
        assert!(matches!(
            parse_quantity("300 furlongs", Quantity::Temperature),
            Err(UnitError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn flash_spec_quantities() {
        assert_eq!(
            Quantity::of_flash(FlashType::PH),
            (Quantity::Pressure, Quantity::MolarEnthalpy)
        );
        assert_eq!(Quantity::of_flash(FlashType::TVFm).1, Quantity::VaporFraction);
    }
}
