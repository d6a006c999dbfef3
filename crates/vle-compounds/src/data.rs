//! Serializable compound records.
//!
//! Two on-disk forms are understood:
//!
//! - YAML, one mapping per file (`benzene.yaml`)
//! - the legacy line-based `.compound` format: name, formula, CAS number, MW,
//!   NBP, TC, PC, VC, then one line each for the Cp, Hvap and liquid density
//!   coefficients (five numbers) and the Antoine coefficients (three numbers)

use crate::error::{DataError, DataResult};
use serde::{Deserialize, Serialize};

/// Raw compound description as supplied by a data provider.
///
/// Units: MW in g/mol, temperatures in K, pressures in Pa, volumes in m³/mol.
/// Correlations return J/(mol·K) (Cp), J/mol (Hvap), mol/m³ (liquid density)
/// and Pa (Antoine, base-10).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundData {
    pub name: String,
    pub formula: String,
    pub cas: String,
    pub molecular_weight: f64,
    pub normal_boiling_point: f64,
    pub critical_temperature: f64,
    pub critical_pressure: f64,
    pub critical_volume: f64,
    pub ideal_gas_heat_capacity: [f64; 5],
    pub heat_of_vaporization: [f64; 5],
    pub liquid_density: [f64; 5],
    pub antoine: [f64; 3],
}

impl CompoundData {
    pub fn from_yaml_str(text: &str) -> DataResult<Self> {
        let data: CompoundData = serde_yaml::from_str(text)?;
        data.validate()?;
        Ok(data)
    }

    pub fn to_yaml_string(&self) -> DataResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parse the legacy line-based format.
    pub fn from_legacy_str(text: &str) -> DataResult<Self> {
        let mut reader = LegacyReader {
            lines: text.lines(),
            name: String::new(),
        };

        let name = reader.line("name")?.to_string();
        reader.name = name.clone();
        let formula = reader.line("formula")?.to_string();
        let cas = reader.line("CAS number")?.to_string();
        let molecular_weight = reader.scalar("molecular weight")?;
        let normal_boiling_point = reader.scalar("normal boiling point")?;
        let critical_temperature = reader.scalar("critical temperature")?;
        let critical_pressure = reader.scalar("critical pressure")?;
        let critical_volume = reader.scalar("critical volume")?;

        let data = CompoundData {
            name,
            formula,
            cas,
            molecular_weight,
            normal_boiling_point,
            critical_temperature,
            critical_pressure,
            critical_volume,
            ideal_gas_heat_capacity: reader.row("heat capacity")?,
            heat_of_vaporization: reader.row("heat of vaporization")?,
            liquid_density: reader.row("liquid density")?,
            antoine: reader.row("Antoine")?,
        };
        data.validate()?;
        Ok(data)
    }

    /// Write the legacy line-based format.
    pub fn to_legacy_string(&self) -> String {
        let join = |values: &[f64]| {
            values
                .iter()
                .map(|v| format!("{v:e}"))
                .collect::<Vec<_>>()
                .join(" ")
        };
        let mut out = String::new();
        for line in [
            self.name.clone(),
            self.formula.clone(),
            self.cas.clone(),
            format!("{:e}", self.molecular_weight),
            format!("{:e}", self.normal_boiling_point),
            format!("{:e}", self.critical_temperature),
            format!("{:e}", self.critical_pressure),
            format!("{:e}", self.critical_volume),
            join(&self.ideal_gas_heat_capacity),
            join(&self.heat_of_vaporization),
            join(&self.liquid_density),
            join(&self.antoine),
        ] {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Check the record is usable by the property engine.
    pub fn validate(&self) -> DataResult<()> {
        let invalid = |what: &str| DataError::Invalid {
            name: self.name.clone(),
            what: what.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        for (value, what) in [
            (self.molecular_weight, "molecular weight must be positive"),
            (self.critical_temperature, "critical temperature must be positive"),
            (self.critical_pressure, "critical pressure must be positive"),
            (self.critical_volume, "critical volume must be positive"),
        ] {
            if !vle_core::is_positive_finite(value) {
                return Err(invalid(what));
            }
        }
        if !self.normal_boiling_point.is_finite() {
            return Err(invalid("normal boiling point is not finite"));
        }
        let coefficients = self
            .ideal_gas_heat_capacity
            .iter()
            .chain(&self.heat_of_vaporization)
            .chain(&self.liquid_density)
            .chain(&self.antoine);
        if coefficients.into_iter().any(|c| !c.is_finite()) {
            return Err(invalid("correlation coefficients must be finite"));
        }
        Ok(())
    }
}

struct LegacyReader<'a> {
    lines: std::str::Lines<'a>,
    name: String,
}

impl<'a> LegacyReader<'a> {
    fn error(&self, what: String) -> DataError {
        DataError::Legacy {
            name: self.name.clone(),
            what,
        }
    }

    fn line(&mut self, what: &str) -> DataResult<&'a str> {
        match self.lines.next() {
            Some(line) => Ok(line.trim()),
            None => Err(self.error(format!(
                "unexpected end of file while reading {what}"
            ))),
        }
    }

    fn scalar(&mut self, what: &str) -> DataResult<f64> {
        let line = self.line(what)?;
        line.parse()
            .map_err(|_| self.error(format!("failed to read {what} from \"{line}\"")))
    }

    fn row<const N: usize>(&mut self, what: &str) -> DataResult<[f64; N]> {
        let line = self.line(what)?;
        let values = line
            .split_whitespace()
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| self.error(format!("failed to read {what} coefficients")))?;
        let found = values.len();
        values.try_into().map_err(|_| {
            self.error(format!("expected {N} {what} coefficients, found {found}"))
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_format_round_trip() {
        let data = fixtures::benzene();
        let text = data.to_legacy_string();
        let parsed = CompoundData::from_legacy_str(&text).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn legacy_truncated_file() {
        let err = CompoundData::from_legacy_str("benzene\nC6H6\n71-43-2\n78.11\n").unwrap_err();
        assert!(err.to_string().contains("unexpected end of file"));
    }

    #[test]
    fn legacy_bad_coefficient_count() {
        let data = fixtures::benzene();
        let text = data.to_legacy_string().replace("9.030553e0 ", "");
        let err = CompoundData::from_legacy_str(&text).unwrap_err();
        assert!(err.to_string().contains("Antoine"));
    }

    #[test]
    fn yaml_round_trip() {
        let data = fixtures::benzene();
        let yaml = data.to_yaml_string().unwrap();
        assert_eq!(CompoundData::from_yaml_str(&yaml).unwrap(), data);
    }

    #[test]
    fn validation_rejects_non_physical_constants() {
        let mut data = fixtures::benzene();
        data.critical_temperature = -1.0;
        assert!(matches!(data.validate(), Err(DataError::Invalid { .. })));

        let mut data = fixtures::benzene();
        data.antoine[1] = f64::NAN;
        assert!(data.validate().is_err());

        let mut data = fixtures::benzene();
        data.name = "  ".into();
        assert!(data.validate().is_err());
    }
}
