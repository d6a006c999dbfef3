//! Immutable pure-compound record.

use crate::antoine::Antoine;
use crate::correlation::Correlation;
use crate::data::CompoundData;
use crate::error::DataError;
use crate::identifiers::{RealConstant, StringConstant, TemperatureDependentProperty};

/// A compound with its identity, critical constants and correlations.
///
/// Built once from validated [`CompoundData`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    name: String,
    formula: String,
    cas: String,
    molecular_weight: f64,
    normal_boiling_point: f64,
    critical_temperature: f64,
    critical_pressure: f64,
    critical_volume: f64,
    ideal_gas_heat_capacity: Correlation,
    heat_of_vaporization: Correlation,
    liquid_density: Correlation,
    vapor_pressure: Antoine,
}

impl Compound {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn cas(&self) -> &str {
        &self.cas
    }

    pub fn molecular_weight(&self) -> f64 {
        self.molecular_weight
    }

    pub fn normal_boiling_point(&self) -> f64 {
        self.normal_boiling_point
    }

    pub fn critical_temperature(&self) -> f64 {
        self.critical_temperature
    }

    pub fn critical_pressure(&self) -> f64 {
        self.critical_pressure
    }

    pub fn critical_volume(&self) -> f64 {
        self.critical_volume
    }

    /// Ideal gas heat capacity, J/(mol·K).
    pub fn ideal_gas_heat_capacity(&self) -> &Correlation {
        &self.ideal_gas_heat_capacity
    }

    /// Heat of vaporization, J/mol.
    pub fn heat_of_vaporization(&self) -> &Correlation {
        &self.heat_of_vaporization
    }

    /// Liquid molar density, mol/m³.
    pub fn liquid_density(&self) -> &Correlation {
        &self.liquid_density
    }

    /// Vapor pressure, Pa.
    pub fn vapor_pressure(&self) -> &Antoine {
        &self.vapor_pressure
    }

    pub fn string_constant(&self, id: StringConstant) -> &str {
        match id {
            StringConstant::Name => &self.name,
            StringConstant::CasNumber => &self.cas,
            StringConstant::ChemicalFormula => &self.formula,
        }
    }

    pub fn real_constant(&self, id: RealConstant) -> f64 {
        match id {
            RealConstant::NormalBoilingPoint => self.normal_boiling_point,
            RealConstant::MolecularWeight => self.molecular_weight,
            RealConstant::CriticalTemperature => self.critical_temperature,
            RealConstant::CriticalPressure => self.critical_pressure,
            RealConstant::CriticalVolume => self.critical_volume,
            RealConstant::CriticalDensity => 1.0 / self.critical_volume,
        }
    }

    /// Evaluate a temperature-dependent property. The temperature is not
    /// range-checked here.
    pub fn temperature_dependent(&self, id: TemperatureDependentProperty, t: f64) -> f64 {
        use TemperatureDependentProperty as P;
        match id {
            P::HeatOfVaporization => self.heat_of_vaporization.value(t),
            P::HeatOfVaporizationDT => self.heat_of_vaporization.value_dt(t),
            P::IdealGasHeatCapacity => self.ideal_gas_heat_capacity.value(t),
            P::IdealGasHeatCapacityDT => self.ideal_gas_heat_capacity.value_dt(t),
            P::VaporPressure => self.vapor_pressure.value(t),
            P::VaporPressureDT => self.vapor_pressure.value_dt(t),
            P::LiquidDensity => self.liquid_density.value(t),
            P::LiquidDensityDT => self.liquid_density.value_dt(t),
        }
    }

    /// Back to the serializable form.
    pub fn to_data(&self) -> CompoundData {
        CompoundData {
            name: self.name.clone(),
            formula: self.formula.clone(),
            cas: self.cas.clone(),
            molecular_weight: self.molecular_weight,
            normal_boiling_point: self.normal_boiling_point,
            critical_temperature: self.critical_temperature,
            critical_pressure: self.critical_pressure,
            critical_volume: self.critical_volume,
            ideal_gas_heat_capacity: self.ideal_gas_heat_capacity.coefficients(),
            heat_of_vaporization: self.heat_of_vaporization.coefficients(),
            liquid_density: self.liquid_density.coefficients(),
            antoine: self.vapor_pressure.coefficients(),
        }
    }
}

impl TryFrom<CompoundData> for Compound {
    type Error = DataError;

    fn try_from(data: CompoundData) -> Result<Self, Self::Error> {
        data.validate()?;
        Ok(Compound {
            ideal_gas_heat_capacity: Correlation::from_coefficients(data.ideal_gas_heat_capacity),
            heat_of_vaporization: Correlation::from_coefficients(data.heat_of_vaporization),
            liquid_density: Correlation::from_coefficients(data.liquid_density),
            vapor_pressure: Antoine::from_coefficients(data.antoine),
            name: data.name,
            formula: data.formula,
            cas: data.cas,
            molecular_weight: data.molecular_weight,
            normal_boiling_point: data.normal_boiling_point,
            critical_temperature: data.critical_temperature,
            critical_pressure: data.critical_pressure,
            critical_volume: data.critical_volume,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn constants_lookup() {
        let benzene = Compound::try_from(fixtures::benzene()).unwrap();
        assert_eq!(benzene.string_constant(StringConstant::Name), "benzene");
        assert_eq!(benzene.string_constant(StringConstant::CasNumber), "71-43-2");
        assert_eq!(benzene.string_constant(StringConstant::ChemicalFormula), "C6H6");
        assert_eq!(benzene.real_constant(RealConstant::MolecularWeight), 78.114);
        let rho_c = benzene.real_constant(RealConstant::CriticalDensity);
        assert!((rho_c - 1.0 / 2.56e-4).abs() < 1e-9);
    }

    #[test]
    fn temperature_dependent_values() {
        let benzene = Compound::try_from(fixtures::benzene()).unwrap();
        let t = 353.24;
        let psat = benzene.temperature_dependent(TemperatureDependentProperty::VaporPressure, t);
        // close to 1 atm at the normal boiling point
        assert!((psat - 101_325.0).abs() / 101_325.0 < 0.01);
        let hvap =
            benzene.temperature_dependent(TemperatureDependentProperty::HeatOfVaporization, t);
        assert!((hvap - (50616.0 - 56.3 * t)).abs() < 1e-9);
        assert_eq!(
            benzene.temperature_dependent(TemperatureDependentProperty::LiquidDensityDT, t),
            -14.2
        );
    }

    #[test]
    fn data_round_trip() {
        let data = fixtures::benzene();
        let compound = Compound::try_from(data.clone()).unwrap();
        assert_eq!(compound.to_data(), data);
    }

    #[test]
    fn invalid_data_rejected() {
        let mut data = fixtures::benzene();
        data.molecular_weight = 0.0;
        assert!(Compound::try_from(data).is_err());
    }
}
