//! The property package: an ordered set of compounds and the calculations on it.

use crate::error::{ThermoError, ThermoResult};
use crate::mixture::Mixture;
use crate::phase::Phase;
use crate::properties::{PropertyValue, SinglePhaseProperty};
use crate::validation::{self, COMPOSITION};
use tracing::debug;
use vle_compounds::{
    Compound, CompoundDataProvider, PackageDefinition, RealConstant, StringConstant,
    TemperatureDependentProperty,
};

/// State of one phase: temperature [K], pressure [Pa] and mole fractions.
///
/// Mole fractions line up with the compound indices passed alongside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseConditions<'a> {
    pub phase: Phase,
    pub t: f64,
    pub p: f64,
    pub x: &'a [f64],
}

impl<'a> PhaseConditions<'a> {
    pub fn new(phase: Phase, t: f64, p: f64, x: &'a [f64]) -> Self {
        Self { phase, t, p, x }
    }

    pub fn vapor(t: f64, p: f64, x: &'a [f64]) -> Self {
        Self::new(Phase::Vapor, t, p, x)
    }

    pub fn liquid(t: f64, p: f64, x: &'a [f64]) -> Self {
        Self::new(Phase::Liquid, t, p, x)
    }
}

/// Ideal vapor/liquid property package.
///
/// Populated once, read-only afterwards. Every calculation takes `&self`
/// and returns owned values, so a package can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct PropertyPackage {
    name: Option<String>,
    compounds: Vec<Compound>,
}

impl PropertyPackage {
    /// Empty package; calculations fail with [`ThermoError::Uninitialized`] until [`load`](Self::load).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compounds(compounds: Vec<Compound>) -> ThermoResult<Self> {
        let mut package = Self::new();
        package.load(compounds)?;
        Ok(package)
    }

    /// Resolve a package definition against a compound data provider.
    pub fn from_definition(
        definition: &PackageDefinition,
        provider: &dyn CompoundDataProvider,
    ) -> ThermoResult<Self> {
        let mut package = Self::with_compounds(definition.resolve(provider)?)?;
        package.name = definition.name.clone();
        Ok(package)
    }

    /// Populate the package. Only allowed once.
    pub fn load(&mut self, compounds: Vec<Compound>) -> ThermoResult<()> {
        if self.is_initialized() {
            return Err(ThermoError::AlreadyInitialized);
        }
        if compounds.is_empty() {
            return Err(ThermoError::NoCompounds);
        }
        for (i, compound) in compounds.iter().enumerate() {
            if compounds[..i]
                .iter()
                .any(|other| other.name().eq_ignore_ascii_case(compound.name()))
            {
                return Err(ThermoError::DuplicateCompoundName {
                    name: compound.name().to_string(),
                });
            }
        }
        debug!(
            compounds = compounds.len(),
            names = ?compounds.iter().map(Compound::name).collect::<Vec<_>>(),
            "property package loaded"
        );
        self.compounds = compounds;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        !self.compounds.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The compound list as a savable definition.
    pub fn definition(&self) -> ThermoResult<PackageDefinition> {
        Ok(PackageDefinition {
            name: self.name.clone(),
            compounds: self
                .loaded()?
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
        })
    }

    pub(crate) fn loaded(&self) -> ThermoResult<&[Compound]> {
        if self.compounds.is_empty() {
            return Err(ThermoError::Uninitialized);
        }
        Ok(&self.compounds)
    }

    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    pub fn compound_count(&self) -> ThermoResult<usize> {
        Ok(self.loaded()?.len())
    }

    pub fn compound(&self, index: usize) -> ThermoResult<&Compound> {
        let compounds = self.loaded()?;
        compounds.get(index).ok_or(ThermoError::IndexOutOfRange {
            index,
            count: compounds.len(),
        })
    }

    /// Position of a compound by name (case-insensitive).
    pub fn compound_index(&self, name: &str) -> Option<usize> {
        self.compounds
            .iter()
            .position(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn string_constant(&self, index: usize, id: StringConstant) -> ThermoResult<&str> {
        Ok(self.compound(index)?.string_constant(id))
    }

    pub fn real_constant(&self, index: usize, id: RealConstant) -> ThermoResult<f64> {
        Ok(self.compound(index)?.real_constant(id))
    }

    /// Pure-compound correlation value at `t`, which must lie in `(0, TC]`.
    pub fn temperature_dependent_property(
        &self,
        index: usize,
        id: TemperatureDependentProperty,
        t: f64,
    ) -> ThermoResult<f64> {
        let compound = self.compound(index)?;
        validation::check_temperature(t)?;
        validation::check_below_critical([compound], t)?;
        Ok(compound.temperature_dependent(id, t))
    }

    /// Checked indices to compound references.
    pub(crate) fn mixture(&self, indices: &[usize]) -> ThermoResult<Mixture<'_>> {
        let compounds = self.loaded()?;
        validation::check_indices(indices, compounds.len())?;
        Ok(Mixture::new(indices.iter().map(|&i| &compounds[i]).collect()))
    }

    /// Single-phase properties of a mixture.
    ///
    /// All inputs are checked before anything is calculated; one value is
    /// returned per requested property.
    pub fn single_phase_properties(
        &self,
        compound_indices: &[usize],
        conditions: PhaseConditions<'_>,
        properties: &[SinglePhaseProperty],
    ) -> ThermoResult<Vec<PropertyValue>> {
        self.loaded()?;
        if compound_indices.is_empty() {
            return Err(ThermoError::EmptyMixture);
        }
        validation::check_composition_length(compound_indices.len(), conditions.x.len())?;
        let mixture = self.mixture(compound_indices)?;
        validation::check_temperature(conditions.t)?;
        validation::check_below_critical(mixture.compounds().iter().copied(), conditions.t)?;
        validation::check_pressure(conditions.p)?;
        validation::check_composition(conditions.x, &COMPOSITION)?;
        if conditions.phase == Phase::Vapor
            && properties.iter().any(|p| p.property.liquid_only())
        {
            return Err(ThermoError::UnsupportedPhase {
                what: "activity is not supported for the vapor phase",
            });
        }

        Ok(properties
            .iter()
            .map(|&p| mixture.property(p, &conditions))
            .collect())
    }
}
