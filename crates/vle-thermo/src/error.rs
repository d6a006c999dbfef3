//! Property package errors.

use thiserror::Error;
use vle_compounds::DataError;
use vle_solver::SolverError;

/// Result type for property package operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors reported by property and flash calculations.
///
/// Inputs are validated before any calculation starts, so an error never
/// comes with partial results.
#[derive(Error, Debug)]
pub enum ThermoError {
    #[error("Property package has not been initialized")]
    Uninitialized,

    #[error("Property package is already initialized")]
    AlreadyInitialized,

    #[error("Property package must contain at least one compound")]
    NoCompounds,

    #[error("Compound \"{name}\" is present in the property package more than once")]
    DuplicateCompoundName { name: String },

    #[error("Compound index out of range (index {index}, {count} compounds)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("At least one compound appears in the mixture more than once (index {index})")]
    DuplicateCompound { index: usize },

    #[error("Mixture must contain at least one compound")]
    EmptyMixture,

    #[error("Composition has {actual} values for {expected} compounds")]
    CompositionLength { expected: usize, actual: usize },

    #[error("Invalid composition: {what}")]
    InvalidComposition { what: &'static str },

    #[error("All compositions are zero")]
    AllZeroComposition,

    #[error("Invalid temperature: {what}")]
    TemperatureInvalid { what: &'static str },

    #[error("Temperature {t} K exceeds critical temperature of {compound} ({tc} K)")]
    TemperatureExceedsCritical { compound: String, t: f64, tc: f64 },

    #[error("Invalid pressure: {what}")]
    PressureInvalid { what: &'static str },

    #[error("Invalid vapor fraction: {what}")]
    VaporFractionOutOfRange { what: &'static str },

    #[error("Invalid {what}")]
    EnthalpyOrEntropyInvalid { what: &'static str },

    #[error("Unsupported property: {what}")]
    UnsupportedPropertyId { what: String },

    #[error("Unsupported phase or phase combination: {what}")]
    UnsupportedPhase { what: &'static str },

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("{stage} flash solution failed: {source}")]
    FlashFailed {
        stage: &'static str,
        #[source]
        source: Box<ThermoError>,
    },

    #[error("Compound data error: {0}")]
    Data(#[from] DataError),
}

impl ThermoError {
    /// Wrap a nested failure with the flash stage it occurred in.
    pub fn in_flash(stage: &'static str, source: ThermoError) -> Self {
        ThermoError::FlashFailed {
            stage,
            source: Box::new(source),
        }
    }

    /// Innermost error of a chain of flash failures.
    pub fn root_cause(&self) -> &ThermoError {
        match self {
            ThermoError::FlashFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
