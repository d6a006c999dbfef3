//! Errors reported by the command line front end.

use vle_compounds::DataError;
use vle_thermo::{SweepDefinitionError, SweepError, ThermoError, UnitError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Invalid {what}: {source}")]
    Unit {
        what: &'static str,
        #[source]
        source: UnitError,
    },

    #[error(transparent)]
    Thermo(#[from] ThermoError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("Sweep definition error: {0}")]
    SweepDefinition(#[from] SweepDefinitionError),

    #[error("Sweep failed: {0}")]
    Sweep(#[from] SweepError),

    #[error("Failed to write JSON output: {0}")]
    Json(#[from] serde_json::Error),
}
