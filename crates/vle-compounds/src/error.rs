//! Compound data errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for compound data operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors that can occur while loading or validating compound data.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Compound \"{name}\" not found")]
    NotFound { name: String },

    #[error("Compound name \"{found}\" does not match requested name \"{requested}\"")]
    NameMismatch { requested: String, found: String },

    #[error("Invalid data for compound \"{name}\": {what}")]
    Invalid { name: String, what: String },

    #[error("Failed to read compound \"{name}\": {what}")]
    Legacy { name: String, what: String },

    #[error("Compound \"{name}\" is listed more than once")]
    Duplicate { name: String },

    #[error("Property package definition lists no compounds")]
    EmptyPackage,
}
