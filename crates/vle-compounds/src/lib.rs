//! vle-compounds: pure-compound data for the ideal VLE engine.
//!
//! Provides:
//! - Temperature correlations (polynomial and Antoine vapor pressure)
//! - The immutable [`Compound`] record with constant and T-dependent lookups
//! - Compound and property package definition files (YAML and the legacy
//!   line-based format)
//! - Data providers: directory, in-memory and the builtin catalog

pub mod antoine;
pub mod builtin;
pub mod compound;
pub mod correlation;
pub mod data;
pub mod error;
pub mod identifiers;
pub mod package_definition;
pub mod provider;

pub use antoine::Antoine;
pub use builtin::BuiltinProvider;
pub use compound::Compound;
pub use correlation::Correlation;
pub use data::CompoundData;
pub use error::{DataError, DataResult};
pub use identifiers::{
    RealConstant, StringConstant, TemperatureDependentProperty, UnknownIdentifier,
};
pub use package_definition::PackageDefinition;
pub use provider::{CompoundDataProvider, DirectoryProvider, MemoryProvider};
