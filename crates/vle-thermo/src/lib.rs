//! vle-thermo: ideal vapor/liquid property package and flash engine.
//!
//! Provides:
//! - [`PropertyPackage`]: a loaded set of compounds with constant and
//!   temperature-dependent lookups
//! - Single-phase mixture properties and their T, P and composition
//!   derivatives (ideal gas vapor, ideal solution liquid)
//! - Two-phase properties (K-values, log K-values and derivatives)
//! - Flashes at TP, TVF, PVF, mass based TVF/PVF, PH and PS specifications
//! - Text input with units and parallel TP flash sweeps
//!
//! # Example
//!
//! ```no_run
//! use vle_compounds::{BuiltinProvider, CompoundDataProvider};
//! use vle_thermo::{AllowedPhases, FlashSpec, PropertyPackage};
//!
//! let names = ["benzene".to_string(), "toluene".to_string()];
//! let package = PropertyPackage::with_compounds(BuiltinProvider.load_compounds(&names)?)?;
//! let result = package.flash(
//!     &[0, 1],
//!     &[0.5, 0.5],
//!     FlashSpec::Tp { t: 370.0, p: 101_325.0 },
//!     AllowedPhases::VaporLiquid,
//! )?;
//! println!("vapor fraction {}", result.vapor_fraction());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod flash;
mod mixture;
pub mod package;
pub mod phase;
pub mod properties;
pub mod sweep_executor;
pub mod sweeps;
mod two_phase;
pub mod units;
mod validation;

pub use error::{ThermoError, ThermoResult};
pub use flash::{FlashResult, FlashSpec, PhaseResult};
pub use package::{PhaseConditions, PropertyPackage};
pub use phase::{AllowedPhases, FlashType, Phase};
pub use properties::{
    Derivative, Dimension, MixtureProperty, PropertyValue, SinglePhaseProperty, TwoPhaseProperty,
};
pub use sweep_executor::{SweepError, SweepResult, execute_tp_sweep};
pub use sweeps::{SweepDefinition, SweepDefinitionError, SweepSpacing};
pub use units::{Quantity, UnitError, parse_quantity};
