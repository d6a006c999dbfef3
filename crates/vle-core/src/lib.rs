//! vle-core: shared foundation for the ideal VLE engine.
//!
//! Contains:
//! - constants (gas constant, reference state)
//! - numeric (Real + tolerances + float helpers)
//! - units (uom SI types + constructors)

pub mod constants;
pub mod numeric;
pub mod units;

pub use constants::*;
pub use numeric::*;
pub use units::*;
