//! Physical constants and the reference state for enthalpy and entropy.

use crate::numeric::Real;

/// Universal gas constant [J/(mol·K)].
pub const GAS_CONSTANT: Real = 8.314_472_15;

/// Reference temperature [K]; enthalpy and the T-dependent part of entropy are zero here.
pub const REFERENCE_TEMPERATURE: Real = 298.15;

/// Reference pressure [Pa] for the pressure contribution to entropy.
pub const REFERENCE_PRESSURE: Real = 101_325.0;
