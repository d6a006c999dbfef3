//! Parametric sweep definitions.
//!
//! A sweep varies temperature or pressure between two bounds given as text
//! with units; the other flash variable stays fixed.

use crate::units::{Quantity, UnitError, parse_quantity};
use std::fmt;
use vle_core::{Tolerances, nearly_equal};

/// Spacing of the points of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepSpacing {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Uniform spacing of the logarithm; needs positive bounds
    Logarithmic,
}

/// Error in a sweep definition.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepDefinitionError {
    /// A bound did not parse
    Bound { which: &'static str, source: UnitError },
    TooFewPoints(usize),
    IdenticalBounds,
    /// Logarithmic spacing with a bound that is not positive
    NonPositiveLogBound,
}

impl fmt::Display for SweepDefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bound { which, source } => write!(f, "{} value error: {}", which, source),
            Self::TooFewPoints(n) => write!(f, "Sweep must have at least 2 points (got {})", n),
            Self::IdenticalBounds => write!(f, "Start and end values must be different"),
            Self::NonPositiveLogBound => {
                write!(f, "Logarithmic sweeps need positive start and end values")
            }
        }
    }
}

impl std::error::Error for SweepDefinitionError {}

/// One swept quantity with its bounds in SI units.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub quantity: Quantity,
    pub start_si: f64,
    /// Text the start value was parsed from
    pub start_raw: String,
    pub end_si: f64,
    /// Text the end value was parsed from
    pub end_raw: String,
    pub num_points: usize,
    pub spacing: SweepSpacing,
}

impl SweepDefinition {
    /// Create a sweep from text bounds such as `"340 K"` and `"90 °C"`.
    pub fn from_text(
        start_raw: impl Into<String>,
        end_raw: impl Into<String>,
        quantity: Quantity,
        num_points: usize,
        spacing: SweepSpacing,
    ) -> Result<Self, SweepDefinitionError> {
        let start_raw = start_raw.into();
        let end_raw = end_raw.into();
        let start_si = parse_quantity(&start_raw, quantity)
            .map_err(|source| SweepDefinitionError::Bound { which: "Start", source })?;
        let end_si = parse_quantity(&end_raw, quantity)
            .map_err(|source| SweepDefinitionError::Bound { which: "End", source })?;

        let sweep = SweepDefinition {
            quantity,
            start_si,
            start_raw,
            end_si,
            end_raw,
            num_points,
            spacing,
        };
        sweep.validate()?;
        Ok(sweep)
    }

    /// Check point count and bounds.
    pub fn validate(&self) -> Result<(), SweepDefinitionError> {
        if self.num_points < 2 {
            return Err(SweepDefinitionError::TooFewPoints(self.num_points));
        }
        if nearly_equal(self.start_si, self.end_si, Tolerances::default()) {
            return Err(SweepDefinitionError::IdenticalBounds);
        }
        if self.spacing == SweepSpacing::Logarithmic && (self.start_si <= 0.0 || self.end_si <= 0.0)
        {
            return Err(SweepDefinitionError::NonPositiveLogBound);
        }
        Ok(())
    }

    /// All points of the sweep, ending exactly on the end value.
    pub fn generate_points(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start_si];
        }
        let last = (self.num_points - 1) as f64;
        let mut points: Vec<f64> = match self.spacing {
            SweepSpacing::Logarithmic if self.start_si > 0.0 && self.end_si > 0.0 => {
                let (lo, hi) = (self.start_si.ln(), self.end_si.ln());
                (0..self.num_points)
                    .map(|i| (lo + i as f64 * (hi - lo) / last).exp())
                    .collect()
            }
            _ => {
                let delta = (self.end_si - self.start_si) / last;
                (0..self.num_points)
                    .map(|i| self.start_si + i as f64 * delta)
                    .collect()
            }
        };
        points[self.num_points - 1] = self.end_si;
        points
    }
}

impl fmt::Display for SweepSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep {} from {} to {} ({} points, {})",
            self.quantity, self.start_raw, self.end_raw, self.num_points, self.spacing
        )
    }
}
