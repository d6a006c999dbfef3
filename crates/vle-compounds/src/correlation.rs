//! Fourth-order polynomial temperature correlation.

use vle_core::REFERENCE_TEMPERATURE;

/// `f(T) = A + B·T + C·T² + D·T³ + E·T⁴`.
///
/// Both integrals are anchored at [`REFERENCE_TEMPERATURE`], so
/// `int_value(T)` is ∫ f dT from the reference state and
/// `int_value_over_t(T)` is ∫ f/T dT from the reference state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Correlation {
    coefficients: [f64; 5],
    int_const: f64,
    int_const_over_t: f64,
}

impl Correlation {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64) -> Self {
        Self::from_coefficients([a, b, c, d, e])
    }

    pub fn from_coefficients(coefficients: [f64; 5]) -> Self {
        let mut correlation = Self {
            coefficients,
            int_const: 0.0,
            int_const_over_t: 0.0,
        };
        correlation.int_const = -correlation.int_value(REFERENCE_TEMPERATURE);
        correlation.int_const_over_t = -correlation.int_value_over_t(REFERENCE_TEMPERATURE);
        correlation
    }

    /// Coefficients `[A, B, C, D, E]`.
    pub fn coefficients(&self) -> [f64; 5] {
        self.coefficients
    }

    pub fn value(&self, t: f64) -> f64 {
        let [a, b, c, d, e] = self.coefficients;
        a + t * (b + t * (c + t * (d + t * e)))
    }

    pub fn value_dt(&self, t: f64) -> f64 {
        let [_, b, c, d, e] = self.coefficients;
        b + t * (2.0 * c + t * (3.0 * d + t * 4.0 * e))
    }

    pub fn int_value(&self, t: f64) -> f64 {
        let [a, b, c, d, e] = self.coefficients;
        t * (a + t * (b / 2.0 + t * (c / 3.0 + t * (d / 4.0 + t * e / 5.0)))) + self.int_const
    }

    pub fn int_value_over_t(&self, t: f64) -> f64 {
        let [a, b, c, d, e] = self.coefficients;
        a * t.ln() + t * (b + t * (c / 2.0 + t * (d / 3.0 + t * e / 4.0))) + self.int_const_over_t
    }
}
