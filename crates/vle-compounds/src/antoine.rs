//! Antoine vapor pressure correlation.

use std::f64::consts::LN_10;

/// `Psat(T) = 10^(A − B/(C + T))`, T in K and Psat in Pa.
///
/// No validity range is enforced; the correlation has a pole at `T = −C`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Antoine {
    a: f64,
    b: f64,
    c: f64,
}

impl Antoine {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn from_coefficients([a, b, c]: [f64; 3]) -> Self {
        Self::new(a, b, c)
    }

    pub fn coefficients(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// Temperature at which the correlation diverges.
    pub fn pole_temperature(&self) -> f64 {
        -self.c
    }

    pub fn value(&self, t: f64) -> f64 {
        10f64.powf(self.a - self.b / (self.c + t))
    }

    pub fn value_dt(&self, t: f64) -> f64 {
        let denom = self.c + t;
        self.value(t) * self.b * LN_10 / (denom * denom)
    }
}
