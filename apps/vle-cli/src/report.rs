//! Serializable views of calculation results, printed as text or JSON.

use serde::Serialize;
use std::fmt::Write as _;
use vle_thermo::{FlashResult, FlashType, PropertyValue, SinglePhaseProperty, SweepResult};

#[derive(Debug, Serialize)]
pub struct PhaseReport {
    pub phase: String,
    pub fraction: f64,
    /// Mole fractions in package order
    pub composition: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct FlashReport {
    pub temperature_k: f64,
    pub pressure_pa: f64,
    pub phases: Vec<PhaseReport>,
}

impl From<&FlashResult> for FlashReport {
    fn from(result: &FlashResult) -> Self {
        Self {
            temperature_k: result.temperature_k(),
            pressure_pa: result.pressure_pa(),
            phases: result
                .phases
                .iter()
                .map(|p| PhaseReport {
                    phase: p.phase.to_string(),
                    fraction: p.fraction,
                    composition: p.composition.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlashOutput {
    pub flash_type: String,
    pub compounds: Vec<String>,
    #[serde(flatten)]
    pub result: FlashReport,
}

impl FlashOutput {
    pub fn new(flash_type: FlashType, compounds: Vec<String>, result: &FlashResult) -> Self {
        Self {
            flash_type: flash_type.to_string(),
            compounds,
            result: result.into(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} flash", self.flash_type);
        let _ = writeln!(out, "  T = {:.4} K", self.result.temperature_k);
        let _ = writeln!(out, "  P = {:.2} Pa", self.result.pressure_pa);
        for phase in &self.result.phases {
            let _ = writeln!(out, "  {} (fraction {:.6})", phase.phase, phase.fraction);
            for (name, x) in self.compounds.iter().zip(&phase.composition) {
                let _ = writeln!(out, "    {:<16} {:.6}", name, x);
            }
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct PropertyReport {
    pub name: String,
    pub id: usize,
    /// Matrix dimensions (rows, columns); scalars are 1×1 and vectors n×1
    pub shape: (usize, usize),
    /// Values, column-major for matrices
    pub values: Vec<f64>,
}

impl PropertyReport {
    pub fn new(property: SinglePhaseProperty, value: &PropertyValue) -> Self {
        let shape = match value {
            PropertyValue::Scalar(_) => (1, 1),
            PropertyValue::Vector(v) => (v.len(), 1),
            PropertyValue::Matrix(m) => m.shape(),
        };
        Self {
            name: property.name(),
            id: property.id(),
            shape,
            values: value.to_vec(),
        }
    }

    pub fn to_text(&self) -> String {
        let values: Vec<String> = self.values.iter().map(|v| format!("{:.6e}", v)).collect();
        match self.shape {
            (1, 1) => format!("{:<32} {}", self.name, values.join("")),
            (_, 1) => format!("{:<32} [{}]", self.name, values.join(", ")),
            (rows, _) => {
                let mut out = self.name.clone();
                for r in 0..rows {
                    let row: Vec<&str> = values
                        .iter()
                        .skip(r)
                        .step_by(rows)
                        .map(String::as_str)
                        .collect();
                    out.push_str(&format!("\n  [{}]", row.join(", ")));
                }
                out
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SweepPointReport {
    pub value: f64,
    /// `None` where the flash failed
    pub result: Option<FlashReport>,
}

#[derive(Debug, Serialize)]
pub struct SweepOutput {
    pub quantity: String,
    pub fixed_value: f64,
    pub compounds: Vec<String>,
    pub num_successful: usize,
    pub num_failed: usize,
    pub points: Vec<SweepPointReport>,
}

impl SweepOutput {
    pub fn new(compounds: Vec<String>, result: &SweepResult) -> Self {
        Self {
            quantity: result.quantity.to_string(),
            fixed_value: result.fixed_value,
            compounds,
            num_successful: result.num_successful,
            num_failed: result.num_failed,
            points: result
                .independent_values
                .iter()
                .zip(&result.states)
                .map(|(&value, state)| SweepPointReport {
                    value,
                    result: state.as_ref().map(FlashReport::from),
                })
                .collect(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} sweep ({} converged, {} failed)",
            self.quantity, self.num_successful, self.num_failed
        );
        let _ = writeln!(out, "{:>14} {:>8} {:>12}", "value", "phases", "vapor frac");
        for point in &self.points {
            match &point.result {
                Some(result) => {
                    let vf = result
                        .phases
                        .iter()
                        .find(|p| p.phase == "vapor")
                        .map_or(0.0, |p| p.fraction);
                    let _ = writeln!(
                        out,
                        "{:>14.4} {:>8} {:>12.6}",
                        point.value,
                        result.phases.len(),
                        vf
                    );
                }
                None => {
                    let _ = writeln!(out, "{:>14.4} {:>8}", point.value, "failed");
                }
            }
        }
        out
    }
}
