//! Flash results in the caller's compound order.

use crate::phase::Phase;
use vle_core::{Pressure, Temperature, as_k, as_pa};

/// One phase of a flash result.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseResult {
    pub phase: Phase,
    /// Molar phase fraction
    pub fraction: f64,
    /// Mole fractions, one per requested compound (zero for compounds absent from the feed)
    pub composition: Vec<f64>,
}

/// Equilibrium temperature, pressure and the phases present, vapor first.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashResult {
    pub temperature: Temperature,
    pub pressure: Pressure,
    pub phases: Vec<PhaseResult>,
}

impl FlashResult {
    pub fn temperature_k(&self) -> f64 {
        as_k(self.temperature)
    }

    pub fn pressure_pa(&self) -> f64 {
        as_pa(self.pressure)
    }

    pub fn phase(&self, phase: Phase) -> Option<&PhaseResult> {
        self.phases.iter().find(|p| p.phase == phase)
    }

    pub fn vapor(&self) -> Option<&PhaseResult> {
        self.phase(Phase::Vapor)
    }

    pub fn liquid(&self) -> Option<&PhaseResult> {
        self.phase(Phase::Liquid)
    }

    /// Molar vapor fraction; zero when no vapor is reported.
    pub fn vapor_fraction(&self) -> f64 {
        self.vapor().map_or(0.0, |p| p.fraction)
    }

    pub fn is_two_phase(&self) -> bool {
        self.phases.len() == 2
    }
}
