//! Phases, allowed phase combinations and flash types.

use std::fmt;
use std::str::FromStr;
use vle_compounds::UnknownIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Vapor,
    Liquid,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Phase::Vapor, Phase::Liquid];

    pub fn key(self) -> &'static str {
        match self {
            Phase::Vapor => "vapor",
            Phase::Liquid => "liquid",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Phase {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vapor" | "vapour" | "v" | "gas" => Ok(Phase::Vapor),
            "liquid" | "l" => Ok(Phase::Liquid),
            _ => Err(UnknownIdentifier(s.to_string())),
        }
    }
}

/// Phases a flash may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AllowedPhases {
    #[default]
    VaporLiquid,
    VaporOnly,
    LiquidOnly,
}

impl AllowedPhases {
    pub const ALL: [AllowedPhases; 3] = [
        AllowedPhases::VaporLiquid,
        AllowedPhases::VaporOnly,
        AllowedPhases::LiquidOnly,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AllowedPhases::VaporLiquid => "vapor-liquid",
            AllowedPhases::VaporOnly => "vapor",
            AllowedPhases::LiquidOnly => "liquid",
        }
    }

    /// The single phase this combination is restricted to, if any.
    pub fn single_phase(self) -> Option<Phase> {
        match self {
            AllowedPhases::VaporLiquid => None,
            AllowedPhases::VaporOnly => Some(Phase::Vapor),
            AllowedPhases::LiquidOnly => Some(Phase::Liquid),
        }
    }
}

impl fmt::Display for AllowedPhases {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AllowedPhases {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vapor-liquid" | "vaporliquid" | "vl" | "both" => Ok(AllowedPhases::VaporLiquid),
            "vapor" | "vaporonly" | "v" => Ok(AllowedPhases::VaporOnly),
            "liquid" | "liquidonly" | "l" => Ok(AllowedPhases::LiquidOnly),
            _ => Err(UnknownIdentifier(s.to_string())),
        }
    }
}

/// Pair of specifications fixed by a flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlashType {
    /// Temperature [K], pressure [Pa]
    TP,
    /// Temperature [K], molar vapor fraction
    TVF,
    /// Pressure [Pa], molar vapor fraction
    PVF,
    /// Temperature [K], mass vapor fraction
    TVFm,
    /// Pressure [Pa], mass vapor fraction
    PVFm,
    /// Pressure [Pa], enthalpy [J/mol]
    PH,
    /// Pressure [Pa], entropy [J/(mol·K)]
    PS,
}

impl FlashType {
    pub const ALL: [FlashType; 7] = [
        FlashType::TP,
        FlashType::TVF,
        FlashType::PVF,
        FlashType::TVFm,
        FlashType::PVFm,
        FlashType::PH,
        FlashType::PS,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FlashType::TP => "TP",
            FlashType::TVF => "TVF",
            FlashType::PVF => "PVF",
            FlashType::TVFm => "TVFm",
            FlashType::PVFm => "PVFm",
            FlashType::PH => "PH",
            FlashType::PS => "PS",
        }
    }

    pub fn first_label(self) -> &'static str {
        match self {
            FlashType::TP | FlashType::TVF | FlashType::TVFm => "Temperature [K]",
            FlashType::PVF | FlashType::PVFm | FlashType::PH | FlashType::PS => "Pressure [Pa]",
        }
    }

    pub fn second_label(self) -> &'static str {
        match self {
            FlashType::TP => "Pressure [Pa]",
            FlashType::TVF | FlashType::PVF => "Vapor fraction [mol/mol]",
            FlashType::TVFm | FlashType::PVFm => "Vapor fraction [kg/kg]",
            FlashType::PH => "Enthalpy [J/mol]",
            FlashType::PS => "Entropy [J/(mol K)]",
        }
    }
}

impl fmt::Display for FlashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FlashType {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        match wanted.to_ascii_lowercase().as_str() {
            "tvf-mass" => return Ok(FlashType::TVFm),
            "pvf-mass" => return Ok(FlashType::PVFm),
            _ => {}
        }
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownIdentifier(s.to_string()))
    }
}
