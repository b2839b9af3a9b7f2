use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of trip a statistics report is computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    Train,
    Tram,
    Metro,
    Bus,
    Car,
    Air,
    Helicopter,
    Ferry,
    Aerialway,
    Walk,
    Cycle,
}

impl TripType {
    pub const ALL: [TripType; 11] = [
        TripType::Train,
        TripType::Tram,
        TripType::Metro,
        TripType::Bus,
        TripType::Car,
        TripType::Air,
        TripType::Helicopter,
        TripType::Ferry,
        TripType::Aerialway,
        TripType::Walk,
        TripType::Cycle,
    ];

    /// Whether material codes of this trip type are aircraft type codes that
    /// can be resolved against the `airliners` reference table
    pub fn resolves_aircraft(&self) -> bool {
        matches!(self, TripType::Air | TripType::Helicopter)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::Train => "train",
            TripType::Tram => "tram",
            TripType::Metro => "metro",
            TripType::Bus => "bus",
            TripType::Car => "car",
            TripType::Air => "air",
            TripType::Helicopter => "helicopter",
            TripType::Ferry => "ferry",
            TripType::Aerialway => "aerialway",
            TripType::Walk => "walk",
            TripType::Cycle => "cycle",
        }
    }
}

impl FromStr for TripType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        TripType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow!("Invalid trip type: {}", s))
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
