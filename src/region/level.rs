use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Administrative level of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionLevel {
    State,      // Highest-level entity
    District,   // District -> State
    Village,    // Village -> District
}

impl RegionLevel {
    pub const ALL: [RegionLevel; 3] = [
        RegionLevel::State,
        RegionLevel::District,
        RegionLevel::Village,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            RegionLevel::State => "state",
            RegionLevel::District => "district",
            RegionLevel::Village => "village",
        }
    }
}

impl std::fmt::Display for RegionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for RegionLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "state" => Ok(RegionLevel::State),
            "district" => Ok(RegionLevel::District),
            "village" => Ok(RegionLevel::Village),
            _ => Err(anyhow!("Unknown region level: {}. Expected 'state', 'district' or 'village'", s)),
        }
    }
}
