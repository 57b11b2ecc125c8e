use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::region::AliasTable;
use crate::source::{builtin_regions, parse_regions, RegionEntry};
use crate::stats::ApproximateTable;

/// Where the atlas finds its tables and lookup assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Root directory of the on-disk row source.
    pub data_dir: PathBuf,
    /// Census table source id (e.g. "Census_AllStates.csv")
    pub census_source: String,
    /// Forest-cover table source id
    pub forest_source: String,
    /// Optional claim table source id
    pub claims_source: Option<String>,
    /// Region list overriding the built-in one
    pub regions_path: Option<PathBuf>,
    /// Alias table overriding the built-in one
    pub aliases_path: Option<PathBuf>,
    /// Approximate statistics overriding the built-in ones
    pub approximate_path: Option<PathBuf>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            census_source: "Census_AllStates.csv".to_string(),
            forest_source: "forest_data.csv".to_string(),
            claims_source: None,
            regions_path: None,
            aliases_path: None,
            approximate_path: None,
        }
    }
}

fn read_asset(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .with_context(|| format!("[config] Failed to read {}", path.display()))
}

impl AtlasConfig {
    /// Read a JSON config file; omitted fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = read_asset(path)?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("[config] Failed to parse {}", path.display()))
    }

    pub fn load_aliases(&self) -> Result<AliasTable> {
        match &self.aliases_path {
            Some(path) => AliasTable::from_json(&read_asset(path)?)
                .with_context(|| format!("[config] Invalid alias table {}", path.display())),
            None => AliasTable::builtin(),
        }
    }

    pub fn load_regions(&self) -> Result<Vec<RegionEntry>> {
        match &self.regions_path {
            Some(path) => parse_regions(&read_asset(path)?)
                .with_context(|| format!("[config] Invalid region list {}", path.display())),
            None => builtin_regions(),
        }
    }

    pub fn load_approximate(&self, aliases: &AliasTable) -> Result<ApproximateTable> {
        match &self.approximate_path {
            Some(path) => ApproximateTable::from_json(&read_asset(path)?, aliases)
                .with_context(|| format!("[config] Invalid approximate statistics {}", path.display())),
            None => ApproximateTable::builtin(aliases),
        }
    }
}
