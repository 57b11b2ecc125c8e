use serde::{Deserialize, Serialize};

use crate::io::csv::Row;
use crate::region::{AliasTable, RegionId, RegionLevel};
use super::values::{cell, parse_measure};

/// Forest-cover figures for one region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForestCover {
    #[serde(default)]
    pub cover_sq_km: Option<f64>,
    #[serde(default)]
    pub cover_percent: Option<f64>,
    #[serde(default)]
    pub change_sq_km: Option<f64>,
}

/// One row of a state forest-cover table.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestRecord {
    pub state: String,
    pub cover: ForestCover,
}

impl ForestRecord {
    pub fn from_row(row: &Row) -> Option<Self> {
        Some(Self {
            state: cell(row, &["State", "state"])?.to_string(),
            cover: ForestCover {
                cover_sq_km: cell(row, &["Total_Forest_Cover"]).and_then(parse_measure),
                cover_percent: cell(row, &["Percentage_of_GA"]).and_then(parse_measure),
                change_sq_km: cell(row, &["Change_in_Forest_Cover"]).and_then(parse_measure),
            },
        })
    }
}

/// State-level forest-cover rows.
#[derive(Debug, Clone, Default)]
pub struct ForestTable {
    records: Vec<ForestRecord>,
}

impl ForestTable {
    pub fn from_rows(rows: &[Row]) -> Self {
        Self { records: rows.iter().filter_map(ForestRecord::from_row).collect() }
    }

    #[inline] pub fn len(&self) -> usize { self.records.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// First row for `region`. Forest tables are per state, so other levels never match.
    pub fn find(&self, region: &RegionId, aliases: &AliasTable) -> Option<&ForestRecord> {
        if region.level() != RegionLevel::State {
            return None;
        }
        self.records.iter()
            .find(|r| aliases.canonicalize(&r.state) == region.canonical())
    }
}
