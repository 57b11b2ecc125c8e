use serde::Serialize;

use crate::io::csv::Row;
use crate::region::{AliasTable, RegionId, RegionLevel};
use super::values::{cell, parse_count, parse_measure};

/// One row of a census table (usually one district).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CensusRecord {
    pub state: String,
    pub district_code: Option<String>,
    pub name: Option<String>,
    /// Optional explicit aggregation level of the row.
    pub level: Option<RegionLevel>,
    pub households: Option<u64>,
    pub population_total: Option<u64>,
    pub population_male: Option<u64>,
    pub population_female: Option<u64>,
    pub area_sq_km: Option<f64>,
    pub density_per_sq_km: Option<f64>,
}

impl CensusRecord {
    /// Parse a census row; rows without a state name are ignored.
    pub fn from_row(row: &Row) -> Option<Self> {
        Some(Self {
            state: cell(row, &["State", "state"])?.to_string(),
            district_code: cell(row, &["District_Code", "district_code"]).map(str::to_string),
            name: cell(row, &["Name", "District", "name"]).map(str::to_string),
            level: cell(row, &["Level", "level"]).and_then(|s| s.parse().ok()),
            households: cell(row, &["Households"]).and_then(parse_count),
            population_total: cell(row, &["Population_Persons", "Population"]).and_then(parse_count),
            population_male: cell(row, &["Population_Males"]).and_then(parse_count),
            population_female: cell(row, &["Population_Females"]).and_then(parse_count),
            area_sq_km: cell(row, &["Area_sq_km", "Area"]).and_then(parse_measure),
            density_per_sq_km: cell(row, &["Population_density"]).and_then(parse_measure),
        })
    }
}

/// Census rows, matched to regions by canonical key.
#[derive(Debug, Clone, Default)]
pub struct CensusTable {
    records: Vec<CensusRecord>,
}

impl CensusTable {
    pub fn from_rows(rows: &[Row]) -> Self {
        Self { records: rows.iter().filter_map(CensusRecord::from_row).collect() }
    }

    #[inline] pub fn len(&self) -> usize { self.records.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.records.is_empty() }

    #[inline] pub fn records(&self) -> &[CensusRecord] { &self.records }

    /// Rows describing `region`.
    ///
    /// States match on the `State` column and sum their district rows; a row
    /// tagged `Level=state` is dropped when district-tagged rows also match, so
    /// a state total is never added to its own districts. Districts match on
    /// the `Name` column. Census tables carry no village rows.
    pub fn matching(&self, region: &RegionId, aliases: &AliasTable) -> Vec<&CensusRecord> {
        let key = region.canonical();
        match region.level() {
            RegionLevel::State => {
                let mut matched: Vec<&CensusRecord> = self.records.iter()
                    .filter(|r| aliases.canonicalize(&r.state) == key)
                    .collect();
                if matched.iter().any(|r| r.level == Some(RegionLevel::District)) {
                    matched.retain(|r| r.level != Some(RegionLevel::State));
                }
                matched
            }
            RegionLevel::District => self.records.iter()
                .filter(|r| r.level != Some(RegionLevel::State))
                .filter(|r| r.name.as_deref().is_some_and(|name| aliases.canonicalize(name) == key))
                .collect(),
            RegionLevel::Village => Vec::new(),
        }
    }

    /// Row for a district code. Codes compare zero-padded to three digits,
    /// so "7" finds "007".
    pub fn find_district(&self, code: &str) -> Option<&CensusRecord> {
        let code = pad_code(code);
        self.records.iter()
            .find(|r| r.district_code.as_deref().is_some_and(|c| pad_code(c) == code))
    }
}

fn pad_code(code: &str) -> String {
    format!("{:0>3}", code.trim())
}
