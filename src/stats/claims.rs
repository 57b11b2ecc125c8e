use serde::Serialize;

use crate::io::csv::Row;
use crate::region::{AliasTable, RegionId, RegionLevel};
use super::values::cell;

/// Claim counts for one region, by review status.
/// Statuses other than approved/pending/rejected count toward `total` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClaimTally {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
    pub rejected: u64,
}

#[derive(Debug, Clone, PartialEq)]
struct ClaimRecord {
    state: Option<String>,
    district: Option<String>,
    village: Option<String>,
    status: String,
}

/// Claim rows (one per submitted claim).
#[derive(Debug, Clone, Default)]
pub struct ClaimTable {
    records: Vec<ClaimRecord>,
}

impl ClaimTable {
    pub fn from_rows(rows: &[Row]) -> Self {
        let records = rows.iter()
            .map(|row| ClaimRecord {
                state: cell(row, &["state", "State"]).map(str::to_string),
                district: cell(row, &["district", "District"]).map(str::to_string),
                village: cell(row, &["village", "Village"]).map(str::to_string),
                status: cell(row, &["status", "Status"]).unwrap_or_default().to_lowercase(),
            })
            .collect();
        Self { records }
    }

    #[inline] pub fn len(&self) -> usize { self.records.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Tally the claims whose region column for `region`'s level matches it.
    pub fn tally(&self, region: &RegionId, aliases: &AliasTable) -> ClaimTally {
        let column = |record: &ClaimRecord| match region.level() {
            RegionLevel::State => record.state.clone(),
            RegionLevel::District => record.district.clone(),
            RegionLevel::Village => record.village.clone(),
        };

        self.records.iter()
            .filter(|record| column(record).is_some_and(|name| aliases.canonicalize(&name) == region.canonical()))
            .fold(ClaimTally::default(), |mut tally, record| {
                tally.total += 1;
                match record.status.as_str() {
                    "approved" => tally.approved += 1,
                    "pending" => tally.pending += 1,
                    "rejected" => tally.rejected += 1,
                    _ => {}
                }
                tally
            })
    }
}
