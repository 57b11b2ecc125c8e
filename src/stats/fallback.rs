use std::collections::BTreeMap;

use ahash::AHashMap;
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::region::{AliasTable, RegionId, RegionLevel};
use super::forest::ForestCover;

const BUILTIN_APPROXIMATE: &str = include_str!("../../assets/approximate.json");

pub const APPROXIMATE_VERSION: u32 = 1;

/// Where a group of statistics came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Matched rows from the primary table.
    Matched,
    /// Taken from the approximate table.
    Approximate,
    /// Neither source had data.
    Missing,
}

/// Result of walking the ordered chain primary -> fallback -> missing.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    Primary(T),
    Fallback(T),
    Missing,
}

impl<T> Resolved<T> {
    /// Use `primary` when present, otherwise evaluate `fallback`.
    pub fn chain(primary: Option<T>, fallback: impl FnOnce() -> Option<T>) -> Self {
        match primary {
            Some(value) => Resolved::Primary(value),
            None => fallback().map_or(Resolved::Missing, Resolved::Fallback),
        }
    }

    pub fn provenance(&self) -> Provenance {
        match self {
            Resolved::Primary(_) => Provenance::Matched,
            Resolved::Fallback(_) => Provenance::Approximate,
            Resolved::Missing => Provenance::Missing,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Resolved::Primary(value) | Resolved::Fallback(value) => Some(value),
            Resolved::Missing => None,
        }
    }
}

/// Approximate census totals for a state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ApproxCensus {
    #[serde(default)]
    pub districts: Option<u64>,
    #[serde(default)]
    pub households: Option<u64>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub area_sq_km: Option<f64>,
}

#[derive(Deserialize)]
struct ApproximateFile {
    version: u32,
    #[serde(default)]
    census: BTreeMap<String, ApproxCensus>,
    #[serde(default)]
    forest: BTreeMap<String, ForestCover>,
}

/// State-level approximate statistics, keyed by canonical name.
#[derive(Debug, Clone, Default)]
pub struct ApproximateTable {
    census: AHashMap<String, ApproxCensus>,
    forest: AHashMap<String, ForestCover>,
}

impl ApproximateTable {
    /// Parse an approximate-statistics asset; keys are canonicalized through `aliases`.
    pub fn from_json(bytes: &[u8], aliases: &AliasTable) -> Result<Self> {
        let file: ApproximateFile = serde_json::from_slice(bytes)
            .context("[stats::fallback] Failed to parse approximate statistics")?;
        ensure!(
            file.version == APPROXIMATE_VERSION,
            "[stats::fallback] Unsupported approximate statistics version {} (expected {})",
            file.version, APPROXIMATE_VERSION
        );

        Ok(Self {
            census: file.census.into_iter().map(|(k, v)| (aliases.canonicalize(&k), v)).collect(),
            forest: file.forest.into_iter().map(|(k, v)| (aliases.canonicalize(&k), v)).collect(),
        })
    }

    /// The table embedded in the crate.
    pub fn builtin(aliases: &AliasTable) -> Result<Self> {
        Self::from_json(BUILTIN_APPROXIMATE.as_bytes(), aliases)
    }

    /// Approximate census figures; only states have entries.
    pub fn census(&self, region: &RegionId) -> Option<&ApproxCensus> {
        if region.level() != RegionLevel::State { return None }
        self.census.get(region.canonical())
    }

    pub fn forest(&self, region: &RegionId) -> Option<&ForestCover> {
        if region.level() != RegionLevel::State { return None }
        self.forest.get(region.canonical())
    }
}
