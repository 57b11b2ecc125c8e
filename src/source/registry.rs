use std::{collections::BTreeMap, sync::Arc};

use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::io::csv::Row;
use crate::region::{AliasTable, RegionId, RegionLevel};
use super::row_source::RowSource;

/// Built-in region list shipped with the crate.
const BUILTIN_REGIONS: &str = include_str!("../../assets/regions.json");

/// One supported region and where its boundary rows live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub level: RegionLevel,
    pub name: String,
    /// Row-source id of the boundary table, e.g. "Odisha.csv".
    pub source: String,
    /// Default map center `(lat, lng)` when no bounds can be computed.
    #[serde(default)]
    pub center: Option<(f64, f64)>,
    #[serde(default)]
    pub zoom: Option<u8>,
}

#[derive(Deserialize)]
struct RegionsFile {
    version: u32,
    regions: Vec<RegionEntry>,
}

pub const REGIONS_VERSION: u32 = 1;

/// Parse a region list asset.
pub fn parse_regions(bytes: &[u8]) -> Result<Vec<RegionEntry>> {
    let file: RegionsFile = serde_json::from_slice(bytes)
        .context("[source::registry] Failed to parse region list")?;
    ensure!(
        file.version == REGIONS_VERSION,
        "[source::registry] Unsupported region list version {} (expected {})",
        file.version, REGIONS_VERSION
    );
    Ok(file.regions)
}

/// The region list embedded in the crate.
pub fn builtin_regions() -> Result<Vec<RegionEntry>> {
    parse_regions(BUILTIN_REGIONS.as_bytes())
}

/// Outcome of resolving a region to its rows.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceLookup {
    /// No source is registered for the region.
    NotRegistered,
    /// A source is registered but missing or unreadable.
    Unavailable { source_id: String, reason: String },
    Available { source_id: String, rows: Vec<Row> },
}

/// Maps supported regions to their boundary row sources.
pub struct BoundaryRegistry {
    entries: BTreeMap<RegionId, RegionEntry>,
    source: Arc<dyn RowSource>,
}

impl BoundaryRegistry {
    /// Build a registry; region names are keyed through `aliases`.
    /// Two entries resolving to the same region are rejected.
    pub fn new(entries: Vec<RegionEntry>, aliases: &AliasTable, source: Arc<dyn RowSource>) -> Result<Self> {
        let mut map: BTreeMap<RegionId, RegionEntry> = BTreeMap::new();
        for entry in entries {
            let id = RegionId::resolve(entry.level, &entry.name, aliases);
            if let Some(previous) = map.get(&id) {
                bail!(
                    "[source::registry] Regions {:?} and {:?} both resolve to {}",
                    previous.name, entry.name, id
                );
            }
            map.insert(id, entry);
        }
        Ok(Self { entries: map, source })
    }

    /// Supported regions in stable identifier order.
    pub fn supported(&self) -> impl Iterator<Item = &RegionId> {
        self.entries.keys()
    }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn entry(&self, region: &RegionId) -> Option<&RegionEntry> {
        self.entries.get(region)
    }

    /// Registered identifier for `region`, carrying the registry's own spelling.
    pub fn registered_id(&self, region: &RegionId) -> Option<&RegionId> {
        self.entries.get_key_value(region).map(|(id, _)| id)
    }

    /// Whether the region is registered and its source currently exists.
    pub fn is_available(&self, region: &RegionId) -> bool {
        self.entry(region)
            .is_some_and(|entry| self.source.has(&entry.source))
    }

    /// Read the region's boundary rows. Never fails; problems are reported
    /// as `NotRegistered` or `Unavailable`.
    pub fn lookup(&self, region: &RegionId) -> SourceLookup {
        let Some(entry) = self.entry(region) else {
            tracing::warn!(region = %region, "no boundary source registered");
            return SourceLookup::NotRegistered;
        };

        let source_id = entry.source.clone();
        match self.source.read_rows(&source_id) {
            Ok(Some(rows)) => SourceLookup::Available { source_id, rows },
            Ok(None) => {
                tracing::warn!(region = %region, source = %source_id, "boundary source not found");
                SourceLookup::Unavailable { source_id, reason: "source not found".into() }
            }
            Err(e) => {
                tracing::warn!(region = %region, source = %source_id, error = %format!("{e:#}"), "boundary source unreadable");
                SourceLookup::Unavailable { source_id, reason: format!("{e:#}") }
            }
        }
    }
}
