use std::sync::Arc;

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::AtlasConfig;
use crate::geometry::{load_features, Bounds, FeatureCollection, SourceStatus};
use crate::io::csv::Row;
use crate::region::{AliasTable, RegionId, RegionLevel, Resolution};
use crate::source::{BoundaryRegistry, DiskSource, RowSource, SourceLookup};
use crate::stats::{
    ApproximateTable, CensusRecord, CensusTable, ClaimTable, ForestTable, RegionStatistics,
    StatisticsAggregator,
};

/// Country-wide view used when a region has neither bounds nor a default center.
pub const OVERVIEW_CENTER: (f64, f64) = (23.5, 85.0);
pub const OVERVIEW_ZOOM: u8 = 5;
const DEFAULT_REGION_ZOOM: u8 = 7;

/// How a map should frame a selected region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum MapView {
    /// Fit the map to the region's features.
    Fit(Bounds),
    /// No features; center on the region's registered default.
    Center { center: (f64, f64), zoom: u8 },
    /// Region unknown to the registry.
    Overview,
}

impl MapView {
    /// Center and zoom for views that are not fitted to bounds.
    pub fn center_zoom(&self) -> Option<((f64, f64), u8)> {
        match *self {
            MapView::Fit(_) => None,
            MapView::Center { center, zoom } => Some((center, zoom)),
            MapView::Overview => Some((OVERVIEW_CENTER, OVERVIEW_ZOOM)),
        }
    }
}

/// Everything that follows from selecting a region, computed independently.
#[derive(Debug, Clone)]
pub struct Selection {
    pub region: RegionId,
    pub features: FeatureCollection,
    pub statistics: RegionStatistics,
    pub view: MapView,
}

/// The ingestion pipeline: registry, loader, and statistics over one row source.
pub struct Atlas {
    config: AtlasConfig,
    aliases: AliasTable,
    registry: BoundaryRegistry,
    approximate: ApproximateTable,
    source: Arc<dyn RowSource>,
}

impl Atlas {
    /// Open an atlas over CSV files in `config.data_dir`.
    pub fn open(config: &AtlasConfig) -> Result<Self> {
        let source = Arc::new(DiskSource::new(&config.data_dir));
        Self::with_source(config.clone(), source)
    }

    /// Open an atlas over an arbitrary row source.
    pub fn with_source(config: AtlasConfig, source: Arc<dyn RowSource>) -> Result<Self> {
        let mut aliases = config.load_aliases()?;
        let regions = config.load_regions()?;

        // Registered names are canonical unless the alias table already maps them.
        for entry in &regions {
            if aliases.resolve(&entry.name).1 == Resolution::Unresolved {
                aliases.insert_canonical(&entry.name);
            }
        }

        let registry = BoundaryRegistry::new(regions, &aliases, source.clone())?;
        let approximate = config.load_approximate(&aliases)?;

        tracing::info!(regions = registry.len(), "atlas opened");
        Ok(Self { config, aliases, registry, approximate, source })
    }

    #[inline] pub fn config(&self) -> &AtlasConfig { &self.config }

    #[inline] pub fn aliases(&self) -> &AliasTable { &self.aliases }

    #[inline] pub fn registry(&self) -> &BoundaryRegistry { &self.registry }

    /// Region identifier for a user-supplied name. Registered regions keep
    /// the registry's spelling, so every alias yields the same identifier.
    pub fn region(&self, level: RegionLevel, name: &str) -> RegionId {
        self.registered(&RegionId::resolve(level, name, &self.aliases))
    }

    fn registered(&self, region: &RegionId) -> RegionId {
        self.registry.registered_id(region).unwrap_or(region).clone()
    }

    /// Features of one region. Never fails: a missing source yields an empty
    /// collection whose status says why, and malformed rows are counted as skipped.
    pub fn load_region_features(&self, region: &RegionId) -> FeatureCollection {
        let region = self.registered(region);
        match self.registry.lookup(&region) {
            SourceLookup::NotRegistered => FeatureCollection::unavailable(region, SourceStatus::NotRegistered),
            SourceLookup::Unavailable { .. } => FeatureCollection::unavailable(region, SourceStatus::Unavailable),
            SourceLookup::Available { source_id, rows } => {
                let report = load_features(&region, &rows);
                tracing::info!(
                    region = %region,
                    source = %source_id,
                    features = report.features.len(),
                    skipped = report.skipped_count(),
                    "loaded region features"
                );
                FeatureCollection::from_report(region, report)
            }
        }
    }

    /// Features of every supported region, concatenated in region-identifier order.
    pub fn load_all_features(&self) -> FeatureCollection {
        let regions: Vec<&RegionId> = self.registry.supported().collect();
        let parts: Vec<FeatureCollection> = regions.par_iter()
            .map(|region| self.load_region_features(region))
            .collect();
        FeatureCollection::concat(parts)
    }

    /// Merged statistics for `region`, read fresh from the configured tables.
    /// Missing tables degrade the record instead of failing.
    pub fn region_statistics(&self, region: &RegionId) -> RegionStatistics {
        let region = self.registered(region);
        let census = CensusTable::from_rows(&self.read_table(&self.config.census_source));
        let forest = ForestTable::from_rows(&self.read_table(&self.config.forest_source));
        let claims = self.config.claims_source.as_deref()
            .map(|source_id| ClaimTable::from_rows(&self.read_table(source_id)));

        let mut aggregator = StatisticsAggregator::new(&self.aliases, &census, &forest, &self.approximate);
        if let Some(claims) = &claims {
            aggregator = aggregator.with_claims(claims);
        }
        aggregator.aggregate(&region)
    }

    /// Census row for a district code such as "7" or "007".
    pub fn district_by_code(&self, code: &str) -> Option<CensusRecord> {
        CensusTable::from_rows(&self.read_table(&self.config.census_source))
            .find_district(code)
            .cloned()
    }

    /// Map framing for `region` given its loaded features.
    pub fn view_for(&self, region: &RegionId, features: &FeatureCollection) -> MapView {
        if let Some(bounds) = features.bounds() {
            return MapView::Fit(bounds);
        }
        match self.registry.entry(region).and_then(|entry| Some((entry.center?, entry.zoom))) {
            Some((center, zoom)) => MapView::Center { center, zoom: zoom.unwrap_or(DEFAULT_REGION_ZOOM) },
            None => MapView::Overview,
        }
    }

    /// Select a region: load its features, aggregate its statistics, and frame the map.
    pub fn select(&self, region: &RegionId) -> Selection {
        let region = self.registered(region);
        let features = self.load_region_features(&region);
        let statistics = self.region_statistics(&region);
        let view = self.view_for(&region, &features);
        Selection { region, features, statistics, view }
    }

    /// Rows of a statistics table; an absent or unreadable table reads as empty.
    fn read_table(&self, source_id: &str) -> Vec<Row> {
        match self.source.read_rows(source_id) {
            Ok(Some(rows)) => rows,
            Ok(None) => {
                tracing::warn!(source = %source_id, "statistics table not found");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(source = %source_id, error = %format!("{e:#}"), "statistics table unreadable");
                Vec::new()
            }
        }
    }
}
