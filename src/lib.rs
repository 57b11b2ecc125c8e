#![doc = "fra-atlas public API"]
mod atlas;
mod config;
mod geometry;
mod io;
mod region;
mod source;
mod stats;

#[doc(inline)]
pub use atlas::{Atlas, MapView, Selection, OVERVIEW_CENTER, OVERVIEW_ZOOM};

#[doc(inline)]
pub use config::AtlasConfig;

#[doc(inline)]
pub use geometry::{
    load_features, normalize_quotes, parse_row, Bounds, FeatureCollection, GeometryFeature,
    GeometryKind, LoadReport, RegionLoad, RowOutcome, SkipReason, SkippedRow, SourceStatus,
    MIN_RING_LEN,
};

#[doc(inline)]
pub use io::csv::Row;

#[doc(inline)]
pub use region::{normalize_name, AliasTable, RegionId, RegionLevel, Resolution};

#[doc(inline)]
pub use source::{
    builtin_regions, parse_regions, BoundaryRegistry, DiskSource, MemSource, RegionEntry,
    RowSource, SourceLookup, REGIONS_VERSION,
};

#[doc(inline)]
pub use stats::{
    ApproxCensus, ApproximateTable, CensusRecord, CensusTable, ClaimTable, ClaimTally,
    ForestCover, ForestRecord, ForestTable, Provenance, RegionStatistics, Resolved,
    StatisticsAggregator, APPROXIMATE_VERSION, NOTE_APPROX_CENSUS, NOTE_APPROX_FOREST, NOTE_CENSUS_OVERFLOW,
    NOTE_NO_CENSUS, NOTE_NO_DATA, NOTE_NO_FOREST,
};
