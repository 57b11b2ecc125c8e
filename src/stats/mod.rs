//! Per-region statistics merged from census, forest-cover and claim tables.

mod aggregate;
mod census;
mod claims;
mod fallback;
mod forest;
mod values;

pub use aggregate::{
    RegionStatistics, StatisticsAggregator,
    NOTE_APPROX_CENSUS, NOTE_APPROX_FOREST, NOTE_CENSUS_OVERFLOW, NOTE_NO_CENSUS, NOTE_NO_DATA,
    NOTE_NO_FOREST,
};
pub use census::{CensusRecord, CensusTable};
pub use claims::{ClaimTable, ClaimTally};
pub use fallback::{ApproxCensus, ApproximateTable, Provenance, Resolved, APPROXIMATE_VERSION};
pub use forest::{ForestCover, ForestRecord, ForestTable};
