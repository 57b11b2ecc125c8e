mod bounds;
mod collection;
mod feature;
mod loader;

pub use bounds::Bounds;
pub use collection::{FeatureCollection, RegionLoad, SourceStatus};
pub use feature::{GeometryFeature, GeometryKind};
pub use loader::{load_features, normalize_quotes, parse_row, LoadReport, RowOutcome, SkipReason, SkippedRow, MIN_RING_LEN};
