mod registry;
mod row_source;

pub use registry::{builtin_regions, parse_regions, BoundaryRegistry, RegionEntry, SourceLookup, REGIONS_VERSION};
pub use row_source::{DiskSource, MemSource, RowSource};
