mod level;
mod normalize;
mod region_id;

pub use level::RegionLevel;
pub use normalize::{normalize_name, AliasTable, Resolution};
pub use region_id::RegionId;
