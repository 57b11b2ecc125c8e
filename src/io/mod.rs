//! IO module for format-specific reading and writing operations.
//!
//! - `csv` - CSV row tables (boundaries, census, forest cover, claims)
//! - `geojson` - GeoJSON FeatureCollection export for map clients

pub(crate) mod csv;
pub(crate) mod geojson;
