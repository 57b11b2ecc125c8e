use geo::{Coord, CoordsIter, LineString, MultiPolygon};
use serde::Serialize;
use serde_json::{Map, Value};

/// Geometry types accepted from boundary tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GeometryKind {
    Polygon,
    MultiPolygon,
}

impl GeometryKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
        }
    }

    /// Match a GeoJSON geometry type name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "polygon" => Some(GeometryKind::Polygon),
            "multipolygon" => Some(GeometryKind::MultiPolygon),
            _ => None,
        }
    }
}

/// One parsed boundary or claim polygon.
///
/// Coordinates are `(lng, lat)` pairs stored as `geo` `(x, y)`. A `Polygon`
/// feature holds exactly one polygon in `geometry`. Every ring is closed and
/// has at least four coordinate pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryFeature {
    pub id: String,
    pub kind: GeometryKind,
    pub geometry: MultiPolygon<f64>,
    pub properties: Map<String, Value>,
}

impl GeometryFeature {
    /// Every ring of every polygon, exterior first.
    pub fn rings(&self) -> impl Iterator<Item = &LineString<f64>> {
        self.geometry.0.iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
    }

    /// Every coordinate pair of every ring.
    pub fn coords(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.geometry.coords_iter()
    }
}
