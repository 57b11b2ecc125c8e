use geo::{MultiPolygon, Polygon};
use serde_json::{json, Value};

use crate::geometry::{FeatureCollection, GeometryFeature, GeometryKind};

impl FeatureCollection {
    /// Export as a GeoJSON FeatureCollection.
    /// Adds a `bbox` member when the collection has bounds.
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self.features().iter().map(GeometryFeature::to_geojson).collect();

        let mut collection = json!({
            "type": "FeatureCollection",
            "features": features,
        });
        if let Some(bounds) = self.bounds() {
            collection["bbox"] = json!(bounds.to_bbox());
        }
        collection
    }
}

impl GeometryFeature {
    /// Export as a GeoJSON Feature.
    pub fn to_geojson(&self) -> Value {
        json!({
            "type": "Feature",
            "id": self.id, // Feature ID for efficient client-side updates
            "geometry": geometry_to_geojson(self.kind, &self.geometry),
            "properties": self.properties,
        })
    }
}

/// Helper to convert a geometry to a serde_json::Value representing GeoJSON Geometry.
fn geometry_to_geojson(kind: GeometryKind, mp: &MultiPolygon<f64>) -> Value {
    let coordinates = match kind {
        GeometryKind::Polygon => mp.0.first().map(polygon_coords).unwrap_or_else(|| json!([])),
        GeometryKind::MultiPolygon => Value::Array(mp.0.iter().map(polygon_coords).collect()),
    };
    json!({
        "type": kind.to_str(),
        "coordinates": coordinates,
    })
}

/// `[exterior, hole, ...]` with `[lng, lat]` pairs.
fn polygon_coords(polygon: &Polygon<f64>) -> Value {
    let rings = std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| ring.coords().map(|c| vec![c.x, c.y]).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    json!(rings)
}
