use serde::Serialize;

use crate::region::RegionId;
use super::{bounds::Bounds, feature::GeometryFeature, loader::LoadReport};

/// Whether a region's boundary source could be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceStatus {
    /// Source was read; the collection may still be empty.
    Loaded,
    /// No source is registered for the region.
    NotRegistered,
    /// A source is registered but could not be found or read.
    Unavailable,
}

/// Per-region load diagnostics carried by a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionLoad {
    pub region: RegionId,
    pub status: SourceStatus,
    pub rows: usize,
    pub features: usize,
    pub skipped: usize,
}

/// Ordered features plus their derived bounding box.
/// Bounds are `None` exactly when there are no features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    features: Vec<GeometryFeature>,
    bounds: Option<Bounds>,
    loads: Vec<RegionLoad>,
}

impl FeatureCollection {
    /// Construct a collection from already-validated features.
    pub fn new(features: Vec<GeometryFeature>) -> Self {
        Self {
            bounds: Bounds::of_features(&features),
            features,
            loads: Vec::new(),
        }
    }

    /// Collection for one region's load.
    pub fn from_report(region: RegionId, report: LoadReport) -> Self {
        let load = RegionLoad {
            region,
            status: SourceStatus::Loaded,
            rows: report.rows,
            features: report.features.len(),
            skipped: report.skipped_count(),
        };
        Self { loads: vec![load], ..Self::new(report.features) }
    }

    /// Empty collection for a region whose source could not be read.
    pub fn unavailable(region: RegionId, status: SourceStatus) -> Self {
        let load = RegionLoad { region, status, rows: 0, features: 0, skipped: 0 };
        Self { features: Vec::new(), bounds: None, loads: vec![load] }
    }

    /// Concatenate collections in the given order.
    pub fn concat(parts: impl IntoIterator<Item = FeatureCollection>) -> Self {
        let mut out = Self::default();
        for part in parts {
            out.bounds = match (out.bounds, part.bounds) {
                (Some(a), Some(b)) => Some(a.union(&b)),
                (a, b) => a.or(b),
            };
            out.features.extend(part.features);
            out.loads.extend(part.loads);
        }
        out
    }

    #[inline] pub fn len(&self) -> usize { self.features.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.features.is_empty() }

    #[inline] pub fn features(&self) -> &[GeometryFeature] { &self.features }

    /// Map-fit bounds; `None` for an empty collection, which must not be fitted.
    #[inline] pub fn bounds(&self) -> Option<Bounds> { self.bounds }

    #[inline] pub fn loads(&self) -> &[RegionLoad] { &self.loads }

    /// Total rows dropped as malformed across all loaded regions.
    pub fn skipped_count(&self) -> usize {
        self.loads.iter().map(|load| load.skipped).sum()
    }

    /// Overall source status: `Loaded` if any region was read, otherwise the
    /// most specific failure. A collection built directly from features is `Loaded`.
    pub fn status(&self) -> SourceStatus {
        let statuses = || self.loads.iter().map(|load| load.status);
        if self.loads.is_empty() || statuses().any(|s| s == SourceStatus::Loaded) {
            SourceStatus::Loaded
        } else if statuses().any(|s| s == SourceStatus::Unavailable) {
            SourceStatus::Unavailable
        } else {
            SourceStatus::NotRegistered
        }
    }
}

#[cfg(test)]
mod tests {
    use geo::{LineString, MultiPolygon, Polygon};
    use serde_json::Map;

    use crate::geometry::GeometryKind;
    use crate::region::{AliasTable, RegionLevel};
    use super::*;

    fn square(id: &str, lng: (f64, f64), lat: (f64, f64)) -> GeometryFeature {
        let ring = LineString::from(vec![
            (lng.0, lat.0), (lng.1, lat.0), (lng.1, lat.1), (lng.0, lat.1), (lng.0, lat.0),
        ]);
        GeometryFeature {
            id: id.into(),
            kind: GeometryKind::Polygon,
            geometry: MultiPolygon(vec![Polygon::new(ring, vec![])]),
            properties: Map::new(),
        }
    }

    fn region(name: &str) -> RegionId {
        RegionId::resolve(RegionLevel::State, name, &AliasTable::default())
    }

    #[test]
    fn bounds_span_all_features() {
        let collection = FeatureCollection::new(vec![
            square("a", (78.0, 80.0), (20.0, 21.0)),
            square("b", (79.0, 82.0), (22.0, 24.0)),
        ]);
        let bounds = collection.bounds().unwrap();
        assert_eq!(bounds.south_west, (20.0, 78.0));
        assert_eq!(bounds.north_east, (24.0, 82.0));
    }

    #[test]
    fn empty_collection_has_no_bounds() {
        let collection = FeatureCollection::new(Vec::new());
        assert!(collection.is_empty());
        assert_eq!(collection.bounds(), None);
    }

    #[test]
    fn concat_keeps_order_and_merges_bounds() {
        let a = FeatureCollection::new(vec![square("a", (0.0, 1.0), (0.0, 1.0))]);
        let empty = FeatureCollection::unavailable(region("Bihar"), SourceStatus::Unavailable);
        let b = FeatureCollection::new(vec![square("b", (5.0, 6.0), (-2.0, -1.0))]);

        let all = FeatureCollection::concat([a, empty, b]);
        let ids: Vec<&str> = all.features().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        let bounds = all.bounds().unwrap();
        assert_eq!(bounds.south_west, (-2.0, 0.0));
        assert_eq!(bounds.north_east, (1.0, 6.0));
        assert_eq!(all.loads().len(), 1);
    }

    #[test]
    fn status_distinguishes_empty_from_unavailable() {
        let loaded_empty = FeatureCollection::from_report(region("Odisha"), LoadReport::default());
        assert_eq!(loaded_empty.status(), SourceStatus::Loaded);
        assert!(loaded_empty.is_empty());

        let missing = FeatureCollection::unavailable(region("Bihar"), SourceStatus::Unavailable);
        assert_eq!(missing.status(), SourceStatus::Unavailable);

        let unknown = FeatureCollection::unavailable(region("Goa"), SourceStatus::NotRegistered);
        assert_eq!(unknown.status(), SourceStatus::NotRegistered);

        let mixed = FeatureCollection::concat([missing, loaded_empty]);
        assert_eq!(mixed.status(), SourceStatus::Loaded);
    }
}
