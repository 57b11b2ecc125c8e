use geo::Coord;
use serde::Serialize;

use super::feature::GeometryFeature;

/// Map-fit bounding box. Corners are `(lat, lng)`, the order map clients
/// expect for `fitBounds`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub south_west: (f64, f64),
    pub north_east: (f64, f64),
}

impl Bounds {
    /// Min/max over `(lng, lat)` coordinates; `None` for an empty input.
    pub fn from_coords(coords: impl IntoIterator<Item = Coord<f64>>) -> Option<Self> {
        coords.into_iter().fold(None, |bounds: Option<Bounds>, c| {
            let point = Bounds { south_west: (c.y, c.x), north_east: (c.y, c.x) };
            Some(match bounds {
                Some(bounds) => bounds.union(&point),
                None => point,
            })
        })
    }

    /// Bounds over every coordinate of every ring of every feature.
    pub fn of_features<'a>(features: impl IntoIterator<Item = &'a GeometryFeature>) -> Option<Self> {
        Self::from_coords(features.into_iter().flat_map(|feature| feature.coords()))
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            south_west: (
                self.south_west.0.min(other.south_west.0),
                self.south_west.1.min(other.south_west.1),
            ),
            north_east: (
                self.north_east.0.max(other.north_east.0),
                self.north_east.1.max(other.north_east.1),
            ),
        }
    }

    /// Center as `(lat, lng)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.south_west.0 + self.north_east.0) / 2.0,
            (self.south_west.1 + self.north_east.1) / 2.0,
        )
    }

    /// GeoJSON `bbox` order: `[min_lng, min_lat, max_lng, max_lat]`.
    pub fn to_bbox(&self) -> [f64; 4] {
        [self.south_west.1, self.south_west.0, self.north_east.1, self.north_east.0]
    }
}
