//! Tolerant parsing of boundary table rows into geometry features.
//!
//! Rows come from independently authored CSV exports. The geometry payload
//! sits in a `shapes` or `coordinates` column as JSON-like text, often with
//! single quotes and sometimes with `coordinates` encoded a second time as a
//! string. Each row is parsed on its own; a bad row is skipped and reported,
//! never fatal for the table.

use std::borrow::Cow;

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{Map, Value};

use crate::io::csv::Row;
use crate::region::RegionId;
use super::feature::{GeometryFeature, GeometryKind};

/// Columns that hold the geometry payload, in lookup order.
const PAYLOAD_COLUMNS: [&str; 2] = ["shapes", "coordinates"];

/// Columns that may hold a row identifier, in lookup order.
const ID_COLUMNS: [&str; 2] = ["id", "vill_2011_id"];

/// Columns that may classify the geometry of a bare coordinate array.
const KIND_COLUMNS: [&str; 2] = ["type", "shape"];

/// Minimum coordinate pairs in a closed ring.
pub const MIN_RING_LEN: usize = 4;

/// Why a row was dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("row has no geometry payload (expected a `shapes` or `coordinates` column)")]
    MissingPayload,
    #[error("geometry payload is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("geometry payload is not an object or coordinate array")]
    NotAGeometry,
    #[error("geometry object lacks a `type` field")]
    MissingType,
    #[error("geometry object lacks a `coordinates` field")]
    MissingCoordinates,
    #[error("unsupported geometry type `{0}`")]
    UnsupportedType(String),
    #[error("invalid coordinate pair: {0}")]
    InvalidCoordinate(String),
    #[error("geometry has no rings")]
    Empty,
    #[error("ring {ring} has {len} coordinate pairs (need at least 4)")]
    DegenerateRing { ring: usize, len: usize },
}

/// A row that did not become a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub row_id: String,
    pub reason: SkipReason,
}

/// Result of parsing one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Parsed(GeometryFeature),
    Skipped(SkippedRow),
}

/// Features parsed from one region's rows, plus what was dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub rows: usize,
    pub features: Vec<GeometryFeature>,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    #[inline] pub fn skipped_count(&self) -> usize { self.skipped.len() }
}

/// Parse every row of `region`'s boundary table, skipping malformed rows.
pub fn load_features(region: &RegionId, rows: &[Row]) -> LoadReport {
    let mut report = LoadReport { rows: rows.len(), ..Default::default() };

    for (index, row) in rows.iter().enumerate() {
        match parse_row(region, index, row) {
            RowOutcome::Parsed(feature) => report.features.push(feature),
            RowOutcome::Skipped(skipped) => {
                tracing::warn!(
                    region = %region,
                    row_id = %skipped.row_id,
                    reason = %skipped.reason,
                    "skipping malformed boundary row"
                );
                report.skipped.push(skipped);
            }
        }
    }

    if report.rows > 0 && report.features.is_empty() {
        tracing::warn!(region = %region, rows = report.rows, "every boundary row was skipped");
    }
    report
}

/// Parse a single row into a feature or a skip record.
pub fn parse_row(region: &RegionId, index: usize, row: &Row) -> RowOutcome {
    let row_id = row_id(row, index);

    let parsed = payload(row)
        .ok_or(SkipReason::MissingPayload)
        .and_then(parse_payload)
        .and_then(|value| parse_geometry(&value, row_kind(row)));

    match parsed {
        Ok((kind, geometry)) => RowOutcome::Parsed(GeometryFeature {
            properties: row_properties(region, row),
            id: row_id,
            kind,
            geometry,
        }),
        Err(reason) => RowOutcome::Skipped(SkippedRow { row_id, reason }),
    }
}

/// Replace single and typographic quotes with JSON double quotes.
pub fn normalize_quotes(text: &str) -> Cow<'_, str> {
    let text = text.trim();
    if text.contains(['\'', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}']) {
        Cow::Owned(text.replace(['\'', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'], "\""))
    } else {
        Cow::Borrowed(text)
    }
}

/// Quote-normalize then structurally parse a payload.
fn parse_payload(text: &str) -> Result<Value, SkipReason> {
    serde_json::from_str(&normalize_quotes(text))
        .map_err(|e| SkipReason::InvalidJson(e.to_string()))
}

/// Validate a parsed payload and build its geometry.
/// A bare coordinate array takes its kind from the row's classifier column.
fn parse_geometry(value: &Value, row_kind: GeometryKind) -> Result<(GeometryKind, MultiPolygon<f64>), SkipReason> {
    let (kind, coords) = match value {
        Value::Array(_) => (row_kind, Cow::Borrowed(value)),
        Value::Object(object) => {
            let ty = object.get("type")
                .and_then(Value::as_str)
                .ok_or(SkipReason::MissingType)?;
            let kind = GeometryKind::from_name(ty)
                .ok_or_else(|| SkipReason::UnsupportedType(ty.to_string()))?;
            let coords = match object.get("coordinates") {
                None | Some(Value::Null) => return Err(SkipReason::MissingCoordinates),
                // Coordinates encoded a second time as text.
                Some(Value::String(text)) => Cow::Owned(parse_payload(text)?),
                Some(coords) => Cow::Borrowed(coords),
            };
            (kind, coords)
        }
        _ => return Err(SkipReason::NotAGeometry),
    };

    let geometry = match kind {
        GeometryKind::Polygon => MultiPolygon(vec![parse_polygon(&coords, 0)?]),
        GeometryKind::MultiPolygon => parse_multipolygon(&coords)?,
    };
    Ok((kind, geometry))
}

/// Parse MultiPolygon coordinates: `[[ring, ...], ...]`.
fn parse_multipolygon(coords: &Value) -> Result<MultiPolygon<f64>, SkipReason> {
    let polygons = coords.as_array().ok_or(SkipReason::NotAGeometry)?;
    if polygons.is_empty() {
        return Err(SkipReason::Empty);
    }

    let mut out = Vec::with_capacity(polygons.len());
    let mut ring_base = 0;
    for polygon in polygons {
        out.push(parse_polygon(polygon, ring_base)?);
        ring_base += polygon.as_array().map_or(0, Vec::len);
    }
    Ok(MultiPolygon(out))
}

/// Parse Polygon coordinates: `[exterior, hole, ...]`.
/// `ring_base` offsets ring numbers in diagnostics for multipolygons.
fn parse_polygon(coords: &Value, ring_base: usize) -> Result<Polygon<f64>, SkipReason> {
    let rings = coords.as_array().ok_or(SkipReason::NotAGeometry)?;
    let mut rings = rings.iter()
        .enumerate()
        .map(|(i, ring)| parse_ring(ring, ring_base + i));

    let exterior = rings.next().ok_or(SkipReason::Empty)??;
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring `[[lng, lat], ...]`, closing it if needed.
fn parse_ring(ring: &Value, ring_index: usize) -> Result<LineString<f64>, SkipReason> {
    let pairs = ring.as_array().ok_or(SkipReason::NotAGeometry)?;
    let mut points = Vec::with_capacity(pairs.len() + 1);

    for pair in pairs {
        let values = pair.as_array()
            .filter(|values| values.len() >= 2)
            .ok_or_else(|| SkipReason::InvalidCoordinate(pair.to_string()))?;
        let (Some(x), Some(y)) = (values[0].as_f64(), values[1].as_f64()) else {
            return Err(SkipReason::InvalidCoordinate(pair.to_string()));
        };
        if !x.is_finite() || !y.is_finite() {
            return Err(SkipReason::InvalidCoordinate(pair.to_string()));
        }
        points.push(Coord { x, y });
    }

    // Ensure ring is closed (first point == last point)
    if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
        if first != last {
            points.push(first);
        }
    }

    if points.len() < MIN_RING_LEN {
        return Err(SkipReason::DegenerateRing { ring: ring_index, len: points.len() });
    }
    Ok(LineString(points))
}

/// First non-empty value among `columns`.
fn first_value<'a>(row: &'a Row, columns: &[&str]) -> Option<&'a str> {
    columns.iter()
        .filter_map(|column| row.get(*column))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

fn payload(row: &Row) -> Option<&str> {
    first_value(row, &PAYLOAD_COLUMNS)
}

fn row_id(row: &Row, index: usize) -> String {
    first_value(row, &ID_COLUMNS)
        .map(str::to_string)
        .unwrap_or_else(|| format!("row-{index}"))
}

fn row_kind(row: &Row) -> GeometryKind {
    first_value(row, &KIND_COLUMNS)
        .and_then(GeometryKind::from_name)
        .unwrap_or(GeometryKind::Polygon)
}

/// Non-geometry columns, plus the region name under the level's key
/// (e.g. `"state": "Odisha"`) unless the row already carries one.
fn row_properties(region: &RegionId, row: &Row) -> Map<String, Value> {
    let mut properties: Map<String, Value> = row.iter()
        .filter(|(column, _)| !PAYLOAD_COLUMNS.contains(&column.as_str()))
        .map(|(column, value)| (column.clone(), Value::String(value.clone())))
        .collect();
    properties.entry(region.level().to_str())
        .or_insert_with(|| Value::String(region.raw_name().to_string()));
    properties
}
