//! GeoJSON Boundary Reader
//! Reads state outlines from a FeatureCollection.

use super::GeoError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Longitude, latitude.
pub type Point = (f64, f64);

/// Outline of one state. Only outer rings are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub code: String,
    pub rings: Vec<Vec<Point>>,
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

/// A position is `[lon, lat]` optionally followed by altitude.
type Ring = Vec<Vec<f64>>;

pub fn load_boundaries(path: &Path, code_attribute: &str) -> Result<Vec<Boundary>, GeoError> {
    let raw = fs::read_to_string(path).map_err(|source| GeoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_boundaries(&raw, code_attribute)
}

/// Parse a GeoJSON FeatureCollection.
///
/// Features without a string `code_attribute` or without polygonal geometry
/// are skipped.
pub fn parse_boundaries(raw: &str, code_attribute: &str) -> Result<Vec<Boundary>, GeoError> {
    let collection: FeatureCollection = serde_json::from_str(raw)?;
    let mut boundaries = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.into_iter().enumerate() {
        let code = feature
            .properties
            .as_ref()
            .and_then(|props| props.get(code_attribute))
            .and_then(Value::as_str);
        let Some(code) = code else {
            debug!(index, attribute = code_attribute, "feature without state code, skipped");
            continue;
        };
        let Some(geometry) = feature.geometry else {
            debug!(index, code, "feature without geometry, skipped");
            continue;
        };

        let rings = match geometry.kind.as_str() {
            "Polygon" => {
                let polygon: Vec<Ring> = serde_json::from_value(geometry.coordinates)?;
                outer_ring(polygon).into_iter().collect()
            }
            "MultiPolygon" => {
                let polygons: Vec<Vec<Ring>> = serde_json::from_value(geometry.coordinates)?;
                polygons.into_iter().filter_map(outer_ring).collect()
            }
            other => {
                warn!(index, code, kind = other, "unsupported geometry type, skipped");
                continue;
            }
        };

        boundaries.push(Boundary {
            code: code.to_string(),
            rings,
        });
    }

    Ok(boundaries)
}

fn outer_ring(polygon: Vec<Ring>) -> Option<Vec<Point>> {
    let ring = polygon.into_iter().next()?;
    let points: Vec<Point> = ring
        .into_iter()
        .filter_map(|pos| match pos.as_slice() {
            [lon, lat, ..] => Some((*lon, *lat)),
            _ => None,
        })
        .collect();
    (points.len() >= 3).then_some(points)
}
