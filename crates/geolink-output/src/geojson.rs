//! GeoJSON export of points and connector segments for map rendering.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};

use geolink_model::{Connector, PointSet};

use crate::error::{OutputError, Result};

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum Geometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: [[f64; 2]; 2] },
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: Geometry,
    properties: Value,
}

#[derive(Debug, Serialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    features: Vec<Feature>,
}

impl FeatureCollection {
    fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection",
            features,
        }
    }
}

fn feature(geometry: Geometry, properties: Value) -> Feature {
    Feature {
        kind: "Feature",
        geometry,
        properties,
    }
}

/// Writes connectors as `LineString` features with `query_id` and
/// `matched_id` properties.
///
/// Coordinates are written as stored on the connector, so any axis swap
/// chosen at linkage time carries through.
pub fn write_connectors_geojson<W: Write>(writer: W, connectors: &[Connector]) -> Result<()> {
    let features = connectors
        .iter()
        .map(|connector| {
            feature(
                Geometry::LineString {
                    coordinates: [connector.start.to_array(), connector.end.to_array()],
                },
                json!({
                    "query_id": connector.query_id.as_str(),
                    "matched_id": connector.matched_id.as_str(),
                }),
            )
        })
        .collect();
    serde_json::to_writer_pretty(writer, &FeatureCollection::new(features))?;
    Ok(())
}

/// Writes both point sets as `Point` features tagged with a `role` of
/// `reference` or `query`.
pub fn write_points_geojson<W: Write>(
    writer: W,
    reference: &PointSet,
    query: &PointSet,
    swap_axes: bool,
) -> Result<()> {
    let tagged = reference
        .iter()
        .map(|record| (record, "reference"))
        .chain(query.iter().map(|record| (record, "query")));
    let features = tagged
        .map(|(record, role)| {
            let coord = if swap_axes {
                record.coord().swapped()
            } else {
                record.coord()
            };
            feature(
                Geometry::Point {
                    coordinates: coord.to_array(),
                },
                json!({ "id": record.id().as_str(), "role": role }),
            )
        })
        .collect();
    serde_json::to_writer_pretty(writer, &FeatureCollection::new(features))?;
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| OutputError::Create {
            path: path.to_path_buf(),
            source,
        })
}

pub fn write_connectors_geojson_file(path: &Path, connectors: &[Connector]) -> Result<()> {
    let mut writer = create(path)?;
    write_connectors_geojson(&mut writer, connectors)?;
    writer.flush()?;
    tracing::info!(path = %path.display(), features = connectors.len(), "wrote connectors");
    Ok(())
}

pub fn write_points_geojson_file(
    path: &Path,
    reference: &PointSet,
    query: &PointSet,
    swap_axes: bool,
) -> Result<()> {
    let mut writer = create(path)?;
    write_points_geojson(&mut writer, reference, query, swap_axes)?;
    writer.flush()?;
    tracing::info!(
        path = %path.display(),
        features = reference.len() + query.len(),
        "wrote points"
    );
    Ok(())
}
