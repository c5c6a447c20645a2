use std::path::Path;

use anyhow::{anyhow, Context, Result};
use geo::{Area, Coord, LineString, Polygon};
use log::warn;
use serde_json::{json, Value};

use crate::{catalog::BoundaryFeature, placement::PlacedMarker, unit::Properties};

/// Read boundary features from GeoJSON FeatureCollection bytes.
///
/// `Polygon` features contribute their exterior ring; for `MultiPolygon`
/// features the exterior ring of the largest part is used. Features with any
/// other geometry are skipped.
pub fn read_boundaries_geojson(bytes: &[u8]) -> Result<Vec<BoundaryFeature>> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("Invalid GeoJSON: expected a FeatureCollection with a 'features' array"))?;

    let mut boundaries = Vec::with_capacity(features.len());
    for (idx, feature) in features.iter().enumerate() {
        let properties = feature["properties"].as_object().cloned().unwrap_or_else(Properties::new);

        let ring = match feature["geometry"]["type"].as_str() {
            Some("Polygon") => {
                let coords = feature["geometry"]["coordinates"].as_array()
                    .ok_or_else(|| anyhow!("Invalid Polygon in feature {idx}: missing coordinates"))?;
                parse_exterior(coords).with_context(|| format!("Invalid Polygon in feature {idx}"))?
            }
            Some("MultiPolygon") => {
                let coords = feature["geometry"]["coordinates"].as_array()
                    .ok_or_else(|| anyhow!("Invalid MultiPolygon in feature {idx}: missing coordinates"))?;
                largest_exterior(coords).with_context(|| format!("Invalid MultiPolygon in feature {idx}"))?
            }
            other => {
                warn!("[geojson] skipping feature {idx} with geometry type {other:?}");
                continue
            }
        };

        boundaries.push(BoundaryFeature::new(ring, properties));
    }

    Ok(boundaries)
}

/// Read boundary features from a GeoJSON file.
pub fn read_boundaries_file(path: &Path) -> Result<Vec<BoundaryFeature>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read boundary file {}", path.display()))?;
    read_boundaries_geojson(&bytes)
        .with_context(|| format!("Failed to load boundaries from {}", path.display()))
}

/// Write placed markers as a GeoJSON FeatureCollection of points.
pub fn write_markers_geojson(markers: &[PlacedMarker]) -> Result<Vec<u8>> {
    let features: Vec<Value> = markers.iter().map(|marker| {
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [marker.longitude, marker.latitude]
            },
            "properties": {
                "registrant_id": marker.registrant_id,
                "unit_key": marker.unit_key,
                "ordinal": marker.ordinal,
                "source": marker.source,
            }
        })
    }).collect();

    let feature_collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    serde_json::to_vec(&feature_collection).context("Failed to serialize markers to GeoJSON")
}

/// Exterior ring of GeoJSON Polygon coordinates: `[exterior, hole, ...]`.
fn parse_exterior(coords: &[Value]) -> Result<Vec<Coord<f64>>> {
    let exterior = coords.first()
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow!("missing exterior ring"))?;
    parse_ring_coords(exterior)
}

/// Exterior ring of the part with the largest area.
fn largest_exterior(coords: &[Value]) -> Result<Vec<Coord<f64>>> {
    let mut best: Option<(f64, Vec<Coord<f64>>)> = None;
    for part in coords {
        let part = part.as_array().ok_or_else(|| anyhow!("polygon part is not an array"))?;
        let ring = parse_exterior(part)?;
        let area = Polygon::new(LineString::from(ring.clone()), vec![]).unsigned_area();
        if best.as_ref().is_none_or(|(best_area, _)| area > *best_area) {
            best = Some((area, ring));
        }
    }
    best.map(|(_, ring)| ring).ok_or_else(|| anyhow!("no polygon parts"))
}

/// Parse a ring from GeoJSON coordinates: `[[x, y], [x, y], ...]`.
/// Extra dimensions (altitude) are ignored.
fn parse_ring_coords(coords: &[Value]) -> Result<Vec<Coord<f64>>> {
    coords.iter().map(|pair| {
        let pair = pair.as_array()
            .filter(|pair| pair.len() >= 2)
            .ok_or_else(|| anyhow!("Invalid coordinate: expected [x, y]"))?;
        let x = pair[0].as_f64().ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?;
        let y = pair[1].as_f64().ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?;
        Ok(Coord { x, y })
    }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::MarkerSource;

    #[test]
    fn reads_polygon_with_properties() {
        let bytes = br#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "Name": "Purok 5", "area_ha": 12.4 },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[124.0, 8.0], [124.01, 8.0], [124.01, 8.01], [124.0, 8.01], [124.0, 8.0]]]
                }
            }]
        }"#;
        let features = read_boundaries_geojson(bytes).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].ring.len(), 5);
        assert_eq!(features[0].ring[1], Coord { x: 124.01, y: 8.0 });
        assert_eq!(features[0].properties["Name"], "Purok 5");
    }

    #[test]
    fn multipolygon_uses_largest_part() {
        let bytes = br#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": null,
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[0.0, 0.0], [0.1, 0.0], [0.1, 0.1], [0.0, 0.0]]],
                        [[[5.0, 5.0], [7.0, 5.0], [7.0, 7.0], [5.0, 7.0], [5.0, 5.0]]]
                    ]
                }
            }]
        }"#;
        let features = read_boundaries_geojson(bytes).unwrap();
        assert_eq!(features[0].ring[0], Coord { x: 5.0, y: 5.0 });
        assert!(features[0].properties.is_empty());
    }

    #[test]
    fn skips_non_polygon_geometry() {
        let bytes = br#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [1.0, 2.0] } },
            { "type": "Feature", "properties": {}, "geometry": null }
        ] }"#;
        assert!(read_boundaries_geojson(bytes).unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(read_boundaries_geojson(b"not json").is_err());
        assert!(read_boundaries_geojson(br#"{ "type": "Feature" }"#).is_err());

        let bad_coord = br#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature", "properties": {}, "geometry": { "type": "Polygon", "coordinates": [[[1.0, "x"]]] } }
        ] }"#;
        let err = read_boundaries_geojson(bad_coord).unwrap_err();
        assert!(format!("{err:#}").contains("feature 0"));
    }

    #[test]
    fn writes_marker_points() {
        let markers = vec![PlacedMarker {
            registrant_id: "REG-1".into(),
            latitude: 8.005,
            longitude: 124.006,
            unit_key: "Purok 5, Upper Jasaan".into(),
            ordinal: Some(0),
            source: MarkerSource::Scattered,
        }];
        let value: Value = serde_json::from_slice(&write_markers_geojson(&markers).unwrap()).unwrap();
        let feature = &value["features"][0];
        assert_eq!(feature["geometry"]["coordinates"], json!([124.006, 8.005]));
        assert_eq!(feature["properties"]["registrant_id"], "REG-1");
        assert_eq!(feature["properties"]["source"], "scattered");
    }
}
