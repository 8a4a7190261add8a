//! GeoJSON input loading.
//!
//! Reads a FeatureCollection exported from OpenStreetMap into [`RawPoi`]
//! records. Only the tag properties the pipeline interprets are extracted;
//! the geometry is kept as an opaque JSON value.

use crate::error::{PoiError, Result};
use crate::models::RawPoi;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Value,
}

/// Load all features of a GeoJSON FeatureCollection
///
/// A missing file is reported before anything is read.
pub fn read_feature_collection(path: &Path) -> Result<Vec<RawPoi>> {
    if !path.is_file() {
        return Err(PoiError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let pois = parse_feature_collection(&content, path)?;

    info!("Loaded {} features from {}", pois.len(), path.display());
    Ok(pois)
}

/// Parse FeatureCollection text; `path` is only used in error messages
pub fn parse_feature_collection(content: &str, path: &Path) -> Result<Vec<RawPoi>> {
    let collection: FeatureCollection = serde_json::from_str(content)
        .map_err(|e| PoiError::invalid_input(path, format!("not a feature collection: {}", e)))?;

    if let Some(kind) = &collection.kind {
        if kind != "FeatureCollection" {
            return Err(PoiError::invalid_input(
                path,
                format!("expected type FeatureCollection, found {}", kind),
            ));
        }
    }

    let pois: Vec<RawPoi> = collection.features.into_iter().map(feature_to_poi).collect();
    debug!("Parsed {} features", pois.len());
    Ok(pois)
}

fn feature_to_poi(feature: Feature) -> RawPoi {
    let properties = feature.properties.unwrap_or_default();

    let osm_id = text_property(&properties, "osm_id")
        .or_else(|| feature.id.as_ref().and_then(value_to_text));

    RawPoi {
        osm_id,
        osm_type: text_property(&properties, "osm_type"),
        name: text_property(&properties, "name"),
        shop: text_property(&properties, "shop"),
        amenity: text_property(&properties, "amenity"),
        tourism: text_property(&properties, "tourism"),
        opening_hours: text_property(&properties, "opening_hours"),
        geometry: feature.geometry,
    }
}

fn text_property(properties: &Map<String, Value>, key: &str) -> Option<String> {
    properties.get(key).and_then(value_to_text)
}

/// Text form of a scalar property; null and blank strings are absent
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_collection() -> String {
        json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {
                        "osm_id": 123456,
                        "osm_type": "node",
                        "name": "Chez Tante",
                        "amenity": "restaurant",
                        "shop": null,
                        "tourism": "",
                        "opening_hours": "08:00-22:00"
                    },
                    "geometry": {"type": "Point", "coordinates": [-4.02, 5.33]}
                },
                {
                    "type": "Feature",
                    "id": "way/99",
                    "properties": {"shop": "bakery"},
                    "geometry": null
                }
            ]
        })
        .to_string()
    }

    #[test]
    fn test_parse_feature_collection() {
        let pois = parse_feature_collection(&sample_collection(), Path::new("test.geojson")).unwrap();

        assert_eq!(pois.len(), 2);

        let first = &pois[0];
        assert_eq!(first.osm_id.as_deref(), Some("123456"));
        assert_eq!(first.osm_type.as_deref(), Some("node"));
        assert_eq!(first.name.as_deref(), Some("Chez Tante"));
        assert_eq!(first.amenity.as_deref(), Some("restaurant"));
        assert_eq!(first.shop, None);
        assert_eq!(first.tourism, None);
        assert_eq!(first.opening_hours.as_deref(), Some("08:00-22:00"));
        assert_eq!(first.geometry["type"], "Point");

        let second = &pois[1];
        assert_eq!(second.osm_id.as_deref(), Some("way/99"));
        assert_eq!(second.shop.as_deref(), Some("bakery"));
        assert_eq!(second.name, None);
        assert!(second.geometry.is_null());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = read_feature_collection(Path::new("/nonexistent/pois.geojson"));
        assert!(matches!(result, Err(PoiError::FileNotFound { .. })));
    }

    #[test]
    fn test_malformed_input() {
        let result = parse_feature_collection("{\"type\": \"Feature\"}", Path::new("bad.geojson"));
        assert!(matches!(result, Err(PoiError::InvalidInput { .. })));

        let result = parse_feature_collection(
            "{\"type\": \"Topology\", \"features\": []}",
            Path::new("bad.geojson"),
        );
        assert!(matches!(result, Err(PoiError::InvalidInput { .. })));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(sample_collection().as_bytes()).unwrap();
        file.flush().unwrap();

        let pois = read_feature_collection(file.path()).unwrap();
        assert_eq!(pois.len(), 2);
    }
}
