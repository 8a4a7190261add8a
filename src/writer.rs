//! Output writing for cleaned POI datasets
//!
//! Produces the two artifacts of a run from the same record set: a flat
//! table (CSV or Parquet, built as a Polars DataFrame) and a GeoJSON
//! FeatureCollection carrying the same columns plus the source geometry.

use crate::constants::{columns, hours::OUTPUT_TIME_FORMAT};
use crate::error::{PoiError, Result};
use crate::models::NormalizedPoi;
use chrono::NaiveTime;
use polars::prelude::*;
use serde_json::{Map, Value, json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Format of the tabular artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabularFormat {
    #[default]
    Csv,
    Parquet,
}

impl TabularFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            TabularFormat::Csv => "csv",
            TabularFormat::Parquet => "parquet",
        }
    }
}

/// Paths of the artifacts written by one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub tabular: PathBuf,
    pub geojson: PathBuf,
}

/// Writer for both output artifacts of a run
#[derive(Debug, Clone)]
pub struct DatasetWriter {
    output_dir: PathBuf,
    stem: String,
    format: TabularFormat,
}

impl DatasetWriter {
    pub fn new(output_dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            stem: stem.into(),
            format: TabularFormat::default(),
        }
    }

    pub fn with_format(mut self, format: TabularFormat) -> Self {
        self.format = format;
        self
    }

    pub fn paths(&self) -> OutputPaths {
        OutputPaths {
            tabular: self
                .output_dir
                .join(format!("{}.{}", self.stem, self.format.extension())),
            geojson: self.output_dir.join(format!("{}.geojson", self.stem)),
        }
    }

    /// Write the tabular and GeoJSON artifacts, creating the output directory
    pub fn write_all(&self, pois: &[NormalizedPoi]) -> Result<OutputPaths> {
        std::fs::create_dir_all(&self.output_dir)?;
        let paths = self.paths();

        write_tabular(pois, &paths.tabular, self.format)?;
        write_geojson(pois, &paths.geojson)?;

        info!(
            "Wrote {} records to {} and {}",
            pois.len(),
            paths.tabular.display(),
            paths.geojson.display()
        );
        Ok(paths)
    }
}

fn format_time(time: Option<NaiveTime>) -> Option<String> {
    time.map(|t| t.format(OUTPUT_TIME_FORMAT).to_string())
}

/// Build the flat output table, one row per record
pub fn to_dataframe(pois: &[NormalizedPoi]) -> Result<DataFrame> {
    let osm_ids: Vec<Option<String>> = pois.iter().map(|p| p.poi().osm_id.clone()).collect();
    let osm_types: Vec<Option<String>> = pois.iter().map(|p| p.poi().osm_type.clone()).collect();
    let names: Vec<String> = pois.iter().map(|p| p.classified.name.clone()).collect();
    let amenities: Vec<Option<String>> = pois.iter().map(|p| p.poi().amenity.clone()).collect();
    let shops: Vec<Option<String>> = pois.iter().map(|p| p.poi().shop.clone()).collect();
    let tourism: Vec<Option<String>> = pois.iter().map(|p| p.poi().tourism.clone()).collect();
    let windows: Vec<String> = pois.iter().map(|p| p.hours.window.clone()).collect();
    let reviews: Vec<u32> = pois.iter().map(|p| p.classified.score.reviews).collect();
    let ratings: Vec<f64> = pois.iter().map(|p| p.classified.score.rating).collect();
    let business_types: Vec<String> = pois.iter().map(|p| p.business_type().to_string()).collect();
    let open_times: Vec<Option<String>> = pois.iter().map(|p| format_time(p.hours.open_time)).collect();
    let close_times: Vec<Option<String>> =
        pois.iter().map(|p| format_time(p.hours.close_time)).collect();
    let durations: Vec<Option<f64>> = pois.iter().map(|p| p.duration_hours()).collect();

    let df = df!(
        columns::OSM_ID => osm_ids,
        columns::OSM_TYPE => osm_types,
        columns::NAME => names,
        columns::AMENITY => amenities,
        columns::SHOP => shops,
        columns::TOURISM => tourism,
        columns::OPENING_HOURS => windows,
        columns::REVIEWS => reviews,
        columns::RATING => ratings,
        columns::BUSINESS_TYPE => business_types,
        columns::OPEN_TIME => open_times,
        columns::CLOSE_TIME => close_times,
        columns::DURATION_HOURS => durations
    )?;

    debug!("Built output frame with shape {:?}", df.shape());
    Ok(df)
}

/// Write the flat table as CSV or Parquet
pub fn write_tabular(pois: &[NormalizedPoi], path: &Path, format: TabularFormat) -> Result<usize> {
    let mut df = to_dataframe(pois)?;
    let file = File::create(path)?;

    match format {
        TabularFormat::Csv => {
            let mut writer = BufWriter::new(file);
            CsvWriter::new(&mut writer)
                .include_header(true)
                .finish(&mut df)
                .map_err(|e| PoiError::OutputFailed {
                    path: path.to_path_buf(),
                    reason: format!("Failed to write CSV: {}", e),
                })?;
            writer.flush()?;
        }
        TabularFormat::Parquet => {
            ParquetWriter::new(file)
                .finish(&mut df)
                .map_err(|e| PoiError::OutputFailed {
                    path: path.to_path_buf(),
                    reason: format!("Failed to write Parquet: {}", e),
                })?;
        }
    }

    Ok(df.height())
}

/// Properties of one output feature; same columns as the flat table
fn feature_properties(poi: &NormalizedPoi) -> Map<String, Value> {
    let raw = poi.poi();
    let mut properties = Map::new();
    properties.insert(columns::OSM_ID.into(), json!(raw.osm_id));
    properties.insert(columns::OSM_TYPE.into(), json!(raw.osm_type));
    properties.insert(columns::NAME.into(), json!(poi.classified.name));
    properties.insert(columns::AMENITY.into(), json!(raw.amenity));
    properties.insert(columns::SHOP.into(), json!(raw.shop));
    properties.insert(columns::TOURISM.into(), json!(raw.tourism));
    properties.insert(columns::OPENING_HOURS.into(), json!(poi.hours.window));
    properties.insert(columns::REVIEWS.into(), json!(poi.classified.score.reviews));
    properties.insert(columns::RATING.into(), json!(poi.classified.score.rating));
    properties.insert(columns::BUSINESS_TYPE.into(), json!(poi.business_type()));
    properties.insert(columns::OPEN_TIME.into(), json!(format_time(poi.hours.open_time)));
    properties.insert(columns::CLOSE_TIME.into(), json!(format_time(poi.hours.close_time)));
    properties.insert(columns::DURATION_HOURS.into(), json!(poi.duration_hours()));
    properties
}

/// Build the geometry-preserving FeatureCollection
pub fn to_feature_collection(pois: &[NormalizedPoi]) -> Value {
    let features: Vec<Value> = pois
        .iter()
        .map(|poi| {
            json!({
                "type": "Feature",
                "properties": feature_properties(poi),
                "geometry": poi.poi().geometry,
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Write the FeatureCollection as GeoJSON
pub fn write_geojson(pois: &[NormalizedPoi], path: &Path) -> Result<()> {
    let collection = to_feature_collection(pois);
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &collection)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClassificationRule, ClassifiedPoi, HoursSource, NormalizedHours, RawPoi, ReviewScore,
    };
    use tempfile::TempDir;

    fn sample_poi(osm_id: &str, parsed: bool) -> NormalizedPoi {
        let raw = RawPoi::new(osm_id, "node", json!({"type": "Point", "coordinates": [-4.0, 5.3]}))
            .with_shop("bakery");
        let (open_time, close_time, duration_hours) = if parsed {
            (
                NaiveTime::from_hms_opt(22, 0, 0),
                NaiveTime::from_hms_opt(2, 0, 0),
                Some(4.0),
            )
        } else {
            (None, None, None)
        };

        NormalizedPoi {
            classified: ClassifiedPoi {
                poi: raw,
                name: "Unknown".to_string(),
                business_type: "restaurant".to_string(),
                rule: ClassificationRule::Shop,
                score: ReviewScore {
                    reviews: 12,
                    rating: 4.5,
                },
            },
            hours: NormalizedHours {
                window: if parsed { "22:00-02:00" } else { "99:00-xx" }.to_string(),
                source: HoursSource::Simplified,
                open_time,
                close_time,
                duration_hours,
            },
        }
    }

    #[test]
    fn test_dataframe_columns_and_values() {
        let df = to_dataframe(&[sample_poi("1", true), sample_poi("2", false)]).unwrap();

        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, columns::ALL);
        assert_eq!(df.height(), 2);

        let open = df.column(columns::OPEN_TIME).unwrap();
        assert_eq!(open.null_count(), 1);
        let duration = df.column(columns::DURATION_HOURS).unwrap();
        assert_eq!(duration.null_count(), 1);
    }

    #[test]
    fn test_feature_collection_preserves_geometry() {
        let collection = to_feature_collection(&[sample_poi("1", true)]);

        assert_eq!(collection["type"], "FeatureCollection");
        let feature = &collection["features"][0];
        assert_eq!(feature["geometry"]["coordinates"][0], -4.0);
        assert_eq!(feature["properties"]["business_type"], "restaurant");
        assert_eq!(feature["properties"]["open_time"], "22:00:00");
        assert_eq!(feature["properties"]["close_time"], "02:00:00");
        assert_eq!(feature["properties"]["duration_hours"], 4.0);
        assert_eq!(feature["properties"]["amenity"], Value::Null);
    }

    #[test]
    fn test_unparsed_hours_are_null() {
        let collection = to_feature_collection(&[sample_poi("1", false)]);
        let properties = &collection["features"][0]["properties"];

        assert_eq!(properties["opening_hours"], "99:00-xx");
        assert!(properties["duration_hours"].is_null());
        assert!(properties["open_time"].is_null());
    }

    #[test]
    fn test_write_all_creates_both_artifacts() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("processed");
        let writer = DatasetWriter::new(&out_dir, "pois");

        let paths = writer.write_all(&[sample_poi("1", true)]).unwrap();

        assert_eq!(paths.tabular, out_dir.join("pois.csv"));
        assert_eq!(paths.geojson, out_dir.join("pois.geojson"));
        assert!(paths.tabular.exists());
        assert!(paths.geojson.exists());

        let csv = std::fs::read_to_string(&paths.tabular).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(header, columns::ALL.join(","));
    }

    #[test]
    fn test_parquet_format_path() {
        let temp_dir = TempDir::new().unwrap();
        let writer = DatasetWriter::new(temp_dir.path(), "pois").with_format(TabularFormat::Parquet);

        let paths = writer.write_all(&[sample_poi("1", true)]).unwrap();
        assert_eq!(paths.tabular.extension().unwrap(), "parquet");
        assert!(std::fs::metadata(&paths.tabular).unwrap().len() > 0);
    }
}
