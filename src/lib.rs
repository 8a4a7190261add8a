//! POI Cleaner Library
//!
//! Turns raw OpenStreetMap point-of-interest exports into analysis-ready
//! business records.
//!
//! This library provides tools for:
//! - Reading GeoJSON FeatureCollections of raw OSM features
//! - Removing exact duplicate features
//! - Classifying features into one canonical business type from their
//!   `shop`, `amenity` and `tourism` tags
//! - Normalizing free-form opening hours into a single daily window with
//!   parsed open/close times and a duration in hours
//! - Synthesizing plausible windows and review scores where the source has none
//! - Writing the result as CSV or Parquet plus geometry-preserving GeoJSON

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod reader;
pub mod writer;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{PoiError, Result};
pub use models::{ClassifiedPoi, NormalizedHours, NormalizedPoi, RawPoi, ReviewScore};
pub use pipeline::{PoiProcessor, ProcessingResult, ProcessingStats};
