//! POI classification and hours normalization pipeline
//!
//! Turns raw map features into analysis-ready business records, one
//! generation per stage:
//!
//! 1. **Deduplication**: drop exact duplicate features
//! 2. **Review fill**: attach synthetic review counts and ratings
//! 3. **Classification**: derive one canonical business type from the
//!    `shop`, `amenity` and `tourism` tags, dropping non-businesses
//! 4. **Hours normalization**: resolve a single daily opening window and
//!    its duration, synthesizing one when the source has none
//!
//! # Architecture
//!
//! - [`processor`] - PoiProcessor and stage orchestration
//! - [`deduplication`] - exact-duplicate removal
//! - [`reviews`] - synthetic review/rating fill
//! - [`classifier`] - ordered classification rules, synonyms and exclusions
//! - [`hours`] - opening hours simplification, parsing and duration
//! - [`synthesis`] - per-category window synthesis
//! - [`stats`] - processing statistics and result structures
//!
//! # Randomness
//!
//! Review fill and hours synthesis draw from one generator that the caller
//! passes in. [`PoiProcessor::process_seeded`] seeds it from the
//! configuration, so the same input and seed always give the same output.

pub mod classifier;
pub mod deduplication;
pub mod hours;
pub mod processor;
pub mod reviews;
pub mod stats;
pub mod synthesis;

#[cfg(test)]
pub mod tests;

pub use classifier::{ClassificationOutcome, Classifier};
pub use hours::{HoursNormalizer, normalize_hours, simplify_opening_hours};
pub use processor::PoiProcessor;
pub use stats::{ProcessingResult, ProcessingStats};
pub use synthesis::{sample_hour, synthesize_window};
