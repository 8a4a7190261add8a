//! Configuration management and validation.
//!
//! All classification tables and the hours synthesis table are static
//! data with built-in defaults (see [`crate::constants`]). A TOML file can
//! override any subset of them; sections and keys left out keep their
//! defaults. Overriding a table replaces it entirely.
//!
//! ```toml
//! seed = 7
//!
//! [classification]
//! include_attraction = true
//! excluded_categories = ["casino"]
//!
//! [hours.synthesis_ranges]
//! restaurant = [[11, 12], [22, 23]]
//! ```

use crate::constants::{self, hours, reviews};
use crate::error::{PoiError, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

/// Inclusive hour-of-day range; `start > end` wraps past midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange(pub u32, pub u32);

impl HourRange {
    pub fn start(&self) -> u32 {
        self.0
    }

    pub fn end(&self) -> u32 {
        self.1
    }

    /// True when the range crosses midnight
    pub fn wraps(&self) -> bool {
        self.0 > self.1
    }
}

/// Opening and closing hour ranges for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisRanges(pub HourRange, pub HourRange);

impl SynthesisRanges {
    /// Sentinel marking a category as open around the clock
    pub const ALWAYS_OPEN: SynthesisRanges = SynthesisRanges(HourRange(0, 0), HourRange(23, 23));

    pub fn open(&self) -> HourRange {
        self.0
    }

    pub fn close(&self) -> HourRange {
        self.1
    }

    pub fn is_always_open(&self) -> bool {
        *self == Self::ALWAYS_OPEN
    }
}

/// Tables driving business type classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Amenity tags accepted as businesses
    pub business_amenities: HashSet<String>,

    /// Shop values treated as absent
    pub shop_placeholders: HashSet<String>,

    /// Tourism values accepted as businesses
    pub business_tourism: HashSet<String>,

    /// Also accept `tourism=attraction`
    pub include_attraction: bool,

    /// Raw category -> canonical category
    pub synonyms: HashMap<String, String>,

    /// Canonical categories dropped from the output
    pub excluded_categories: HashSet<String>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            business_amenities: to_set(constants::BUSINESS_AMENITIES),
            shop_placeholders: to_set(constants::SHOP_PLACEHOLDERS),
            business_tourism: to_set(constants::BUSINESS_TOURISM),
            include_attraction: false,
            synonyms: constants::CATEGORY_SYNONYMS
                .iter()
                .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
                .collect(),
            excluded_categories: to_set(constants::EXCLUDED_CATEGORIES),
        }
    }
}

impl ClassificationConfig {
    /// Whether a tourism value is accepted, honouring the attraction flag
    pub fn accepts_tourism(&self, tourism: &str) -> bool {
        self.business_tourism.contains(tourism)
            || (self.include_attraction && tourism == constants::TOURISM_ATTRACTION)
    }
}

/// Opening hours synthesis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoursConfig {
    /// Window used for categories absent from `synthesis_ranges`
    pub default_window: String,

    /// Plausible opening/closing hour ranges per category
    pub synthesis_ranges: HashMap<String, SynthesisRanges>,
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self {
            default_window: hours::DEFAULT_WINDOW.to_string(),
            synthesis_ranges: constants::HOURS_SYNTHESIS_RANGES
                .iter()
                .map(|(category, ((os, oe), (cs, ce)))| {
                    (
                        category.to_string(),
                        SynthesisRanges(HourRange(*os, *oe), HourRange(*cs, *ce)),
                    )
                })
                .collect(),
        }
    }
}

/// Bounds of the synthetic review/rating fill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub min_reviews: u32,
    pub max_reviews: u32,
    pub min_rating: f64,
    pub max_rating: f64,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            min_reviews: reviews::MIN_REVIEWS,
            max_reviews: reviews::MAX_REVIEWS,
            min_rating: reviews::MIN_RATING,
            max_rating: reviews::MAX_RATING,
        }
    }
}

/// Global configuration for a cleaning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Seed of the generator shared by review fill and hours synthesis
    pub seed: u64,

    /// Drop records without an `amenity` tag before classification
    pub require_amenity: bool,

    pub classification: ClassificationConfig,

    pub hours: HoursConfig,

    pub reviews: ReviewConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed: constants::DEFAULT_SEED,
            require_amenity: false,
            classification: ClassificationConfig::default(),
            hours: HoursConfig::default(),
            reviews: ReviewConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file, falling back to defaults for
    /// anything the file leaves out
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PoiError::configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content).map_err(|e| match e {
            PoiError::ConfigParse { reason, .. } => PoiError::ConfigParse {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(content).map_err(|e| PoiError::ConfigParse {
            path: Default::default(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges the pipeline relies on
    pub fn validate(&self) -> Result<()> {
        for (category, ranges) in &self.hours.synthesis_ranges {
            for range in [ranges.open(), ranges.close()] {
                if range.start() > 23 || range.end() > 23 {
                    return Err(PoiError::configuration(format!(
                        "Synthesis range for '{}' has hour outside 0..=23: {:?}",
                        category, range
                    )));
                }
            }
        }

        if !is_valid_window(&self.hours.default_window) {
            return Err(PoiError::configuration(format!(
                "Default hours window must be HH:MM-HH:MM, got '{}'",
                self.hours.default_window
            )));
        }

        if self.reviews.min_reviews > self.reviews.max_reviews {
            return Err(PoiError::configuration(format!(
                "min_reviews ({}) exceeds max_reviews ({})",
                self.reviews.min_reviews, self.reviews.max_reviews
            )));
        }

        if self.reviews.min_rating.is_nan()
            || self.reviews.max_rating.is_nan()
            || self.reviews.min_rating > self.reviews.max_rating
        {
            return Err(PoiError::configuration(format!(
                "min_rating ({}) exceeds max_rating ({})",
                self.reviews.min_rating, self.reviews.max_rating
            )));
        }

        if self
            .classification
            .synonyms
            .values()
            .any(|canonical| canonical.trim().is_empty())
        {
            return Err(PoiError::configuration(
                "Synonym targets must be non-empty category names",
            ));
        }

        Ok(())
    }

    /// Set the generator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Accept `tourism=attraction` as a business
    pub fn with_attractions(mut self) -> Self {
        self.classification.include_attraction = true;
        self
    }

    /// Drop records without an amenity tag before classification
    pub fn with_required_amenity(mut self) -> Self {
        self.require_amenity = true;
        self
    }
}

fn to_set(values: &[&str]) -> HashSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn is_valid_window(window: &str) -> bool {
    match window.split_once(hours::WINDOW_SEPARATOR) {
        Some((open, close)) => {
            NaiveTime::parse_from_str(open, hours::TIME_FORMAT).is_ok()
                && NaiveTime::parse_from_str(close, hours::TIME_FORMAT).is_ok()
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_tables_match_constants() {
        let config = PipelineConfig::default();

        assert_eq!(config.classification.business_amenities.len(), 50);
        assert_eq!(config.classification.excluded_categories.len(), 13);
        assert_eq!(
            config.classification.synonyms.get("bakery").map(String::as_str),
            Some("restaurant")
        );
        assert_eq!(config.hours.synthesis_ranges.len(), 29);
        assert!(config.hours.synthesis_ranges["fuel"].is_always_open());
        assert_eq!(config.hours.default_window, "09:00-18:00");
        assert_eq!(config.seed, 42);
        assert!(!config.classification.include_attraction);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = PipelineConfig::from_toml_str(
            r#"
seed = 7

[classification]
include_attraction = true
excluded_categories = ["casino"]

[hours.synthesis_ranges]
restaurant = [[11, 12], [22, 23]]
"#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert!(config.classification.accepts_tourism("attraction"));
        assert_eq!(config.classification.excluded_categories.len(), 1);
        // Untouched tables keep their defaults
        assert_eq!(config.classification.business_amenities.len(), 50);
        // Overridden table is replaced as a whole
        assert_eq!(config.hours.synthesis_ranges.len(), 1);
        assert_eq!(
            config.hours.synthesis_ranges["restaurant"],
            SynthesisRanges(HourRange(11, 12), HourRange(22, 23))
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "require_amenity = true").unwrap();
        file.flush().unwrap();

        let config = PipelineConfig::from_file(file.path()).unwrap();
        assert!(config.require_amenity);
    }

    #[test]
    fn test_missing_config_file() {
        let result = PipelineConfig::from_file(Path::new("/nonexistent/poi.toml"));
        assert!(matches!(result, Err(PoiError::Configuration { .. })));
    }

    #[test]
    fn test_malformed_config_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "seed = \"not a number\"").unwrap();
        file.flush().unwrap();

        match PipelineConfig::from_file(file.path()) {
            Err(PoiError::ConfigParse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected ConfigParse error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_hours() {
        let mut config = PipelineConfig::default();
        config.hours.synthesis_ranges.insert(
            "bar".to_string(),
            SynthesisRanges(HourRange(17, 25), HourRange(1, 3)),
        );
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.hours.default_window = "nine to six".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_review_bounds() {
        let mut config = PipelineConfig::default();
        config.reviews.min_rating = 5.0;
        config.reviews.max_rating = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builders() {
        let config = PipelineConfig::default()
            .with_seed(1)
            .with_attractions()
            .with_required_amenity();

        assert_eq!(config.seed, 1);
        assert!(config.classification.include_attraction);
        assert!(config.require_amenity);
    }

    #[test]
    fn test_hour_range_wraps() {
        assert!(HourRange(23, 1).wraps());
        assert!(!HourRange(9, 11).wraps());
        assert!(!HourRange(0, 0).wraps());
    }
}
