//! Core data structures for POI processing.
//!
//! Each pipeline stage produces a new generation of records:
//! [`RawPoi`] as read from the source, [`ClassifiedPoi`] once a canonical
//! business type is known, and [`NormalizedPoi`] once the opening hours
//! window is resolved.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A point of interest as read from the source feature collection
#[derive(Debug, Clone, PartialEq)]
pub struct RawPoi {
    pub osm_id: Option<String>,
    pub osm_type: Option<String>,
    pub name: Option<String>,
    pub shop: Option<String>,
    pub amenity: Option<String>,
    pub tourism: Option<String>,
    pub opening_hours: Option<String>,
    /// Opaque geometry payload, written back unchanged
    pub geometry: Value,
}

impl RawPoi {
    /// Create a record with only identity and geometry set
    pub fn new(osm_id: impl Into<String>, osm_type: impl Into<String>, geometry: Value) -> Self {
        Self {
            osm_id: Some(osm_id.into()),
            osm_type: Some(osm_type.into()),
            name: None,
            shop: None,
            amenity: None,
            tourism: None,
            opening_hours: None,
            geometry,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_shop(mut self, shop: impl Into<String>) -> Self {
        self.shop = Some(shop.into());
        self
    }

    pub fn with_amenity(mut self, amenity: impl Into<String>) -> Self {
        self.amenity = Some(amenity.into());
        self
    }

    pub fn with_tourism(mut self, tourism: impl Into<String>) -> Self {
        self.tourism = Some(tourism.into());
        self
    }

    pub fn with_opening_hours(mut self, opening_hours: impl Into<String>) -> Self {
        self.opening_hours = Some(opening_hours.into());
        self
    }

    /// Key identifying exact duplicates: every kept field, geometry included
    ///
    /// Geometry is compared through its JSON text; object keys serialize
    /// in sorted order so equal payloads give equal text.
    pub fn duplicate_key(&self) -> DuplicateKey {
        DuplicateKey {
            osm_id: self.osm_id.clone(),
            osm_type: self.osm_type.clone(),
            name: self.name.clone(),
            shop: self.shop.clone(),
            amenity: self.amenity.clone(),
            tourism: self.tourism.clone(),
            opening_hours: self.opening_hours.clone(),
            geometry: self.geometry.to_string(),
        }
    }
}

/// Hashable projection of a [`RawPoi`] used for exact-duplicate removal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    osm_id: Option<String>,
    osm_type: Option<String>,
    name: Option<String>,
    shop: Option<String>,
    amenity: Option<String>,
    tourism: Option<String>,
    opening_hours: Option<String>,
    geometry: String,
}

/// Synthetic review count and rating attached to each record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewScore {
    pub reviews: u32,
    pub rating: f64,
}

/// Which classification rule produced a business type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationRule {
    Shop,
    Amenity,
    Tourism,
}

impl fmt::Display for ClassificationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClassificationRule::Shop => "shop",
            ClassificationRule::Amenity => "amenity",
            ClassificationRule::Tourism => "tourism",
        };
        f.write_str(name)
    }
}

/// A record with a canonical business type
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedPoi {
    pub poi: RawPoi,
    /// Record name, `"Unknown"` when the source has none
    pub name: String,
    pub business_type: String,
    pub rule: ClassificationRule,
    pub score: ReviewScore,
}

/// Where an opening hours window came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoursSource {
    /// Derived from the source `opening_hours` text
    Simplified,
    /// Generated from the per-category synthesis table
    Synthesized,
}

/// Resolved opening hours of one record
///
/// `open_time`, `close_time` and `duration_hours` are `None` only when the
/// window text failed to parse; such records are kept for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedHours {
    /// `HH:MM-HH:MM` window the times were parsed from
    pub window: String,
    pub source: HoursSource,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
    pub duration_hours: Option<f64>,
}

impl NormalizedHours {
    /// True when both endpoints parsed and a duration is available
    pub fn is_complete(&self) -> bool {
        self.open_time.is_some() && self.close_time.is_some() && self.duration_hours.is_some()
    }
}

/// A fully processed record, ready for output
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPoi {
    pub classified: ClassifiedPoi,
    pub hours: NormalizedHours,
}

impl NormalizedPoi {
    pub fn poi(&self) -> &RawPoi {
        &self.classified.poi
    }

    pub fn business_type(&self) -> &str {
        &self.classified.business_type
    }

    pub fn duration_hours(&self) -> Option<f64> {
        self.hours.duration_hours
    }
}
