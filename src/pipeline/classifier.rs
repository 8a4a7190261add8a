//! Business type classification
//!
//! Derives one canonical business type from the overlapping `shop`,
//! `amenity` and `tourism` tags. Rules are evaluated in a fixed order and
//! the first match wins; the raw category is then collapsed through the
//! synonym table and checked against the exclusion set.

use crate::config::ClassificationConfig;
use crate::models::{ClassificationRule, RawPoi};
use tracing::debug;

/// Rule evaluation order
pub const RULE_ORDER: [ClassificationRule; 3] = [
    ClassificationRule::Shop,
    ClassificationRule::Amenity,
    ClassificationRule::Tourism,
];

/// Result of classifying one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationOutcome {
    /// Canonical business type found
    Classified {
        business_type: String,
        rule: ClassificationRule,
    },
    /// No rule matched
    NoType,
    /// A rule matched but the canonical type is excluded
    Excluded {
        business_type: String,
        rule: ClassificationRule,
    },
}

impl ClassificationOutcome {
    /// Canonical business type if the record survives classification
    pub fn business_type(&self) -> Option<&str> {
        match self {
            ClassificationOutcome::Classified { business_type, .. } => Some(business_type),
            _ => None,
        }
    }
}

/// Rule-based classifier over the configured tables
#[derive(Debug, Clone)]
pub struct Classifier {
    config: ClassificationConfig,
}

impl Classifier {
    pub fn new(config: ClassificationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassificationConfig {
        &self.config
    }

    /// Canonical business type of a record, or `None` if it is dropped
    pub fn classify(&self, poi: &RawPoi) -> Option<String> {
        self.evaluate(poi).business_type().map(str::to_string)
    }

    /// Classify a record, reporting why it was dropped when it is
    pub fn evaluate(&self, poi: &RawPoi) -> ClassificationOutcome {
        let Some((rule, raw_category)) = self.match_first_rule(poi) else {
            debug!("No business type for {:?}", poi.osm_id);
            return ClassificationOutcome::NoType;
        };

        let business_type = self.canonicalize(raw_category).to_string();

        if self.config.excluded_categories.contains(&business_type) {
            debug!(
                "Excluded {:?}: '{}' (via {} '{}')",
                poi.osm_id, business_type, rule, raw_category
            );
            return ClassificationOutcome::Excluded {
                business_type,
                rule,
            };
        }

        ClassificationOutcome::Classified {
            business_type,
            rule,
        }
    }

    /// First matching rule and the raw category it yields
    pub fn match_first_rule<'a>(&self, poi: &'a RawPoi) -> Option<(ClassificationRule, &'a str)> {
        RULE_ORDER
            .iter()
            .find_map(|&rule| self.apply_rule(rule, poi).map(|category| (rule, category)))
    }

    /// Raw category selected by a single rule, if it applies
    pub fn apply_rule<'a>(&self, rule: ClassificationRule, poi: &'a RawPoi) -> Option<&'a str> {
        match rule {
            ClassificationRule::Shop => poi
                .shop
                .as_deref()
                .filter(|shop| !self.config.shop_placeholders.contains(*shop)),
            ClassificationRule::Amenity => poi
                .amenity
                .as_deref()
                .filter(|amenity| self.config.business_amenities.contains(*amenity)),
            ClassificationRule::Tourism => poi
                .tourism
                .as_deref()
                .filter(|tourism| self.config.accepts_tourism(tourism)),
        }
    }

    /// Collapse a raw category through the synonym table
    pub fn canonicalize<'a>(&'a self, raw_category: &'a str) -> &'a str {
        self.config
            .synonyms
            .get(raw_category)
            .map(String::as_str)
            .unwrap_or(raw_category)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassificationConfig::default())
    }
}
