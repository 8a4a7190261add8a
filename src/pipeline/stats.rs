//! Processing statistics and result structures for the POI pipeline
//!
//! Tracks how many records each stage kept or dropped, how opening hours
//! were resolved, and the final per-category counts.

use crate::models::{ClassificationRule, NormalizedPoi};
use std::collections::{BTreeMap, HashMap};

/// Statistics for one pipeline run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcessingStats {
    /// Records read from the source
    pub total_input: usize,
    /// Records left after exact-duplicate removal
    pub deduplicated: usize,
    /// Records dropped for lacking an amenity tag (only with `require_amenity`)
    pub missing_amenity: usize,
    /// Records with no matching classification rule
    pub no_type: usize,
    /// Records whose canonical type is excluded
    pub excluded: usize,
    /// Records that received a canonical business type
    pub classified: usize,
    /// Windows taken from source opening hours
    pub hours_simplified: usize,
    /// Windows generated from the synthesis table
    pub hours_synthesized: usize,
    /// Windows whose times failed to parse
    pub hours_parse_failures: usize,
    /// Final number of output records
    pub final_output: usize,
    /// Classified records per matching rule
    pub rule_counts: HashMap<ClassificationRule, usize>,
    /// Output records per business type
    pub category_counts: BTreeMap<String, usize>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a classified record
    pub fn record_classified(&mut self, rule: ClassificationRule) {
        self.classified += 1;
        *self.rule_counts.entry(rule).or_insert(0) += 1;
    }

    /// Tally business types of the final records
    pub fn record_categories(&mut self, pois: &[NormalizedPoi]) {
        self.category_counts.clear();
        for poi in pois {
            *self
                .category_counts
                .entry(poi.business_type().to_string())
                .or_insert(0) += 1;
        }
    }

    /// Records removed as duplicates
    pub fn duplicates_removed(&self) -> usize {
        self.total_input
            .saturating_sub(self.missing_amenity)
            .saturating_sub(self.deduplicated)
    }

    /// Records dropped by classification (no type, excluded or missing amenity)
    pub fn dropped(&self) -> usize {
        self.missing_amenity + self.no_type + self.excluded
    }

    /// Percentage of deduplicated records that reached the output
    pub fn retention_rate(&self) -> f64 {
        if self.deduplicated == 0 {
            0.0
        } else {
            (self.final_output as f64 / self.deduplicated as f64) * 100.0
        }
    }

    /// Percentage of output windows that had to be synthesized
    pub fn synthesis_rate(&self) -> f64 {
        if self.final_output == 0 {
            0.0
        } else {
            (self.hours_synthesized as f64 / self.final_output as f64) * 100.0
        }
    }

    /// Business types ordered by descending count, then name
    pub fn categories_by_count(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .category_counts
            .iter()
            .map(|(category, count)| (category.as_str(), *count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        counts
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Processing Summary: {} -> {} records ({:.1}% retained) | \
             Duplicates: {} | No type: {} | Excluded: {} | \
             Hours synthesized: {:.1}% | Parse failures: {}",
            self.total_input,
            self.final_output,
            self.retention_rate(),
            self.duplicates_removed(),
            self.no_type,
            self.excluded,
            self.synthesis_rate(),
            self.hours_parse_failures
        )
    }
}

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub pois: Vec<NormalizedPoi>,
    pub stats: ProcessingStats,
}

impl ProcessingResult {
    pub fn new(pois: Vec<NormalizedPoi>, stats: ProcessingStats) -> Self {
        Self { pois, stats }
    }

    pub fn poi_count(&self) -> usize {
        self.pois.len()
    }

    pub fn summary(&self) -> String {
        self.stats.summary()
    }
}
