//! Main POI processor implementation and pipeline orchestration
//!
//! Runs the stages in order: optional amenity pre-filter, exact-duplicate
//! removal, review fill, classification and hours normalization. Each
//! stage consumes the previous generation of records and returns a new one.

use crate::config::PipelineConfig;
use crate::constants::UNKNOWN_NAME;
use crate::models::{ClassifiedPoi, HoursSource, NormalizedPoi, RawPoi, ReviewScore};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{
    classifier::{ClassificationOutcome, Classifier},
    deduplication::deduplicate_pois,
    hours::HoursNormalizer,
    reviews::generate_scores,
    stats::{ProcessingResult, ProcessingStats},
};

/// POI processor for raw map exports
///
/// # Example
///
/// ```rust
/// use poi_cleaner::config::PipelineConfig;
/// use poi_cleaner::models::RawPoi;
/// use poi_cleaner::pipeline::PoiProcessor;
///
/// let pois = vec![
///     RawPoi::new("1", "node", serde_json::Value::Null).with_shop("bakery"),
///     RawPoi::new("2", "node", serde_json::Value::Null).with_amenity("casino"),
/// ];
///
/// let processor = PoiProcessor::new(PipelineConfig::default());
/// let result = processor.process_seeded(pois, false);
///
/// assert_eq!(result.poi_count(), 1);
/// assert_eq!(result.pois[0].business_type(), "restaurant");
/// ```
#[derive(Debug, Clone)]
pub struct PoiProcessor {
    config: PipelineConfig,
    classifier: Classifier,
    normalizer: HoursNormalizer,
}

impl PoiProcessor {
    pub fn new(config: PipelineConfig) -> Self {
        let classifier = Classifier::new(config.classification.clone());
        let normalizer = HoursNormalizer::new(config.hours.clone());
        Self {
            config,
            classifier,
            normalizer,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn normalizer(&self) -> &HoursNormalizer {
        &self.normalizer
    }

    /// Run the pipeline with a generator seeded from the configuration
    pub fn process_seeded(&self, pois: Vec<RawPoi>, show_progress: bool) -> ProcessingResult {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.process(pois, &mut rng, show_progress)
    }

    /// Run the full pipeline with the given generator
    pub fn process<R: Rng + ?Sized>(
        &self,
        pois: Vec<RawPoi>,
        rng: &mut R,
        show_progress: bool,
    ) -> ProcessingResult {
        let mut stats = ProcessingStats::new();
        stats.total_input = pois.len();

        info!("Starting POI pipeline for {} records", pois.len());

        // Step 1: Optional amenity pre-filter
        let pois = if self.config.require_amenity {
            let before = pois.len();
            let kept: Vec<RawPoi> = pois.into_iter().filter(|poi| poi.amenity.is_some()).collect();
            stats.missing_amenity = before - kept.len();
            debug!("Dropped {} records without an amenity tag", stats.missing_amenity);
            kept
        } else {
            pois
        };

        // Step 2: Exact-duplicate removal
        let dedup_pb = Self::stage_progress_bar(show_progress, pois.len(), "Deduplication");
        let pois = deduplicate_pois(pois, dedup_pb.as_ref());
        stats.deduplicated = pois.len();
        if let Some(pb) = dedup_pb {
            pb.finish_with_message(format!("Deduplication complete: {} records", pois.len()));
        }

        // Step 3: Review fill, drawn for every surviving record
        let scores = generate_scores(pois.len(), &self.config.reviews, rng);

        // Step 4: Classification
        let classify_pb = Self::stage_progress_bar(show_progress, pois.len(), "Classification");
        let classified = self.classify_all(pois, scores, &mut stats, classify_pb.as_ref());
        if let Some(pb) = classify_pb {
            pb.finish_with_message(format!(
                "Classification complete: {} records",
                classified.len()
            ));
        }

        // Step 5: Opening hours normalization
        let hours_pb = Self::stage_progress_bar(show_progress, classified.len(), "Opening hours");
        let normalized = self.normalize_all(classified, rng, &mut stats, hours_pb.as_ref());
        if let Some(pb) = hours_pb {
            pb.finish_with_message(format!(
                "Opening hours complete: {} records",
                normalized.len()
            ));
        }

        stats.final_output = normalized.len();
        stats.record_categories(&normalized);

        info!("{}", stats.summary());

        ProcessingResult::new(normalized, stats)
    }

    /// Classify records, dropping those without a canonical business type
    pub fn classify_all(
        &self,
        pois: Vec<RawPoi>,
        scores: Vec<ReviewScore>,
        stats: &mut ProcessingStats,
        progress_bar: Option<&ProgressBar>,
    ) -> Vec<ClassifiedPoi> {
        let mut classified = Vec::with_capacity(pois.len());

        for (poi, score) in pois.into_iter().zip(scores) {
            match self.classifier.evaluate(&poi) {
                ClassificationOutcome::Classified {
                    business_type,
                    rule,
                } => {
                    stats.record_classified(rule);
                    let name = poi.name.clone().unwrap_or_else(|| UNKNOWN_NAME.to_string());
                    classified.push(ClassifiedPoi {
                        poi,
                        name,
                        business_type,
                        rule,
                        score,
                    });
                }
                ClassificationOutcome::NoType => stats.no_type += 1,
                ClassificationOutcome::Excluded { .. } => stats.excluded += 1,
            }

            if let Some(pb) = progress_bar {
                pb.inc(1);
            }
        }

        info!(
            "Classification complete: {} classified, {} without type, {} excluded",
            stats.classified, stats.no_type, stats.excluded
        );

        classified
    }

    /// Resolve opening hours for every classified record
    pub fn normalize_all<R: Rng + ?Sized>(
        &self,
        pois: Vec<ClassifiedPoi>,
        rng: &mut R,
        stats: &mut ProcessingStats,
        progress_bar: Option<&ProgressBar>,
    ) -> Vec<NormalizedPoi> {
        let mut normalized = Vec::with_capacity(pois.len());

        for classified in pois {
            let hours = self.normalizer.normalize(
                classified.poi.opening_hours.as_deref(),
                &classified.business_type,
                rng,
            );

            match hours.source {
                HoursSource::Simplified => stats.hours_simplified += 1,
                HoursSource::Synthesized => stats.hours_synthesized += 1,
            }

            if !hours.is_complete() {
                stats.hours_parse_failures += 1;
                warn!(
                    "Unparseable opening hours window '{}' for {:?} ({}), keeping record without duration",
                    hours.window, classified.poi.osm_id, classified.business_type
                );
            }

            normalized.push(NormalizedPoi { classified, hours });

            if let Some(pb) = progress_bar {
                pb.inc(1);
            }
        }

        info!(
            "Opening hours complete: {} from source, {} synthesized, {} unparseable",
            stats.hours_simplified, stats.hours_synthesized, stats.hours_parse_failures
        );

        normalized
    }

    /// Create a progress bar for a stage, or nothing when progress is hidden
    fn stage_progress_bar(show_progress: bool, total: usize, operation: &str) -> Option<ProgressBar> {
        if !show_progress {
            return None;
        }

        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.set_message(operation.to_string());
        Some(pb)
    }
}

impl Default for PoiProcessor {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
