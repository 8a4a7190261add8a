//! Exact-duplicate removal for raw POIs
//!
//! Map exports often repeat a feature verbatim. Two records are duplicates
//! only when every kept field matches, geometry included; the first
//! occurrence is kept and input order is preserved.

use crate::models::RawPoi;
use indicatif::ProgressBar;
use std::collections::HashSet;
use tracing::{debug, info};

/// Remove exact duplicates, keeping the first occurrence of each record
pub fn deduplicate_pois(pois: Vec<RawPoi>, progress_bar: Option<&ProgressBar>) -> Vec<RawPoi> {
    let input_count = pois.len();
    let mut seen = HashSet::with_capacity(input_count);
    let mut unique = Vec::with_capacity(input_count);

    for poi in pois {
        if seen.insert(poi.duplicate_key()) {
            unique.push(poi);
        } else {
            debug!("Dropping duplicate record {:?}", poi.osm_id);
        }

        if let Some(pb) = progress_bar {
            pb.inc(1);
        }
    }

    info!(
        "Deduplication complete: removed {} duplicates, {} records remaining",
        input_count - unique.len(),
        unique.len()
    );

    unique
}

/// Count records that would be removed as duplicates
pub fn count_duplicates(pois: &[RawPoi]) -> usize {
    let mut seen = HashSet::with_capacity(pois.len());
    pois.iter()
        .filter(|poi| !seen.insert(poi.duplicate_key()))
        .count()
}

/// Check if two records are exact duplicates
pub fn are_duplicates(a: &RawPoi, b: &RawPoi) -> bool {
    a.duplicate_key() == b.duplicate_key()
}
