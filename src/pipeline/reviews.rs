//! Synthetic review counts and ratings
//!
//! The source data has no reviews, so each record gets a placeholder
//! review count and rating. All review counts are drawn before any rating,
//! which keeps the generator sequence stable for a given record count.

use crate::config::ReviewConfig;
use crate::models::ReviewScore;
use rand::Rng;

/// Draw one score per record
pub fn generate_scores<R: Rng + ?Sized>(
    count: usize,
    config: &ReviewConfig,
    rng: &mut R,
) -> Vec<ReviewScore> {
    let reviews: Vec<u32> = (0..count)
        .map(|_| rng.gen_range(config.min_reviews..=config.max_reviews))
        .collect();

    reviews
        .into_iter()
        .map(|reviews| ReviewScore {
            reviews,
            rating: round_to_tenth(rng.gen_range(config.min_rating..=config.max_rating)),
        })
        .collect()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
