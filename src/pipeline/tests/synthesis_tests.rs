//! Tests for opening hours synthesis

use super::*;
use crate::config::{HourRange, HoursConfig};
use crate::constants::hours::FULL_DAY_WINDOW;
use crate::pipeline::synthesis::{sample_hour, synthesize_window};
use regex::Regex;
use std::collections::BTreeSet;

fn draw_hours(range: HourRange, draws: usize) -> BTreeSet<u32> {
    let mut rng = test_rng();
    (0..draws).map(|_| sample_hour(range, &mut rng)).collect()
}

#[test]
fn test_sample_linear_range() {
    let hours = draw_hours(HourRange(8, 10), 500);
    assert_eq!(hours, BTreeSet::from([8, 9, 10]));
}

#[test]
fn test_sample_wrapping_range() {
    let hours = draw_hours(HourRange(23, 1), 500);
    assert_eq!(hours, BTreeSet::from([0, 1, 23]));
}

#[test]
fn test_sample_range_ending_at_midnight() {
    let hours = draw_hours(HourRange(22, 0), 500);
    assert_eq!(hours, BTreeSet::from([0, 22, 23]));
}

#[test]
fn test_sample_single_hour() {
    let hours = draw_hours(HourRange(5, 5), 50);
    assert_eq!(hours, BTreeSet::from([5]));
}

#[test]
fn test_always_open_category() {
    let config = HoursConfig::default();
    let mut rng = test_rng();

    for category in ["fuel", "atm", "parking"] {
        assert_eq!(synthesize_window(category, &config, &mut rng), FULL_DAY_WINDOW);
    }
}

#[test]
fn test_absent_category_uses_default_window() {
    let config = HoursConfig::default();
    let mut rng = test_rng();

    assert_eq!(synthesize_window("hotel", &config, &mut rng), "09:00-18:00");
}

#[test]
fn test_synthesized_windows_are_whole_hours() {
    let config = HoursConfig::default();
    let pattern = Regex::new(r"^\d{2}:00-\d{2}:00$").unwrap();
    let mut rng = test_rng();

    for _ in 0..50 {
        let window = synthesize_window("restaurant", &config, &mut rng);
        assert!(pattern.is_match(&window), "bad window {}", window);

        let (open, close) = window.split_once('-').unwrap();
        let open: u32 = open[..2].parse().unwrap();
        let close: u32 = close[..2].parse().unwrap();
        assert!((10..=12).contains(&open));
        assert!((21..=23).contains(&close));
    }
}

#[test]
fn test_overnight_category_keeps_early_close() {
    let config = HoursConfig::default();
    let mut rng = test_rng();

    for _ in 0..50 {
        let window = synthesize_window("bar", &config, &mut rng);
        let (open, close) = window.split_once('-').unwrap();
        let open: u32 = open[..2].parse().unwrap();
        let close: u32 = close[..2].parse().unwrap();
        assert!((17..=21).contains(&open), "open {}", open);
        assert!((1..=3).contains(&close), "close {}", close);
    }
}

#[test]
fn test_same_seed_same_windows() {
    let config = HoursConfig::default();
    let categories = ["restaurant", "bar", "nightclub", "cinema", "bank"];

    let mut first = test_rng();
    let mut second = test_rng();
    for _ in 0..10 {
        for category in categories {
            assert_eq!(
                synthesize_window(category, &config, &mut first),
                synthesize_window(category, &config, &mut second)
            );
        }
    }
}
