//! Opening hours normalization
//!
//! Turns free-form `opening_hours` text into a single daily window and a
//! duration. Normalization runs in three steps:
//!
//! 1. **Simplification**: reduce the source text to one `HH:MM-HH:MM`
//!    window, or nothing when the text is absent, says the place is closed,
//!    or has no recognisable times.
//! 2. **Synthesis**: when simplification gives nothing, draw a plausible
//!    window for the business type (see [`super::synthesis`]).
//! 3. **Parsing**: split the window into open and close times and compute
//!    the wall-clock duration, treating `close <= open` as crossing midnight.
//!
//! Normalization never drops a record. A window that fails to parse keeps
//! its text and reports no times or duration.

use crate::config::HoursConfig;
use crate::constants::hours;
use crate::models::{HoursSource, NormalizedHours};
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

use super::synthesis::synthesize_window;

static ALWAYS_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"24/?7|00:00-24:00|00:00-00:00").expect("valid always-open regex"));
static CLOSED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)closed|off|unknown|n/a").expect("valid closed regex"));
static TIME_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}:\d{2})-(\d{1,2}:\d{2})").expect("valid time range regex"));
static SINGLE_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}$").expect("valid single time regex"));

const SECONDS_PER_DAY: i64 = 24 * 3600;

/// Reduce source opening hours text to one `HH:MM-HH:MM` window
///
/// Multiple ranges (`08:00-12:00,14:00-18:00`) merge into one window from
/// the earliest opening to the latest closing. A bare time (`08:18`)
/// becomes the zero-width window `08:18-08:18`, which parses to a full
/// 24 hour duration.
pub fn simplify_opening_hours(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();

    if ALWAYS_OPEN_RE.is_match(value) {
        return Some(hours::FULL_DAY_WINDOW.to_string());
    }

    if CLOSED_RE.is_match(value) {
        return None;
    }

    let ranges: Vec<(&str, &str)> = TIME_RANGE_RE
        .captures_iter(value)
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .collect();

    if !ranges.is_empty() {
        let open = ranges.iter().map(|(open, _)| *open).min_by_key(|t| clock_minutes(t))?;
        let close = ranges.iter().map(|(_, close)| *close).max_by_key(|t| clock_minutes(t))?;
        return Some(format!("{}{}{}", open, hours::WINDOW_SEPARATOR, close));
    }

    if SINGLE_TIME_RE.is_match(value) {
        return Some(format!("{}{}{}", value, hours::WINDOW_SEPARATOR, value));
    }

    None
}

/// Minutes since midnight of an `H:MM` string, for ordering endpoints
///
/// `24:00` orders after every other time of day.
fn clock_minutes(text: &str) -> u32 {
    let (hour, minute) = text.split_once(':').unwrap_or((text, "0"));
    let hour: u32 = hour.parse().unwrap_or(0);
    let minute: u32 = minute.parse().unwrap_or(0);
    hour * 60 + minute
}

/// Open and close times parsed from a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedWindow {
    pub open: Option<NaiveTime>,
    pub close: Option<NaiveTime>,
}

/// Split a window into its endpoints, reading `24:00` as midnight
pub fn parse_window(window: &str) -> ParsedWindow {
    let normalized = window.replace(hours::END_OF_DAY, hours::MIDNIGHT);

    match normalized.split_once(hours::WINDOW_SEPARATOR) {
        Some((open, close)) => ParsedWindow {
            open: parse_time(open),
            close: parse_time(close),
        },
        None => ParsedWindow {
            open: None,
            close: None,
        },
    }
}

fn parse_time(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), hours::TIME_FORMAT).ok()
}

/// Wall-clock hours from `open` to `close`
///
/// A close time at or before the open time is on the next day, so the
/// result is always in `(0, 24]`.
pub fn duration_hours(open: NaiveTime, close: NaiveTime) -> f64 {
    let mut seconds = close.signed_duration_since(open).num_seconds();
    if close <= open {
        seconds += SECONDS_PER_DAY;
    }
    seconds as f64 / 3600.0
}

/// Stateless opening hours normalizer over a synthesis configuration
#[derive(Debug, Clone)]
pub struct HoursNormalizer {
    config: HoursConfig,
}

impl HoursNormalizer {
    pub fn new(config: HoursConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HoursConfig {
        &self.config
    }

    /// Resolve the opening hours of one record
    pub fn normalize<R: Rng + ?Sized>(
        &self,
        raw: Option<&str>,
        business_type: &str,
        rng: &mut R,
    ) -> NormalizedHours {
        normalize_hours(raw, business_type, &self.config, rng)
    }
}

impl Default for HoursNormalizer {
    fn default() -> Self {
        Self::new(HoursConfig::default())
    }
}

/// Resolve opening hours text into a window, times and duration
pub fn normalize_hours<R: Rng + ?Sized>(
    raw: Option<&str>,
    business_type: &str,
    config: &HoursConfig,
    rng: &mut R,
) -> NormalizedHours {
    let (window, source) = match simplify_opening_hours(raw) {
        Some(window) => (window, HoursSource::Simplified),
        None => (
            synthesize_window(business_type, config, rng),
            HoursSource::Synthesized,
        ),
    };

    let parsed = parse_window(&window);
    let duration = match (parsed.open, parsed.close) {
        (Some(open), Some(close)) => Some(duration_hours(open, close)),
        _ => None,
    };

    NormalizedHours {
        window,
        source,
        open_time: parsed.open,
        close_time: parsed.close,
        duration_hours: duration,
    }
}
