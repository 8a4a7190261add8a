//! Opening hours synthesis for records without usable source hours
//!
//! Windows are drawn from per-category hour ranges using the generator
//! passed in by the caller, so a fixed seed gives a fixed dataset.

use crate::config::{HourRange, HoursConfig};
use crate::constants::hours;
use rand::Rng;

/// Draw an hour uniformly from a circular hour range
///
/// A range with `start <= end` is the plain interval `start..=end`. A range
/// with `start > end` crosses midnight and covers `start..=23` followed by
/// `0..=end`; the draw is made over the combined length and mapped back onto
/// the clock, so every hour in the range is equally likely.
pub fn sample_hour<R: Rng + ?Sized>(range: HourRange, rng: &mut R) -> u32 {
    if range.wraps() {
        let span = (24 - range.start()) + (range.end() + 1);
        (range.start() + rng.gen_range(0..span)) % 24
    } else {
        rng.gen_range(range.start()..=range.end())
    }
}

/// Synthesize an `HH:MM-HH:MM` window for a business type
pub fn synthesize_window<R: Rng + ?Sized>(
    business_type: &str,
    config: &HoursConfig,
    rng: &mut R,
) -> String {
    let Some(ranges) = config.synthesis_ranges.get(business_type) else {
        return config.default_window.clone();
    };

    if ranges.is_always_open() {
        return hours::FULL_DAY_WINDOW.to_string();
    }

    let open_hour = sample_hour(ranges.open(), rng);
    let close_hour = extend_overnight(open_hour, sample_hour(ranges.close(), rng), rng);

    format!("{:02}:00-{:02}:00", open_hour, close_hour)
}

/// Push a close hour that is not after the open hour past midnight
///
/// An extension of a few hours is always drawn in that case; the close
/// hour only changes when the extended time lands on the next day.
fn extend_overnight<R: Rng + ?Sized>(open_hour: u32, close_hour: u32, rng: &mut R) -> u32 {
    if close_hour > open_hour {
        return close_hour;
    }

    let (min_ext, max_ext) = hours::OVERNIGHT_EXTENSION_HOURS;
    let extended = close_hour + rng.gen_range(min_ext..=max_ext);
    if extended >= 24 {
        extended % 24
    } else {
        close_hour
    }
}
