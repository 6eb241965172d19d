//! Unit and time conversions applied to raw OpenWeather values.

use chrono::{DateTime, NaiveDateTime};

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Layout used for every timestamp column in the output.
pub const NAIVE_ISO8601: &str = "%Y-%m-%dT%H:%M:%S";

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Shift a UTC epoch by the location's offset and read the result as a wall
/// clock time without any zone attached.
///
/// Returns `None` when the sum overflows or falls outside chrono's range.
pub fn local_timestamp(epoch_secs: i64, utc_offset_secs: i64) -> Option<NaiveDateTime> {
    let shifted = epoch_secs.checked_add(utc_offset_secs)?;
    DateTime::from_timestamp(shifted, 0).map(|dt| dt.naive_utc())
}

pub fn format_naive_iso8601(ts: &NaiveDateTime) -> String {
    ts.format(NAIVE_ISO8601).to_string()
}
