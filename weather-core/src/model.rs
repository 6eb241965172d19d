use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use crate::convert::format_naive_iso8601;

/// One city's observation, already converted to Celsius and local time.
///
/// Field order matches [`WeatherRecord::FIELDS`]; the CSV sink depends on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub city: String,
    pub description: String,
    #[serde(serialize_with = "two_decimals")]
    pub temperature: f64,
    #[serde(serialize_with = "two_decimals")]
    pub feels_like: f64,
    #[serde(rename = "minimumTemp", serialize_with = "two_decimals")]
    pub minimum_temp: f64,
    #[serde(rename = "maximumTemp", serialize_with = "two_decimals")]
    pub maximum_temp: f64,
    pub pressure: i64,
    pub humidity: i64,
    pub wind_speed: f64,
    #[serde(serialize_with = "naive_iso8601")]
    pub time_recorded: NaiveDateTime,
    #[serde(serialize_with = "naive_iso8601")]
    pub sunrise: NaiveDateTime,
    #[serde(serialize_with = "naive_iso8601")]
    pub sunset: NaiveDateTime,
}

impl WeatherRecord {
    /// Output header, in column order.
    pub const FIELDS: [&'static str; 12] = [
        "city",
        "description",
        "temperature",
        "feelsLike",
        "minimumTemp",
        "maximumTemp",
        "pressure",
        "humidity",
        "windSpeed",
        "timeRecorded",
        "sunrise",
        "sunset",
    ];
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // `+ 0.0` turns a rounded -0.0 into 0.0
    let rounded = (value * 100.0).round() / 100.0 + 0.0;
    serializer.collect_str(&format_args!("{rounded:.2}"))
}

fn naive_iso8601<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_naive_iso8601(value))
}
