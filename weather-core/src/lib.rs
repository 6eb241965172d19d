//! Core library for the `weather-etl` batch exporter.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider, which fetches and normalizes one city
//! - The CSV sink and the batch loop that ties them together
//!
//! It is used by `weather-etl`, but can also be reused by other binaries or services.

pub mod config;
pub mod convert;
pub mod credentials;
pub mod error;
pub mod etl;
pub mod model;
pub mod provider;
pub mod sink;

pub use config::{Config, EtlConfig};
pub use error::FetchError;
pub use etl::{run, run_with_provider};
pub use model::WeatherRecord;
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use sink::CsvSink;
