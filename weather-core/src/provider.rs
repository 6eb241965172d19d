use async_trait::async_trait;
use std::fmt::Debug;

use crate::{EtlConfig, FetchError, WeatherRecord, provider::openweather::OpenWeatherProvider};

pub mod openweather;

/// A source of current weather, keyed by city name.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherRecord, FetchError>;
}

/// Construct the OpenWeather provider described by a run configuration.
pub fn provider_from_config(config: &EtlConfig) -> OpenWeatherProvider {
    OpenWeatherProvider::new(config.base_url.clone(), config.api_key.clone())
}
