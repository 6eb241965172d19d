use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    convert::{kelvin_to_celsius, local_timestamp},
    error::FetchError,
    model::WeatherRecord,
};

use super::WeatherProvider;

/// Client for the OpenWeather "current weather by city name" endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http: Client::new(),
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        let transport = |source: reqwest::Error| FetchError::Transport {
            city: city.to_string(),
            source: source.without_url(),
        };

        debug!(city, url = %self.base_url, "Requesting current weather");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[("q", city), ("APPID", self.api_key.as_str())])
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        let body = res.text().await.map_err(transport)?;

        transform(city, status, &body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        self.fetch_current(city).await
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: i64,
    humidity: i64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    timezone: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

/// Map a raw HTTP status and body into a record.
///
/// Only status 200 counts as success. Anything the record needs that is
/// absent or mistyped becomes [`FetchError::Malformed`].
pub(crate) fn transform(
    city: &str,
    status: StatusCode,
    body: &str,
) -> Result<WeatherRecord, FetchError> {
    let json: Option<Value> = serde_json::from_str(body).ok();

    if status != StatusCode::OK {
        let message = json
            .as_ref()
            .and_then(|v| v.get("message"))
            .map(|m| match m {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });

        return Err(FetchError::Api {
            city: city.to_string(),
            status,
            message,
        });
    }

    let json = json.ok_or_else(|| {
        FetchError::malformed(city, format!("body is not JSON: {}", truncate_body(body)))
    })?;

    let parsed: OwCurrentResponse =
        serde_json::from_value(json).map_err(|e| FetchError::malformed(city, e.to_string()))?;

    let description = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| FetchError::malformed(city, "`weather` array is empty"))?;

    let timestamp = |field: &str, epoch: i64| {
        local_timestamp(epoch, parsed.timezone).ok_or_else(|| {
            FetchError::malformed(
                city,
                format!("`{field}` ({epoch}) with offset {} is out of range", parsed.timezone),
            )
        })
    };

    let time_recorded = timestamp("dt", parsed.dt)?;
    let sunrise = timestamp("sys.sunrise", parsed.sys.sunrise)?;
    let sunset = timestamp("sys.sunset", parsed.sys.sunset)?;

    Ok(WeatherRecord {
        city: parsed.name,
        description,
        temperature: kelvin_to_celsius(parsed.main.temp),
        feels_like: kelvin_to_celsius(parsed.main.feels_like),
        minimum_temp: kelvin_to_celsius(parsed.main.temp_min),
        maximum_temp: kelvin_to_celsius(parsed.main.temp_max),
        pressure: parsed.main.pressure,
        humidity: parsed.main.humidity,
        wind_speed: parsed.wind.speed,
        time_recorded,
        sunrise,
        sunset,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
