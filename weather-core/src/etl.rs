//! The batch loop: one request per city, one row per success.

use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

use crate::{
    config::EtlConfig,
    provider::{WeatherProvider, provider_from_config},
    sink::CsvSink,
};

/// Run the whole batch against OpenWeather as described by `config`.
pub async fn run(config: &EtlConfig) -> Result<()> {
    let provider = provider_from_config(config);
    run_with_provider(&config.cities, &config.output_path, &provider).await
}

/// Fetch every city in order and write the successful ones to `output_path`.
///
/// Per-city failures are logged and skipped. Only output I/O errors abort the
/// run.
pub async fn run_with_provider<P>(
    cities: &[String],
    output_path: &Path,
    provider: &P,
) -> Result<()>
where
    P: WeatherProvider + ?Sized,
{
    let mut sink = CsvSink::create(output_path)?;
    let mut saved = 0usize;

    for city in cities {
        info!("Fetching data for {city}...");

        match provider.fetch_weather(city).await {
            Ok(record) => {
                sink.write(&record)?;
                saved += 1;
                info!("Saved weather for {city}");
            }
            Err(err) => {
                warn!(
                    city = err.city(),
                    status = err.status().map(|s| s.as_u16()),
                    error = %err,
                    "Could not fetch data for {city}"
                );
            }
        }
    }

    info!(
        attempted = cities.len(),
        saved,
        output = %output_path.display(),
        "Weather batch finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchError, WeatherRecord, convert::local_timestamp};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::{fs, sync::Mutex};

    /// Succeeds for every city except those listed in `failing`, and records call order.
    #[derive(Debug, Default)]
    struct ScriptedProvider {
        failing: Vec<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WeatherProvider for ScriptedProvider {
        async fn fetch_weather(&self, city: &str) -> Result<WeatherRecord, FetchError> {
            self.calls.lock().unwrap().push(city.to_string());

            if self.failing.iter().any(|f| *f == city) {
                return Err(FetchError::Api {
                    city: city.to_string(),
                    status: StatusCode::NOT_FOUND,
                    message: Some("city not found".into()),
                });
            }

            let ts = local_timestamp(0, 0).unwrap();
            Ok(WeatherRecord {
                city: city.to_string(),
                description: "overcast clouds".into(),
                temperature: 1.0,
                feels_like: 0.0,
                minimum_temp: -1.0,
                maximum_temp: 2.0,
                pressure: 1000,
                humidity: 90,
                wind_speed: 1.5,
                time_recorded: ts,
                sunrise: ts,
                sunset: ts,
            })
        }
    }

    fn cities(names: &[&str]) -> Vec<String> {
        names.iter().map(|c| c.to_string()).collect()
    }

    fn data_rows(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .skip(1)
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn cities_are_visited_once_in_order_including_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let provider = ScriptedProvider::default();
        let list = cities(&["Rome", "Paris", "Rome"]);

        run_with_provider(&list, &out, &provider).await.unwrap();

        assert_eq!(*provider.calls.lock().unwrap(), list);
        let rows = data_rows(&out);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("Rome,"));
        assert!(rows[1].starts_with("Paris,"));
        assert!(rows[2].starts_with("Rome,"));
    }

    #[tokio::test]
    async fn failures_are_skipped_and_loop_continues() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let provider = ScriptedProvider {
            failing: vec!["Atlantis", "El Dorado"],
            ..Default::default()
        };
        let list = cities(&["Atlantis", "Lagos", "El Dorado", "Accra"]);

        run_with_provider(&list, &out, &provider).await.unwrap();

        assert_eq!(provider.calls.lock().unwrap().len(), 4);
        let rows = data_rows(&out);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("Lagos,"));
        assert!(rows[1].starts_with("Accra,"));
    }

    #[tokio::test]
    async fn all_failures_leave_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let provider = ScriptedProvider {
            failing: vec!["Nowhere"],
            ..Default::default()
        };

        run_with_provider(&cities(&["Nowhere"]), &out, &provider)
            .await
            .unwrap();

        let contents = fs::read_to_string(&out).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert_eq!(contents.lines().next(), Some(WeatherRecord::FIELDS.join(",").as_str()));
    }

    #[tokio::test]
    async fn empty_city_list_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let provider = ScriptedProvider::default();

        run_with_provider(&[], &out, &provider).await.unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap().lines().count(), 1);
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unwritable_output_aborts_before_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing-dir").join("out.csv");
        let provider = ScriptedProvider::default();

        let result = run_with_provider(&cities(&["Rome"]), &out, &provider).await;

        assert!(result.is_err());
        assert!(provider.calls.lock().unwrap().is_empty());
    }
}
