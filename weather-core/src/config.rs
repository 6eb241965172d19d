use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::credentials;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_CREDENTIALS_PATH: &str = "credentials.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "weather_data.csv";

pub const DEFAULT_CITIES: &[&str] = &[
    "Nairobi", "London", "Kampala", "Thika", "Beijing",
    "New York", "Paris", "Tokyo", "Sydney", "Moscow",
    "Berlin", "Madrid", "Rome", "Los Angeles", "Chicago",
    "Toronto", "Vancouver", "Dubai", "Singapore", "Hong Kong",
    "Bangkok", "Istanbul", "Cairo", "Johannesburg", "Buenos Aires",
    "Lagos", "Lima", "Mumbai", "Delhi", "Shanghai",
    "Seoul", "Mexico City", "Jakarta", "Rio de Janeiro", "Sao Paulo",
    "Karachi", "Manila", "Tehran", "Baghdad", "Dhaka",
    "Kinshasa", "Casablanca", "Algiers", "Accra",
];

/// Everything one ETL run needs, resolved up front and passed in explicitly.
#[derive(Debug, Clone)]
pub struct EtlConfig {
    pub cities: Vec<String>,
    pub base_url: String,
    pub api_key: String,
    pub output_path: PathBuf,
}

/// Settings stored on disk.
///
/// Example TOML:
/// ```toml
/// cities = ["Nairobi", "London"]
/// base_url = "https://api.openweathermap.org/data/2.5/weather"
/// credentials_path = "credentials.txt"
/// output_path = "weather_data.csv"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cities: Vec<String>,
    pub base_url: String,
    pub credentials_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cities: DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the platform config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-etl", "weather-etl")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Read the credentials file and build the run configuration.
    pub fn into_etl_config(self) -> Result<EtlConfig> {
        if self.cities.is_empty() {
            bail!("No cities configured; add at least one entry to `cities`");
        }

        let api_key = credentials::read_api_key(&self.credentials_path)?;

        Ok(EtlConfig {
            cities: self.cities,
            base_url: self.base_url,
            api_key,
            output_path: self.output_path,
        })
    }
}
