//! API key file handling.
//!
//! The key lives in a plain text file on its own (default `credentials.txt`)
//! so it can be kept out of the shareable TOML config.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Read the API key from `path`, trimming surrounding whitespace.
pub fn read_api_key(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read credentials file: {}\n\
             Hint: run `weather-etl configure` and enter your OpenWeather API key.",
            path.display()
        )
    })?;

    let key = contents.trim();
    if key.is_empty() {
        bail!("Credentials file {} is empty", path.display());
    }

    Ok(key.to_string())
}

/// Store `api_key` at `path`, creating parent directories as needed.
pub fn write_api_key(path: &Path, api_key: &str) -> Result<()> {
    let key = api_key.trim();
    if key.is_empty() {
        bail!("Refusing to store an empty API key");
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create credentials directory: {}", parent.display())
        })?;
    }

    fs::write(path, format!("{key}\n"))
        .with_context(|| format!("Failed to write credentials file: {}", path.display()))?;

    Ok(())
}
