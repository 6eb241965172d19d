use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, Password, PasswordDisplayMode};
use std::path::{Path, PathBuf};
use tracing::info;
use weather_etl_core::{Config, credentials};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-etl",
    version,
    about = "Export current weather for a list of cities to CSV"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every configured city and write the CSV file.
    Run {
        #[command(flatten)]
        config: ConfigArgs,

        /// API key file; overrides `credentials_path` from the config.
        #[arg(long)]
        credentials: Option<PathBuf>,

        /// Output CSV path; overrides `output_path` from the config.
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// City to fetch; repeat to build a list that replaces the configured one.
        #[arg(long = "city", value_name = "NAME")]
        cities: Vec<String>,
    },

    /// Store the OpenWeather API key in the credentials file.
    Configure {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print the configured city list.
    Cities {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config file to use instead of the platform default.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl ConfigArgs {
    fn load(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Run {
                config,
                credentials,
                output,
                cities,
            } => {
                let cfg = apply_overrides(config.load()?, credentials, output, cities);
                let etl = cfg.into_etl_config()?;
                weather_etl_core::run(&etl).await?;
            }
            Command::Configure { config } => configure(&config)?,
            Command::Cities { config } => {
                for city in config.load()?.cities {
                    println!("{city}");
                }
            }
        }

        Ok(())
    }
}

fn apply_overrides(
    mut cfg: Config,
    credentials: Option<PathBuf>,
    output: Option<PathBuf>,
    cities: Vec<String>,
) -> Config {
    if let Some(path) = credentials {
        cfg.credentials_path = path;
    }
    if let Some(path) = output {
        cfg.output_path = path;
    }
    if !cities.is_empty() {
        cfg.cities = cities;
    }
    cfg
}

/// Write `cfg` to `path` unless a file is already there. Returns whether it wrote.
fn save_if_missing(cfg: &Config, path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    cfg.save_to(path)?;
    Ok(true)
}

fn configure(args: &ConfigArgs) -> Result<()> {
    let cfg = args.load()?;

    if args.config.is_none() {
        let path = Config::config_file_path()?;
        if save_if_missing(&cfg, &path)? {
            println!("Wrote default config to {}", path.display());
        }
    }

    let key_path = &cfg.credentials_path;
    if key_path.exists() {
        let question = format!("{} already exists. Overwrite it?", key_path.display());
        let overwrite = Confirm::new(&question)
            .with_default(false)
            .prompt()
            .context("Failed to read confirmation")?;
        if !overwrite {
            println!("Keeping existing credentials.");
            return Ok(());
        }
    }

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    credentials::write_api_key(key_path, &api_key)?;
    info!(path = %key_path.display(), "Stored API key");
    println!("Saved API key to {}", key_path.display());

    Ok(())
}
