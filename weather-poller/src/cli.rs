use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use weather_core::{Config, WeatherFetcher, provider_from_config, run_with_fixed_delay};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-poller", version, about = "Periodic current-weather logger")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll on the configured interval until interrupted (default).
    Run,

    /// Run a single fetch cycle and exit.
    Once,

    /// Interactively store the API key and location.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Run) {
            Command::Run => {
                let config = load_validated(self.config.as_deref())?;
                let fetcher = build_fetcher(&config)?;

                run_with_fixed_delay(&fetcher, config.interval(), shutdown_signal()).await;
            }
            Command::Once => {
                let config = load_validated(self.config.as_deref())?;
                let fetcher = build_fetcher(&config)?;

                // Failures are logged by the cycle itself.
                let _ = fetcher.run_cycle().await;
            }
            Command::Configure => configure(self.config)?,
        }

        Ok(())
    }
}

fn load_validated(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let config = Config::load(path)?;
    config.validate()?;
    Ok(config)
}

fn build_fetcher(config: &Config) -> anyhow::Result<WeatherFetcher> {
    let provider = provider_from_config(config)?;
    Ok(WeatherFetcher::new(Arc::new(provider), config.location.clone()))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
}

fn configure(path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = match path {
        Some(p) => p,
        None => Config::config_file_path()?,
    };
    let mut config = Config::load_from(&path)?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Get one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    let location = inquire::Text::new("Location:")
        .with_default(&config.location)
        .prompt()
        .context("Failed to read location")?;

    config.api_key = Some(api_key.trim().to_string());
    config.location = location.trim().to_string();
    config.validate()?;
    config.save_to(&path)?;

    info!(path = %path.display(), "configuration saved");
    println!("Configuration saved to {}", path.display());

    Ok(())
}
