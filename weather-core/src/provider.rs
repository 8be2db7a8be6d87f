use crate::{Config, WeatherSnapshot, error::FetchError, provider::openweather::OpenWeatherProvider};
use anyhow::Context;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions for a named location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, location: &str) -> Result<WeatherSnapshot, FetchError>;
}

/// Construct the OpenWeather provider from config.
///
/// Fails when no API key is configured, so a missing key stops startup
/// rather than every cycle.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key()?;

    let mut provider =
        OpenWeatherProvider::new(api_key.to_owned()).with_base_url(config.base_url.clone());

    if let Some(timeout) = config.request_timeout() {
        provider = provider
            .with_timeout(timeout)
            .context("Failed to build HTTP client")?;
    }

    Ok(provider)
}
