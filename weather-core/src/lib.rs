//! Core library for the `weather-poller` service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The decoded current-conditions model and the metrics derived from it
//! - Abstraction over the weather provider, with an OpenWeather implementation
//! - The fetch cycle and the fixed-delay loop that drives it
//!
//! It is used by `weather-poller`, but the cycle can be driven by any scheduler.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod provider;
pub mod schedule;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use error::FetchError;
pub use fetcher::WeatherFetcher;
pub use model::{WeatherMetrics, WeatherSnapshot};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use schedule::run_with_fixed_delay;
