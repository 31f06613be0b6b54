use crate::{Config, CurrentWeather};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

pub mod viacep;
pub mod weatherapi;

pub use viacep::ViaCepResolver;
pub use weatherapi::WeatherApiLookup;

/// Maps a zipcode to the name of its locality.
#[async_trait]
pub trait LocaleResolver: Send + Sync + Debug {
    /// Returns an empty string when the service knows no locality for `zipcode`.
    async fn resolve_locale(&self, zipcode: &str) -> anyhow::Result<String>;
}

/// Fetches the current temperature for a locality name.
#[async_trait]
pub trait WeatherLookup: Send + Sync + Debug {
    async fn current_weather(&self, locale: &str) -> anyhow::Result<CurrentWeather>;
}

/// Construct the ViaCEP resolver from config.
pub fn resolver_from_config(config: &Config) -> anyhow::Result<ViaCepResolver> {
    ViaCepResolver::new(config.locale.base_url.clone(), config.timeout())
}

/// Construct the WeatherAPI lookup from config; the API key is mandatory.
pub fn lookup_from_config(config: &Config) -> anyhow::Result<WeatherApiLookup> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No WeatherAPI key configured.\n\
                 Hint: set {} or run `weather-check configure` and enter your API key.",
            crate::config::API_KEY_ENV
        )
    })?;

    WeatherApiLookup::new(config.weather.base_url.clone(), api_key.to_owned(), config.timeout())
}

pub(crate) fn http_client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("weather-check/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
