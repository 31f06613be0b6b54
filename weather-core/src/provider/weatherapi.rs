use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::model::CurrentWeather;

use super::{WeatherLookup, http_client, truncate_body};

/// Weather lookup backed by WeatherAPI.com's `current.json` endpoint.
#[derive(Clone)]
pub struct WeatherApiLookup {
    base_url: String,
    api_key: String,
    http: Client,
}

impl WeatherApiLookup {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http: http_client(timeout)?,
        })
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for WeatherApiLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiLookup")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    temp_f: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    current: WaCurrent,
}

#[async_trait]
impl WeatherLookup for WeatherApiLookup {
    async fn current_weather(&self, locale: &str) -> Result<CurrentWeather> {
        let url = format!("{}/current.json", self.base_url);
        debug!(%locale, "Fetching current weather");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", locale)])
            .send()
            .await
            .context("Failed to send request to WeatherAPI.com (current)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read WeatherAPI current response body")?;

        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "WeatherAPI current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: WaResponse =
            serde_json::from_str(&body).context("Failed to parse WeatherAPI current JSON")?;

        Ok(CurrentWeather { temp_c: parsed.current.temp_c, temp_f: parsed.current.temp_f })
    }
}
