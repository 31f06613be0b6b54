//! Stub collaborators for router and CLI tests.

use async_trait::async_trait;
use std::sync::Arc;
use weather_check_core::{CurrentWeather, LocaleResolver, WeatherCheckService, WeatherLookup};

#[derive(Debug)]
pub struct FixedLocale(pub Option<&'static str>);

#[async_trait]
impl LocaleResolver for FixedLocale {
    async fn resolve_locale(&self, _zipcode: &str) -> anyhow::Result<String> {
        self.0.map(str::to_string).ok_or_else(|| anyhow::anyhow!("viacep down"))
    }
}

#[derive(Debug)]
pub struct FixedWeather(pub Option<f64>);

#[async_trait]
impl WeatherLookup for FixedWeather {
    async fn current_weather(&self, _locale: &str) -> anyhow::Result<CurrentWeather> {
        self.0.map(CurrentWeather::celsius).ok_or_else(|| anyhow::anyhow!("weatherapi down"))
    }
}

/// `None` makes the matching collaborator fail.
pub fn stub_service(locale: Option<&'static str>, temp_c: Option<f64>) -> WeatherCheckService {
    WeatherCheckService::new(Arc::new(FixedLocale(locale)), Arc::new(FixedWeather(temp_c)))
}
