use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    CheckError, Config, WeatherResult,
    provider::{LocaleResolver, WeatherLookup, lookup_from_config, resolver_from_config},
    validation::is_valid_zipcode,
};

/// Runs the zipcode → locale → weather pipeline.
///
/// Holds no per-request state; one instance can serve any number of
/// concurrent checks.
#[derive(Debug, Clone)]
pub struct WeatherCheckService {
    resolver: Arc<dyn LocaleResolver>,
    lookup: Arc<dyn WeatherLookup>,
}

impl WeatherCheckService {
    pub fn new(resolver: Arc<dyn LocaleResolver>, lookup: Arc<dyn WeatherLookup>) -> Self {
        Self { resolver, lookup }
    }

    /// Wire the HTTP collaborators described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let resolver = resolver_from_config(config)?;
        let lookup = lookup_from_config(config)?;
        Ok(Self::new(Arc::new(resolver), Arc::new(lookup)))
    }

    pub async fn check_weather(&self, zipcode: &str) -> Result<WeatherResult, CheckError> {
        if !is_valid_zipcode(zipcode) {
            return Err(CheckError::InvalidZipcode);
        }

        let locale = self.resolver.resolve_locale(zipcode).await.map_err(|err| {
            warn!(%zipcode, error = %format!("{err:#}"), "Locale lookup failed");
            CheckError::LocaleLookupFailed
        })?;

        if locale.is_empty() {
            debug!(%zipcode, "No locality for zipcode");
            return Err(CheckError::ZipcodeNotFound);
        }

        let weather = self.lookup.current_weather(&locale).await.map_err(|err| {
            warn!(%locale, error = %format!("{err:#}"), "Weather lookup failed");
            CheckError::WeatherLookupFailed
        })?;

        let result = WeatherResult::from_celsius(weather.temp_c);
        info!(%zipcode, %locale, temp_c = result.temp_c, "Weather check completed");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CurrentWeather;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct StubResolver {
        locale: Option<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LocaleResolver for StubResolver {
        async fn resolve_locale(&self, zipcode: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(zipcode, "12345678");
            self.locale.map(str::to_string).ok_or_else(|| anyhow::anyhow!("connection refused"))
        }
    }

    #[derive(Debug, Default)]
    struct StubLookup {
        temp_c: Option<f64>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherLookup for StubLookup {
        async fn current_weather(&self, locale: &str) -> anyhow::Result<CurrentWeather> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(locale, "locale");
            self.temp_c.map(CurrentWeather::celsius).ok_or_else(|| anyhow::anyhow!("timed out"))
        }
    }

    fn service(
        locale: Option<&'static str>,
        temp_c: Option<f64>,
    ) -> (WeatherCheckService, Arc<StubResolver>, Arc<StubLookup>) {
        let resolver = Arc::new(StubResolver { locale, ..Default::default() });
        let lookup = Arc::new(StubLookup { temp_c, ..Default::default() });
        let service = WeatherCheckService::new(resolver.clone(), lookup.clone());
        (service, resolver, lookup)
    }

    #[tokio::test]
    async fn invalid_zipcode_skips_collaborators() {
        let (service, resolver, lookup) = service(Some("locale"), Some(10.0));

        assert_eq!(service.check_weather("12345").await, Err(CheckError::InvalidZipcode));
        assert_eq!(service.check_weather("abc").await, Err(CheckError::InvalidZipcode));

        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn resolver_failure_is_locale_lookup_failed() {
        let (service, _, lookup) = service(None, Some(10.0));

        assert_eq!(service.check_weather("12345678").await, Err(CheckError::LocaleLookupFailed));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_locality_is_not_found() {
        let (service, _, lookup) = service(Some(""), Some(10.0));

        assert_eq!(service.check_weather("12345678").await, Err(CheckError::ZipcodeNotFound));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lookup_failure_is_weather_lookup_failed() {
        let (service, _, _) = service(Some("locale"), None);

        assert_eq!(service.check_weather("12345678").await, Err(CheckError::WeatherLookupFailed));
    }

    #[tokio::test]
    async fn converts_celsius_to_fahrenheit_and_kelvin() {
        let (service, resolver, lookup) = service(Some("locale"), Some(10.0));

        let result = service.check_weather("12345678").await.expect("success");

        assert_eq!(result.temp_c, 10.0);
        assert_eq!(result.temp_f, 50.0);
        assert_eq!(result.temp_k, 283.15);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn repeated_checks_give_identical_results() {
        let (service, resolver, lookup) = service(Some("locale"), Some(10.0));

        let first = service.check_weather("12345678").await;
        let second = service.check_weather("12345678").await;

        assert_eq!(first, second);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 2);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn from_config_requires_api_key() {
        let err = WeatherCheckService::from_config(&Config::default()).unwrap_err();

        assert!(err.to_string().contains("No WeatherAPI key configured"));
    }
}
