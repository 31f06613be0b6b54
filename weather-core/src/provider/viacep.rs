use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{LocaleResolver, http_client, truncate_body};

/// Locale resolver backed by the ViaCEP postal-code service.
#[derive(Debug, Clone)]
pub struct ViaCepResolver {
    base_url: String,
    http: Client,
}

impl ViaCepResolver {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: http_client(timeout)?,
        })
    }
}

// ViaCEP answers `{"erro": true}` for unknown codes, so every field is optional.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    localidade: String,
}

#[async_trait]
impl LocaleResolver for ViaCepResolver {
    async fn resolve_locale(&self, zipcode: &str) -> Result<String> {
        let url = format!("{}/{}/json/", self.base_url, zipcode);
        debug!(%url, "Resolving locale");

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to send request to ViaCEP")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read ViaCEP response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "ViaCEP request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: ViaCepResponse =
            serde_json::from_str(&body).context("Failed to parse ViaCEP JSON")?;

        Ok(parsed.localidade)
    }
}
