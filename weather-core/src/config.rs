use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

/// Environment variable that overrides `weather.api_key`.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

/// Settings for the WeatherAPI.com collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
}

/// Settings for the ViaCEP collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    #[serde(default = "default_locale_base_url")]
    pub base_url: String,
}

/// Outbound HTTP settings shared by both collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
    #[serde(default)]
    pub surface: Surface,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [weather]
/// api_key = "..."
///
/// [server]
/// surface = "query"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_weather_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_locale_base_url() -> String {
    "https://viacep.com.br/ws".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self { api_key: None, base_url: default_weather_base_url() }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self { base_url: default_locale_base_url() }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_seconds: default_timeout_seconds() }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { listen: default_listen(), surface: Surface::default() }
    }
}

impl Config {
    /// Load config from disk (or defaults when absent), then apply the environment.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let cfg = Self::load_from(&path)?;
        Ok(cfg.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Load config from `path` without looking at the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate().with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Reject settings that would make every outbound call fail.
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_seconds == 0 {
            return Err(anyhow!("http.timeout_seconds must be at least 1"));
        }
        Ok(())
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-check", "weather-check")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace the stored API key when `value` is present and non-empty.
    pub fn with_api_key_override(mut self, value: Option<String>) -> Self {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.weather.api_key = Some(key);
        }
        self
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.weather.api_key = Some(api_key);
    }

    /// Returns the WeatherAPI key, if one is configured.
    pub fn api_key(&self) -> Option<&str> {
        self.weather.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Timeout applied to every outbound request.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }
}

/// Which inbound HTTP surface the server mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// `GET /api/v1/weather-check/{zipcode}`
    #[default]
    Path,
    /// `GET /weather-check?cep={code}`
    Query,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Path => "path",
            Surface::Query => "query",
        }
    }

    pub const fn all() -> &'static [Surface] {
        &[Surface::Path, Surface::Query]
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Surface {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "path" => Ok(Surface::Path),
            "query" => Ok(Surface::Query),
            _ => Err(anyhow!("Unknown surface '{value}'. Supported surfaces: path, query.")),
        }
    }
}
