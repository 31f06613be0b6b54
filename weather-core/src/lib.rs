//! Core library for the `weather-check` service.
//!
//! This crate defines:
//! - Zipcode validation and the failure taxonomy of a check
//! - Abstractions over the locale resolver and weather lookup services
//! - The orchestration service converting a zipcode into three temperatures
//! - Configuration & credentials handling
//!
//! It is used by `weather-check-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod validation;

pub use config::{Config, Surface};
pub use error::CheckError;
pub use model::{CurrentWeather, WeatherResult};
pub use provider::{LocaleResolver, WeatherLookup};
pub use service::WeatherCheckService;
pub use validation::is_valid_zipcode;
