use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::Password;
use weather_check_core::{Config, Surface, WeatherCheckService};

use crate::web;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-check", version, about = "Current temperature for a zipcode")]
pub struct Cli {
    /// Log collaborator calls and request traces.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the weather check over HTTP.
    Serve {
        /// Address to listen on, e.g. "127.0.0.1:8080".
        #[arg(long)]
        listen: Option<String>,

        /// HTTP surface to mount: "path" or "query".
        #[arg(long)]
        surface: Option<String>,
    },

    /// Run a single check and print the JSON result.
    Check {
        /// Zipcode, e.g. "01001000" or "01001-000".
        zipcode: String,
    },

    /// Store the WeatherAPI key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { listen, surface } => {
                let config = Config::load()?;
                let surface = match surface {
                    Some(s) => Surface::try_from(s.as_str())?,
                    None => config.server.surface,
                };
                let listen = listen.unwrap_or_else(|| config.server.listen.clone());

                let service = WeatherCheckService::from_config(&config)?;
                web::serve(&listen, surface, service).await?;
            }
            Command::Check { zipcode } => {
                let config = Config::load()?;
                let service = WeatherCheckService::from_config(&config)?;

                println!("{}", check_once(&service, &zipcode).await?);
            }
            Command::Configure => {
                let path = Config::config_file_path()?;
                // Read the file alone so an exported key is not persisted.
                let mut config = Config::load_from(&path)?;

                let api_key = Password::new("WeatherAPI key:")
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;

                if api_key.trim().is_empty() {
                    bail!("API key must not be empty");
                }

                config.set_api_key(api_key.trim().to_string());
                config.save_to(&path)?;
                println!("Saved configuration to {}", path.display());
            }
        }

        Ok(())
    }
}

/// Run one check and render the result as a JSON line.
async fn check_once(service: &WeatherCheckService, zipcode: &str) -> anyhow::Result<String> {
    let result = service.check_weather(zipcode).await?;
    serde_json::to_string(&result).context("Failed to encode result")
}
