//! Binary crate for the `weather-check` service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Serving the weather check over HTTP
//! - Interactive configuration

use clap::Parser;

mod cli;
mod logging;
mod web;

#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    logging::init_logger(cmd.verbose);
    cmd.run().await
}
