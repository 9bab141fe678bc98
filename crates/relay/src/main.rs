//! Relay - Entry Point
//!
//! Loads configuration, initializes logging, runs one command and prints
//! its JSON result.

// Force-link relay-providers to ensure linkme registrations are included
extern crate relay_providers;

use anyhow::Context;
use clap::Parser;
use relay::cli::{Cli, execute};
use relay_infrastructure::{ConfigLoader, init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(&config.logging)?;

    let output = execute(&cli.command, config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
