//! Main entry point for the catalog tool.

use anyhow::{Context, Result};
use clap::Parser;
use iris_catalog::{commands, logging, Cli};
use iris_config::load_config;
use std::io;
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = &cli.translations_dir {
        config.i18n.translations_dir.clone_from(dir);
    }

    logging::init_logging(&config.logging)?;
    info!(
        translations_dir = %config.i18n.translations_dir.display(),
        "Starting iris-catalog"
    );

    let stdout = io::stdout();
    if let Err(e) = commands::run(&config, &cli.command, &mut stdout.lock()) {
        error!("Command failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
