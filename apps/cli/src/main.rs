mod args;
mod render;

use crate::args::{Cli, Commands, OutputFormat};
use anyhow::{Context, Result};
use autoapi::ConventionConfig;
use autoapi::domain::settings::Settings;
use autoapi::kernel::config::load_settings;
use autoapi::kernel::inventory::load_inventory;
use autoapi_logger::Logger;
use clap::Parser;
use std::io::Write;
use std::path::Path;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.settings.as_deref())?;
    let _logger = Logger::from_settings(env!("CARGO_PKG_NAME"), &settings.logging, cli.verbose)?;

    match cli.command {
        Commands::Routes { inventory, format } => routes(&settings, &inventory, format)?,
        Commands::Check {} => check(&settings)?,
    }

    Ok(())
}

fn routes(settings: &Settings, inventory: &Path, format: OutputFormat) -> Result<()> {
    let modules = load_inventory(inventory)?;
    let table = autoapi::generate(settings, &modules)?;

    let mut out = std::io::stdout().lock();
    render::routes(&mut out, &table, format).context("Failed to write routes")?;
    out.flush()?;
    Ok(())
}

fn check(settings: &Settings) -> Result<()> {
    let config = ConventionConfig::from_settings(&settings.auto_api)?;
    info!(enabled = settings.auto_api.enable, "Settings are valid");

    let mut out = std::io::stdout().lock();
    render::config(&mut out, &config).context("Failed to write config")?;
    out.flush()?;
    Ok(())
}
