//! Command line entry point for the campsite gap finder.
//! Reads a JSON input document, runs the gap search and prints the campsites
//! the requested reservation can be placed at.

mod config;
mod report;

use anyhow::Context;
use clap::Parser;
use gap_search::SearchCoordinator;

use crate::config::{Cli, FinderConfig, LOG_ENV, OutputFormat};

fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = FinderConfig::from(Cli::parse());

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().filter_or(LOG_ENV, config.log_filter()));

    log::debug!("🏕️ Gap finder running with {:?}", config);

    if let Err(e) = run(&config) {
        log::error!("❌ Search failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(config: &FinderConfig) -> anyhow::Result<()> {
    let input = campspot_input::load_from_path(&config.input)
        .with_context(|| format!("Failed to load {}", config.input.display()))?;

    let report = SearchCoordinator::new(&input.dataset).search(input.window);

    let rendered = match config.format {
        OutputFormat::Text => report::render_text(&report),
        OutputFormat::Json => report::render_json(&report).context("Failed to encode report")?,
    };
    print!("{}", rendered);

    log::info!("✅ Search finished");
    Ok(())
}
