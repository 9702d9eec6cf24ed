//! Game Scraper
//!
//! Walks every regular-season game ID of one season and writes five tables:
//! game results, officials, team stats, skater stats and goalie stats, each
//! suffixed with the season start year. With `--to` the seasons of the range
//! are joined in year order into unsuffixed tables.

mod config;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use config::{Args, RunConfig};
use dotenv::dotenv;
use nhl_scrape_core::export::write_table_file;
use nhl_scrape_core::providers::collect_season_range;
use nhl_scrape_core::{ScrapeConfig, StatsApiClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let run = RunConfig::from_args(&args, chrono::Local::now().year())?;

    let config = ScrapeConfig::from_env();
    let client = StatsApiClient::new(&config);
    info!(
        "Starting game scraper for seasons {:?} against {}",
        run.seasons,
        client.base_url()
    );

    let tables = collect_season_range(&client, &run.seasons)
        .await
        .context("No seasons to scrape")?;

    for table in tables.tables() {
        let name = run.table_file_name(table.kind);
        write_table_file(table, &run.data_dir, &name)
            .with_context(|| format!("Failed to save {}", name))?;
    }

    info!("Seasons {:?} complete", tables.years());
    Ok(())
}
