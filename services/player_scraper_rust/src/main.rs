//! Player Scraper
//!
//! Player-level tables over a range of seasons:
//! - league skater season tables (`player_season.csv`)
//! - team salary pages (`player_salary.csv`)
//! - per-player season profiles from the stats API (`player_profiles_{year}.csv`)

mod config;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use config::{Args, RunConfig};
use dotenv::dotenv;
use nhl_scrape_core::export::{file_name, season_file_name, write_table_file};
use nhl_scrape_core::providers::{
    collect_player_profiles, collect_salaries, collect_skater_seasons, SALARY_TEAM_SLUGS,
};
use nhl_scrape_core::{ScrapeConfig, StatsApiClient};
use tracing::{info, warn};
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
    info!("Starting player scraper for seasons {:?}", run.seasons);

    if run.skaters {
        let table = collect_skater_seasons(&client, &config, &run.season_end_years()).await;
        let name = file_name(table.kind);
        write_table_file(&table, &run.data_dir, &name)
            .with_context(|| format!("Failed to save {}", name))?;
    }

    if run.salaries {
        let table = collect_salaries(&client, &config, &run.seasons, &SALARY_TEAM_SLUGS).await;
        let name = file_name(table.kind);
        write_table_file(&table, &run.data_dir, &name)
            .with_context(|| format!("Failed to save {}", name))?;
    }

    if run.profiles {
        for &year in &run.seasons {
            let table = match collect_player_profiles(&client, year).await {
                Ok(table) => table,
                Err(e) => {
                    warn!("Player profiles for {} unavailable: {}", year, e);
                    continue;
                }
            };
            let name = season_file_name(table.kind, year);
            write_table_file(&table, &run.data_dir, &name)
                .with_context(|| format!("Failed to save {}", name))?;
        }
    }

    info!("Player scrape complete");
    Ok(())
}
