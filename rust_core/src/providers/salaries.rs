//! Salary and league skater tables scraped from HTML pages.

use crate::clients::DocumentSource;
use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::extract::{salary_records, skater_season_records};
use crate::models::{OutputTable, RecordKind};
use crate::season_config::season_label;
use std::time::Instant;
use tracing::{info, warn};

/// Team slugs as used by the salary site.
pub const SALARY_TEAM_SLUGS: [&str; 31] = [
    "anaheim-ducks",
    "arizona-coyotes",
    "boston-bruins",
    "buffalo-sabres",
    "calgary-flames",
    "carolina-hurricanes",
    "chicago-blackhawks",
    "colorado-avalanche",
    "columbus-blue-jackets",
    "dallas-stars",
    "detroit-red-wings",
    "edmonton-oilers",
    "florida-panthers",
    "los-angeles-kings",
    "minnesota-wild",
    "montreal-canadiens",
    "nashville-predators",
    "new-jersey-devils",
    "new-york-islanders",
    "new-york-rangers",
    "ottawa-senators",
    "philadelphia-flyers",
    "pittsburgh-penguins",
    "san-jose-sharks",
    "st-louis-blues",
    "tampa-bay-lightning",
    "toronto-maple-leafs",
    "vancouver-canucks",
    "vegas-golden-knights",
    "washington-capitals",
    "winnipeg-jets",
];

/// Salary rows for every (year, team) pair, sorted by player then season.
///
/// An unavailable or unparseable page contributes no rows.
pub async fn collect_salaries<S>(
    source: &S,
    config: &ScrapeConfig,
    years: &[i32],
    teams: &[&str],
) -> OutputTable
where
    S: DocumentSource + ?Sized,
{
    let start = Instant::now();
    let mut table = OutputTable::new(RecordKind::PlayerSalary);

    for &year in years {
        for &team in teams {
            let url = config.salary_url(team, year);
            let html = match source.get_page(&url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(
                        "Salary data not available for {} for {} season: {}",
                        team,
                        season_label(year),
                        e
                    );
                    continue;
                }
            };
            match salary_records(&html, team, year) {
                Ok(records) => table.extend(records),
                Err(e) => warn!(
                    "Salary data not available for {} for {} season: {}",
                    team,
                    season_label(year),
                    e
                ),
            }
        }
    }

    table.sort_by_columns(&["player", "season"]);
    info!(
        "{}: {} records in {:.2} minutes",
        table.kind.description(),
        table.len(),
        start.elapsed().as_secs_f64() / 60.0
    );
    table
}

/// League skater season tables for each season-end year, in year order.
pub async fn collect_skater_seasons<S>(source: &S, config: &ScrapeConfig, years: &[i32]) -> OutputTable
where
    S: DocumentSource + ?Sized,
{
    let mut table = OutputTable::new(RecordKind::PlayerSeasonTable);

    for &year in years {
        let url = config.skater_table_url(year);
        let records = match source.get_page(&url).await {
            Ok(html) => skater_season_records(&html, year).map_err(ScrapeError::from),
            Err(e) => Err(ScrapeError::from(e)),
        };
        match records {
            Ok(records) => table.extend(records),
            Err(e) => warn!("Skater table for {} season unavailable: {}", season_label(year - 1), e),
        }
    }

    info!("{}: {} records", table.kind.description(), table.len());
    table
}
