//! Per-player season profiles: teams -> rosters -> player documents.

use crate::clients::DocumentSource;
use crate::error::ScrapeError;
use crate::extract::{player_season_profile, roster_entries, teams, RosterEntry, TeamRef};
use crate::models::{FlatRecord, OutputTable, RecordKind};
use crate::season_config::season_param;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const TEAMS_PATH: &str = "/api/v1/teams";

fn roster_path(team: &TeamRef, season: &str) -> String {
    format!("{}/roster?expand=team.roster&season={}", team.link, season)
}

fn stats_path(entry: &RosterEntry, stat: &str, season: &str) -> String {
    format!("{}/stats?stats={}&season={}", entry.person_link, stat, season)
}

/// Profiles of every non-goalie rostered player for the season starting in
/// `year`.
///
/// Only a failure to list the teams is returned; roster and player failures
/// are logged and skipped.
pub async fn collect_player_profiles<S>(source: &S, year: i32) -> Result<OutputTable, ScrapeError>
where
    S: DocumentSource + ?Sized,
{
    let start = Instant::now();
    let season = season_param(year);
    let mut table = OutputTable::new(RecordKind::PlayerSeasonProfile);

    let teams_doc = source.get_json(TEAMS_PATH).await?;
    let teams = teams(&teams_doc)?;
    info!("Collecting {} player profiles for {} teams", season, teams.len());

    for team in &teams {
        let roster = match source.get_json(&roster_path(team, &season)).await {
            Ok(doc) => match roster_entries(&doc) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Roster for {} {} unreadable: {}", team.name, season, e);
                    continue;
                }
            },
            Err(e) => {
                warn!("Roster for {} {} not found: {}", team.name, season, e);
                continue;
            }
        };

        for entry in roster.iter().filter(|e| !e.is_goalie()) {
            match player_profile(source, team, entry, &season).await {
                Ok(Some(record)) => table.push(record),
                Ok(None) => debug!("{} has no {} stats, skipped", entry.full_name, season),
                Err(e) => warn!("Player {} ({}) skipped: {}", entry.full_name, entry.person_id, e),
            }
        }
    }

    info!(
        "{}: {} records in {:.2} minutes",
        table.kind.description(),
        table.len(),
        start.elapsed().as_secs_f64() / 60.0
    );
    Ok(table)
}

async fn player_profile<S>(
    source: &S,
    team: &TeamRef,
    entry: &RosterEntry,
    season: &str,
) -> Result<Option<FlatRecord>, ScrapeError>
where
    S: DocumentSource + ?Sized,
{
    let person = source.get_json(&entry.person_link).await?;
    let season_stats = source
        .get_json(&stats_path(entry, "statsSingleSeason", season))
        .await?;

    // Situation splits are optional; a failed fetch only drops those columns
    let situation = match source
        .get_json(&stats_path(entry, "goalsByGameSituation", season))
        .await
    {
        Ok(doc) => Some(doc),
        Err(e) => {
            debug!("No situation splits for {}: {}", entry.full_name, e);
            None
        }
    };

    Ok(player_season_profile(
        &person,
        entry,
        team,
        &season_stats,
        situation.as_ref(),
    )?)
}
