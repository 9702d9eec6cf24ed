//! Season walk over regular-season game feeds.

use crate::clients::DocumentSource;
use crate::error::{ExtractError, ScrapeError};
use crate::extract::{self, extract_game};
use crate::models::{FlatRecord, GameId, OutputTable, RecordKind};
use crate::season_config::season_game_ids;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Log progress every this many game IDs.
const PROGRESS_EVERY: usize = 100;

/// The five per-game tables of one or more seasons, in season then game-ID
/// order.
#[derive(Debug, Clone)]
pub struct SeasonTables {
    years: Vec<i32>,
    tables: Vec<OutputTable>,
}

impl SeasonTables {
    pub fn new(year: i32) -> Self {
        Self {
            years: vec![year],
            tables: RecordKind::GAME_TABLES
                .iter()
                .map(|kind| OutputTable::new(*kind))
                .collect(),
        }
    }

    pub fn table(&self, kind: RecordKind) -> Option<&OutputTable> {
        self.tables.iter().find(|t| t.kind == kind)
    }

    pub fn tables(&self) -> &[OutputTable] {
        &self.tables
    }

    /// Season-start years covered, in collection order.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Append a later season's rows after this one's, kind by kind.
    pub fn append(&mut self, other: SeasonTables) {
        self.years.extend(other.years);
        for table in other.tables {
            self.extend(table.kind, table.into_records());
        }
    }

    fn extend(&mut self, kind: RecordKind, records: Vec<FlatRecord>) {
        if let Some(table) = self.tables.iter_mut().find(|t| t.kind == kind) {
            table.extend(records);
        }
    }
}

/// Fetch one game's live feed.
pub async fn fetch_game<S>(source: &S, id: GameId) -> Result<Value, ScrapeError>
where
    S: DocumentSource + ?Sized,
{
    Ok(source.get_json(&id.feed_path()).await?)
}

/// Walk every regular-season game ID of a season.
pub async fn collect_season_games<S>(source: &S, year: i32) -> SeasonTables
where
    S: DocumentSource + ?Sized,
{
    let start = Instant::now();
    info!(
        "Scraping {}/{} regular season games from {}",
        year,
        year + 1,
        source.source_name()
    );
    let tables = collect_games(source, year, season_game_ids(year)).await;
    info!(
        "Season {} scraped in {:.2} minutes",
        year,
        start.elapsed().as_secs_f64() / 60.0
    );
    tables
}

/// Walk several seasons in the given order and join their tables.
///
/// Returns `None` when `years` is empty.
pub async fn collect_season_range<S>(source: &S, years: &[i32]) -> Option<SeasonTables>
where
    S: DocumentSource + ?Sized,
{
    let mut joined: Option<SeasonTables> = None;
    for &year in years {
        let tables = collect_season_games(source, year).await;
        match joined.as_mut() {
            Some(all) => all.append(tables),
            None => joined = Some(tables),
        }
    }
    joined
}

/// Fetch each game once and run all five extractors over it.
pub async fn collect_games<S, I>(source: &S, year: i32, ids: I) -> SeasonTables
where
    S: DocumentSource + ?Sized,
    I: IntoIterator<Item = GameId>,
{
    let mut tables = SeasonTables::new(year);
    let mut attempted = 0usize;
    let mut fetched = 0usize;

    for id in ids {
        attempted += 1;
        if attempted % PROGRESS_EVERY == 0 {
            info!("{} game IDs attempted, {} found", attempted, fetched);
        }

        let doc = match fetch_game(source, id).await {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Game {} not found: {}", id, e);
                continue;
            }
        };
        fetched += 1;

        let mut extraction = extract_game(&doc);
        for kind in RecordKind::GAME_TABLES {
            match extraction.take(kind) {
                Ok(records) => {
                    debug!("Game {}: {} {} records", id, records.len(), kind.file_stem());
                    tables.extend(kind, records);
                }
                Err(e) => warn!("Game {}: dropped {}: {}", id, kind.description(), e),
            }
        }
    }

    for table in tables.tables() {
        info!("{}: {} records", table.kind.description(), table.len());
    }
    tables
}

async fn single_game<S, T>(
    source: &S,
    id: GameId,
    extractor: fn(&Value) -> Result<T, ExtractError>,
) -> Result<T, ScrapeError>
where
    S: DocumentSource + ?Sized,
{
    let doc = fetch_game(source, id).await?;
    Ok(extractor(&doc)?)
}

pub async fn game_result_for<S>(source: &S, id: GameId) -> Result<FlatRecord, ScrapeError>
where
    S: DocumentSource + ?Sized,
{
    single_game(source, id, extract::game_result).await
}

pub async fn game_officials_for<S>(source: &S, id: GameId) -> Result<Vec<FlatRecord>, ScrapeError>
where
    S: DocumentSource + ?Sized,
{
    single_game(source, id, extract::game_officials).await
}

pub async fn team_stats_for<S>(source: &S, id: GameId) -> Result<Vec<FlatRecord>, ScrapeError>
where
    S: DocumentSource + ?Sized,
{
    single_game(source, id, extract::team_game_stats).await
}

pub async fn player_stats_for<S>(source: &S, id: GameId) -> Result<Vec<FlatRecord>, ScrapeError>
where
    S: DocumentSource + ?Sized,
{
    single_game(source, id, extract::player_game_stats).await
}

pub async fn goalie_stats_for<S>(source: &S, id: GameId) -> Result<Vec<FlatRecord>, ScrapeError>
where
    S: DocumentSource + ?Sized,
{
    single_game(source, id, extract::goalie_game_stats).await
}
