//! NHL Scrape Core - flat statistics tables from game feeds and stat pages.
//!
//! This crate provides:
//! - Regular-season game-ID ranges per season
//! - A document source seam with an HTTP client for the statistics API
//! - Extractors that flatten game, roster, player and salary documents into
//!   ordered column/value records
//! - Sequential collectors that walk seasons, rosters and team pages, logging
//!   and skipping any ID that fails
//! - CSV export of the collected tables

pub mod clients;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod models;
pub mod providers;
pub mod season_config;

pub use clients::{DocumentSource, StatsApiClient};
pub use config::ScrapeConfig;
pub use error::{ExtractError, FetchError, ScrapeError};
pub use models::{FlatRecord, GameId, OutputTable, RecordKind, Scalar};
pub use season_config::{game_number_range, season_game_ids};
