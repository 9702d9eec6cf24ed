//! Command-line configuration for the game scraper.
//!
//! Every check here runs before the first request; a bad argument aborts the
//! whole run.

use clap::Parser;
use nhl_scrape_core::export::{file_name, season_file_name};
use nhl_scrape_core::RecordKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(
    name = "game_scraper",
    about = "Scrape one regular season of game results, officials and box-score stats"
)]
pub struct Args {
    /// Season start year, e.g. 2019 for the 2019/2020 season
    pub year: String,

    /// Existing directory the CSV files are written to
    pub data_dir: PathBuf,

    /// Last season start year; joins every season from <year> into
    /// unsuffixed files such as game_results.csv
    #[arg(long = "to")]
    pub to: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("value for year must be numeric, got {0:?}")]
    NonNumericYear(String),

    #[error("--to {to} is before year {year}")]
    EmptyRange { year: i32, to: i32 },

    #[error("year {year} is in the future (current year is {current})")]
    FutureYear { year: i32, current: i32 },

    #[error("the data directory {0} must exist")]
    MissingDirectory(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Season start years, ascending
    pub seasons: Vec<i32>,
    pub data_dir: PathBuf,
    /// Whether seasons are joined into unsuffixed files
    pub joined: bool,
}

fn parse_year(raw: &str) -> Result<i32, ConfigError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ConfigError::NonNumericYear(raw.to_string()))
}

impl RunConfig {
    pub fn from_args(args: &Args, current_year: i32) -> Result<Self, ConfigError> {
        let year = parse_year(&args.year)?;
        let to = match &args.to {
            Some(raw) => Some(parse_year(raw)?),
            None => None,
        };
        let last = to.unwrap_or(year);
        if last < year {
            return Err(ConfigError::EmptyRange { year, to: last });
        }
        if last > current_year {
            return Err(ConfigError::FutureYear {
                year: last,
                current: current_year,
            });
        }
        if !args.data_dir.is_dir() {
            return Err(ConfigError::MissingDirectory(args.data_dir.clone()));
        }

        Ok(Self {
            seasons: (year..=last).collect(),
            data_dir: args.data_dir.clone(),
            joined: to.is_some(),
        })
    }

    /// `game_results_2019.csv` for a single season, `game_results.csv` for a
    /// joined range.
    pub fn table_file_name(&self, kind: RecordKind) -> String {
        match self.seasons.as_slice() {
            [year] if !self.joined => season_file_name(kind, *year),
            _ => file_name(kind),
        }
    }
}
