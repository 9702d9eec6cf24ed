use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(
    name = "player_scraper",
    about = "Scrape player season tables, salaries and per-player season profiles"
)]
pub struct Args {
    /// Existing directory the CSV files are written to
    pub data_dir: PathBuf,

    /// First season start year
    #[arg(long = "from")]
    pub from: i32,

    /// Last season start year (inclusive); defaults to --from
    #[arg(long = "to")]
    pub to: Option<i32>,

    /// Skip the league skater season tables
    #[arg(long)]
    pub skip_skaters: bool,

    /// Skip the team salary pages
    #[arg(long)]
    pub skip_salaries: bool,

    /// Skip the per-player season profiles
    #[arg(long)]
    pub skip_profiles: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--from {from} is after --to {to}")]
    EmptyRange { from: i32, to: i32 },

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
    pub skaters: bool,
    pub salaries: bool,
    pub profiles: bool,
}

impl RunConfig {
    pub fn from_args(args: &Args, current_year: i32) -> Result<Self, ConfigError> {
        let to = args.to.unwrap_or(args.from);
        if args.from > to {
            return Err(ConfigError::EmptyRange { from: args.from, to });
        }
        if to > current_year {
            return Err(ConfigError::FutureYear {
                year: to,
                current: current_year,
            });
        }
        if !args.data_dir.is_dir() {
            return Err(ConfigError::MissingDirectory(args.data_dir.clone()));
        }

        Ok(Self {
            seasons: (args.from..=to).collect(),
            data_dir: args.data_dir.clone(),
            skaters: !args.skip_skaters,
            salaries: !args.skip_salaries,
            profiles: !args.skip_profiles,
        })
    }

    /// Skater tables are keyed by the season's end year.
    pub fn season_end_years(&self) -> Vec<i32> {
        self.seasons.iter().map(|year| year + 1).collect()
    }
}
