//! Collectors that walk identifiers, fetch documents and feed the extractors.
//!
//! Requests are awaited one at a time. A failed fetch or extraction is logged
//! and contributes zero records; iteration always continues.

pub mod games;
pub mod players;
pub mod salaries;

pub use games::{collect_games, collect_season_games, collect_season_range, SeasonTables};
pub use players::collect_player_profiles;
pub use salaries::{collect_salaries, collect_skater_seasons, SALARY_TEAM_SLUGS};
