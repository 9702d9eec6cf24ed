//! Regular-season game identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Game type literal for regular-season games.
pub const REGULAR_SEASON: &str = "02";

/// `<season-start-year>02<4-digit game number>`, e.g. `2019020300`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId {
    pub season: i32,
    pub number: u32,
}

impl GameId {
    pub fn regular_season(season: i32, number: u32) -> Self {
        Self { season, number }
    }

    /// Path of the live feed document for this game.
    pub fn feed_path(&self) -> String {
        format!("/api/v1/game/{}/feed/live", self)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{:04}", self.season, REGULAR_SEASON, self.number)
    }
}
