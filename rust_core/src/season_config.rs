//! Regular-season schedule lengths.
//!
//! The schedule changed length twice: the 2012 lockout season and the
//! post-expansion schedule from 2017 on. Tiers are checked in order and the
//! first matching predicate wins.

use crate::models::GameId;
use std::ops::Range;

/// One schedule tier: a predicate on the season-start year and the exclusive
/// upper bound on regular-season game numbers.
#[derive(Debug, Clone, Copy)]
pub struct SeasonTier {
    pub label: &'static str,
    pub applies: fn(i32) -> bool,
    pub upper_bound: u32,
}

fn is_lockout_season(year: i32) -> bool {
    year == 2012
}

fn is_post_expansion_season(year: i32) -> bool {
    year >= 2017
}

fn any_season(_year: i32) -> bool {
    true
}

/// Static schedule tiers, evaluated in priority order. The last entry matches
/// every year.
pub static SEASON_TIERS: &[SeasonTier] = &[
    SeasonTier {
        label: "lockout",
        applies: is_lockout_season,
        upper_bound: 721,
    },
    SeasonTier {
        label: "post-expansion",
        applies: is_post_expansion_season,
        upper_bound: 1272,
    },
    SeasonTier {
        label: "thirty-team",
        applies: any_season,
        upper_bound: 1231,
    },
];

/// Tier for a season-start year.
pub fn season_tier(year: i32) -> &'static SeasonTier {
    SEASON_TIERS
        .iter()
        .find(|tier| (tier.applies)(year))
        .unwrap_or(&SEASON_TIERS[SEASON_TIERS.len() - 1])
}

/// Game numbers to attempt for a season: `[1, N)`.
pub fn game_number_range(year: i32) -> Range<u32> {
    1..season_tier(year).upper_bound
}

/// Every regular-season game ID to request for a season, in schedule order.
pub fn season_game_ids(year: i32) -> impl Iterator<Item = GameId> {
    game_number_range(year).map(move |n| GameId::regular_season(year, n))
}

/// `"{year}/{year+1}"`, the season label stamped on salary rows.
pub fn season_label(start_year: i32) -> String {
    format!("{}/{}", start_year, start_year + 1)
}

/// `"{year}{year+1}"`, the season parameter of the stats API.
pub fn season_param(start_year: i32) -> String {
    format!("{}{}", start_year, start_year + 1)
}
