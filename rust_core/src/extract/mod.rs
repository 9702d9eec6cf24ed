//! Flattening rules from raw documents to flat records.
//!
//! Every extractor is a pure function of its input documents. Fixed columns
//! are declared as `FieldRule`s with a JSON pointer and a presence policy;
//! stats blocks are passed through key-by-key in payload order.

use crate::error::ExtractError;
use crate::models::{FlatRecord, RecordKind, Scalar};
use serde_json::Value;

pub mod game;
pub mod player;
pub mod tables;

pub use game::{
    extract_game, game_fixed_columns, game_officials, game_result, goalie_game_stats,
    player_game_stats, team_game_stats, GameExtraction,
};
pub use player::{player_season_profile, roster_entries, teams, RosterEntry, TeamRef};
pub use tables::{
    salary_output_columns, salary_records, skater_output_columns, skater_season_records,
    HtmlTable, SALARY_COLUMNS, SKATER_COLUMNS,
};

/// Columns known before any record is seen, used as the header of an empty
/// table. Kinds whose columns all come from the payload have none.
pub fn fixed_columns(kind: RecordKind) -> Vec<&'static str> {
    match kind {
        RecordKind::PlayerSalary => salary_output_columns(),
        RecordKind::PlayerSeasonTable => skater_output_columns(),
        RecordKind::PlayerSeasonProfile => Vec::new(),
        _ => game_fixed_columns(kind),
    }
}

/// What happens when a field's pointer does not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absence drops the whole record (or the whole document's output).
    Required,
    /// Absence leaves the column out of the record.
    Optional,
}

/// One fixed output column. `{side}` in the pointer is replaced by
/// `home`/`away` for per-side records.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub column: &'static str,
    pub pointer: &'static str,
    pub presence: Presence,
}

impl FieldRule {
    pub const fn required(column: &'static str, pointer: &'static str) -> Self {
        Self {
            column,
            pointer,
            presence: Presence::Required,
        }
    }

    pub const fn optional(column: &'static str, pointer: &'static str) -> Self {
        Self {
            column,
            pointer,
            presence: Presence::Optional,
        }
    }

    fn pointer_for(&self, side: Option<Side>) -> String {
        match side {
            Some(side) => self.pointer.replace("{side}", side.as_str()),
            None => self.pointer.to_string(),
        }
    }
}

/// Home or away, always visited in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

/// Resolve a pointer, failing with the pointer as the missing path.
pub fn required<'a>(doc: &'a Value, pointer: &str) -> Result<&'a Value, ExtractError> {
    doc.pointer(pointer).ok_or_else(|| ExtractError::MissingField {
        path: pointer.to_string(),
    })
}

pub fn optional<'a>(doc: &'a Value, pointer: &str) -> Option<&'a Value> {
    doc.pointer(pointer)
}

pub fn required_i64(doc: &Value, pointer: &str) -> Result<i64, ExtractError> {
    required(doc, pointer)?
        .as_i64()
        .ok_or_else(|| ExtractError::UnexpectedType {
            path: pointer.to_string(),
            expected: "an integer",
        })
}

pub fn required_str<'a>(doc: &'a Value, pointer: &str) -> Result<&'a str, ExtractError> {
    required(doc, pointer)?
        .as_str()
        .ok_or_else(|| ExtractError::UnexpectedType {
            path: pointer.to_string(),
            expected: "a string",
        })
}

pub fn required_array<'a>(doc: &'a Value, pointer: &str) -> Result<&'a Vec<Value>, ExtractError> {
    required(doc, pointer)?
        .as_array()
        .ok_or_else(|| ExtractError::UnexpectedType {
            path: pointer.to_string(),
            expected: "an array",
        })
}

/// Write every rule's value into the record, in rule order.
pub fn apply_rules(
    doc: &Value,
    rules: &[FieldRule],
    side: Option<Side>,
    record: &mut FlatRecord,
) -> Result<(), ExtractError> {
    for rule in rules {
        let pointer = rule.pointer_for(side);
        match (doc.pointer(&pointer), rule.presence) {
            (Some(value), _) => record.set(rule.column, Scalar::from(value)),
            (None, Presence::Optional) => {}
            (None, Presence::Required) => {
                return Err(ExtractError::MissingField { path: pointer });
            }
        }
    }
    Ok(())
}

/// `true` iff home goals exceed away goals; a tie is `false`.
pub fn home_team_win(home_goals: i64, away_goals: i64) -> bool {
    home_goals > away_goals
}

/// Final linescore goals as `(home, away)`.
pub fn linescore_goals(doc: &Value) -> Result<(i64, i64), ExtractError> {
    Ok((
        required_i64(doc, "/liveData/linescore/teams/home/goals")?,
        required_i64(doc, "/liveData/linescore/teams/away/goals")?,
    ))
}
