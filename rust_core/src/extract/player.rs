//! Team list, roster and per-player season profile extraction.

use super::{required, required_array, required_i64, required_str};
use crate::error::ExtractError;
use crate::models::{FlatRecord, Scalar};
use serde_json::Value;

/// Number of trailing profile keys left out of a season profile.
///
/// The player payload ends with nested team/position sub-objects that are
/// replaced by the roster's own `position`/`team`/`team_id` columns.
pub const PROFILE_TRAILING_KEYS_DROPPED: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRef {
    pub id: i64,
    pub name: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub person_id: i64,
    pub full_name: String,
    pub person_link: String,
    pub position_code: String,
}

impl RosterEntry {
    pub fn is_goalie(&self) -> bool {
        self.position_code == "G"
    }
}

/// Teams listed by `/api/v1/teams`.
pub fn teams(doc: &Value) -> Result<Vec<TeamRef>, ExtractError> {
    required_array(doc, "/teams")?
        .iter()
        .map(|team| {
            Ok(TeamRef {
                id: required_i64(team, "/id")?,
                name: required_str(team, "/name")?.to_string(),
                link: required_str(team, "/link")?.to_string(),
            })
        })
        .collect()
}

/// Roster entries of a team roster document.
///
/// Accepts both the plain roster shape (`roster: [...]`) and the expanded
/// team shape (`teams[0].roster.roster`).
pub fn roster_entries(doc: &Value) -> Result<Vec<RosterEntry>, ExtractError> {
    let entries = match doc.pointer("/roster").and_then(Value::as_array) {
        Some(entries) => entries,
        None => required_array(doc, "/teams/0/roster/roster")?,
    };

    entries
        .iter()
        .map(|entry| {
            Ok(RosterEntry {
                person_id: required_i64(entry, "/person/id")?,
                full_name: required_str(entry, "/person/fullName")?.to_string(),
                person_link: required_str(entry, "/person/link")?.to_string(),
                position_code: required_str(entry, "/position/code")?.to_string(),
            })
        })
        .collect()
}

/// Merge one player's profile and season stat splits into a flat record.
///
/// Returns `Ok(None)` when the player has no single-season split. The
/// goals-by-situation columns are added only when that document has a split.
pub fn player_season_profile(
    person_doc: &Value,
    entry: &RosterEntry,
    team: &TeamRef,
    season_stats_doc: &Value,
    situation_doc: Option<&Value>,
) -> Result<Option<FlatRecord>, ExtractError> {
    let split = match season_stats_doc.pointer("/stats/0/splits/0") {
        Some(split) => split,
        None => return Ok(None),
    };

    let profile = required(person_doc, "/people/0")?
        .as_object()
        .ok_or_else(|| ExtractError::UnexpectedType {
            path: "/people/0".to_string(),
            expected: "an object",
        })?;

    let mut record = FlatRecord::new();
    let kept = profile.len().saturating_sub(PROFILE_TRAILING_KEYS_DROPPED);
    for (key, value) in profile.iter().take(kept) {
        record.set(key.as_str(), Scalar::from(value));
    }

    record.set("position", entry.position_code.as_str());
    record.set("team", team.name.as_str());
    record.set("team_id", team.id);
    record.set(
        "season_type",
        required(season_stats_doc, "/stats/0/type/gameType/id")?,
    );
    record.set("season", required(split, "/season")?);
    record.extend_from_object(required(split, "/stat")?);

    if let Some(situation) = situation_doc.and_then(|doc| doc.pointer("/stats/0/splits/0/stat")) {
        record.extend_from_object(situation);
    }

    Ok(Some(record))
}
