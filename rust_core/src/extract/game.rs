//! Per-game extractors over the live feed document.

use super::{
    apply_rules, home_team_win, linescore_goals, optional, required, required_str, FieldRule,
    Side,
};
use crate::error::ExtractError;
use crate::models::{FlatRecord, RecordKind};
use serde_json::Value;

static GAME_RESULT_FIELDS: &[FieldRule] = &[
    FieldRule::required("gameID", "/gamePk"),
    FieldRule::required("season", "/gameData/game/season"),
    FieldRule::required("dateTime", "/gameData/datetime/dateTime"),
    FieldRule::required("gameType", "/gameData/game/type"),
    FieldRule::required("homeTeamID", "/gameData/teams/home/id"),
    FieldRule::required("homeTeamName", "/gameData/teams/home/name"),
    FieldRule::required("awayTeamID", "/gameData/teams/away/id"),
    FieldRule::required("awayTeamName", "/gameData/teams/away/name"),
    FieldRule::required("homeGoals", "/liveData/linescore/teams/home/goals"),
    FieldRule::required("awayGoals", "/liveData/linescore/teams/away/goals"),
];

static TEAM_STAT_FIELDS: &[FieldRule] = &[
    FieldRule::required("periodsPlayed", "/liveData/linescore/currentPeriod"),
    // Only the first coach is read
    FieldRule::required(
        "headCoach",
        "/liveData/boxscore/teams/{side}/coaches/0/person/fullName",
    ),
    FieldRule::required("teamID", "/gameData/teams/{side}/id"),
    FieldRule::required("teamName", "/gameData/teams/{side}/name"),
];

static PLAYER_FIELDS: &[FieldRule] = &[
    FieldRule::required("playerID", "/person/id"),
    FieldRule::required("fullName", "/person/fullName"),
    FieldRule::required("position", "/position/code"),
];

static SIDE_TEAM_FIELDS: &[FieldRule] = &[
    FieldRule::required("teamID", "/gameData/teams/{side}/id"),
    FieldRule::required("teamName", "/gameData/teams/{side}/name"),
];

/// Exactly one record per game.
pub fn game_result(doc: &Value) -> Result<FlatRecord, ExtractError> {
    let mut record = FlatRecord::new();
    apply_rules(doc, GAME_RESULT_FIELDS, None, &mut record)?;

    let (home, away) = linescore_goals(doc)?;
    record.set("homeTeamWin", home_team_win(home, away));

    apply_rules(
        doc,
        &[FieldRule::required("venue", "/gameData/venue/name")],
        None,
        &mut record,
    )?;
    Ok(record)
}

static OFFICIAL_FIELDS: &[FieldRule] = &[
    FieldRule::required("officialName", "/official/fullName"),
    FieldRule::required("officialType", "/officialType"),
];

/// One record per listed official. An absent officials list yields nothing.
///
/// The list is read in order up to the first malformed entry; officials
/// before it are kept and the rest of the list is ignored.
pub fn game_officials(doc: &Value) -> Result<Vec<FlatRecord>, ExtractError> {
    let officials = match optional(doc, "/liveData/boxscore/officials").and_then(Value::as_array)
    {
        Some(list) if !list.is_empty() => list,
        _ => return Ok(Vec::new()),
    };
    let game_id = required(doc, "/gamePk")?;

    let mut records = Vec::with_capacity(officials.len());
    for official in officials {
        let mut record = FlatRecord::new();
        record.set("gameID", game_id);
        if apply_rules(official, OFFICIAL_FIELDS, None, &mut record).is_err() {
            break;
        }
        records.push(record);
    }
    Ok(records)
}

fn rule_columns(rules: &[FieldRule]) -> impl Iterator<Item = &'static str> + '_ {
    rules.iter().map(|rule| rule.column)
}

/// Leading columns every record of a game table carries, in output order.
/// Stats pass-through columns are not included.
pub fn game_fixed_columns(kind: RecordKind) -> Vec<&'static str> {
    let mut columns = Vec::new();
    match kind {
        RecordKind::GameResult => {
            columns.extend(rule_columns(GAME_RESULT_FIELDS));
            columns.extend(["homeTeamWin", "venue"]);
        }
        RecordKind::GameOfficial => {
            columns.push("gameID");
            columns.extend(rule_columns(OFFICIAL_FIELDS));
        }
        RecordKind::TeamGameStat => {
            columns.extend(["gameID", "homeAway", "homeTeamWin"]);
            columns.extend(rule_columns(TEAM_STAT_FIELDS));
        }
        RecordKind::PlayerGameStat | RecordKind::GoalieGameStat => {
            columns.push("gameID");
            columns.extend(rule_columns(PLAYER_FIELDS));
            columns.push("homeAway");
            columns.extend(rule_columns(SIDE_TEAM_FIELDS));
        }
        _ => {}
    }
    columns
}

/// Two records, home then away, or none at all.
pub fn team_game_stats(doc: &Value) -> Result<Vec<FlatRecord>, ExtractError> {
    let game_id = required(doc, "/gamePk")?;
    let (home, away) = linescore_goals(doc)?;
    let win = home_team_win(home, away);

    let mut records = Vec::with_capacity(2);
    for side in Side::BOTH {
        let mut record = FlatRecord::new();
        record.set("gameID", game_id);
        record.set("homeAway", side.as_str());
        record.set("homeTeamWin", win);
        apply_rules(doc, TEAM_STAT_FIELDS, Some(side), &mut record)?;

        let stats_path = format!(
            "/liveData/boxscore/teams/{}/teamStats/teamSkaterStats",
            side.as_str()
        );
        let stats = required(doc, &stats_path)?;
        if !stats.is_object() {
            return Err(ExtractError::UnexpectedType {
                path: stats_path,
                expected: "an object",
            });
        }
        record.extend_from_object(stats);
        records.push(record);
    }
    Ok(records)
}

/// Which boxscore roster entries an extractor takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterSelection {
    /// Everything except goalies and `N/A` entries
    Skaters,
    Goalies,
}

impl RosterSelection {
    pub fn selects(&self, position_code: &str) -> bool {
        match self {
            RosterSelection::Skaters => !matches!(position_code, "N/A" | "G"),
            RosterSelection::Goalies => position_code == "G",
        }
    }

    /// Key of the per-player stats block under `stats`.
    pub fn stats_key(&self) -> &'static str {
        match self {
            RosterSelection::Skaters => "skaterStats",
            RosterSelection::Goalies => "goalieStats",
        }
    }
}

pub fn player_game_stats(doc: &Value) -> Result<Vec<FlatRecord>, ExtractError> {
    roster_game_stats(doc, RosterSelection::Skaters)
}

pub fn goalie_game_stats(doc: &Value) -> Result<Vec<FlatRecord>, ExtractError> {
    roster_game_stats(doc, RosterSelection::Goalies)
}

/// One record per selected boxscore player, home side first, players in
/// payload order. A stats block that is not an object contributes no columns.
pub fn roster_game_stats(
    doc: &Value,
    selection: RosterSelection,
) -> Result<Vec<FlatRecord>, ExtractError> {
    let game_id = required(doc, "/gamePk")?;
    let mut records = Vec::new();

    for side in Side::BOTH {
        let players_path = format!("/liveData/boxscore/teams/{}/players", side.as_str());
        let players = required(doc, &players_path)?
            .as_object()
            .ok_or_else(|| ExtractError::UnexpectedType {
                path: players_path.clone(),
                expected: "an object",
            })?;

        for (key, player) in players {
            let code = required_str(player, "/position/code").map_err(|e| match e {
                ExtractError::MissingField { .. } => ExtractError::MissingField {
                    path: format!("{}/{}/position/code", players_path, key),
                },
                other => other,
            })?;
            if !selection.selects(code) {
                continue;
            }

            let mut record = FlatRecord::new();
            record.set("gameID", game_id);
            apply_rules(player, PLAYER_FIELDS, None, &mut record)?;
            record.set("homeAway", side.as_str());
            apply_rules(doc, SIDE_TEAM_FIELDS, Some(side), &mut record)?;

            if let Some(stats) = player
                .get("stats")
                .and_then(|s| s.get(selection.stats_key()))
            {
                record.extend_from_object(stats);
            }
            records.push(record);
        }
    }
    Ok(records)
}

/// Output of all five game extractors over one document. Each kind succeeds
/// or fails on its own.
#[derive(Debug)]
pub struct GameExtraction {
    pub result: Result<FlatRecord, ExtractError>,
    pub officials: Result<Vec<FlatRecord>, ExtractError>,
    pub team_stats: Result<Vec<FlatRecord>, ExtractError>,
    pub player_stats: Result<Vec<FlatRecord>, ExtractError>,
    pub goalie_stats: Result<Vec<FlatRecord>, ExtractError>,
}

impl GameExtraction {
    /// Records for one kind, as a `Result` the caller can log and drop.
    pub fn take(&mut self, kind: RecordKind) -> Result<Vec<FlatRecord>, ExtractError> {
        match kind {
            RecordKind::GameResult => {
                std::mem::replace(&mut self.result, Ok(FlatRecord::new())).map(|r| vec![r])
            }
            RecordKind::GameOfficial => std::mem::replace(&mut self.officials, Ok(Vec::new())),
            RecordKind::TeamGameStat => std::mem::replace(&mut self.team_stats, Ok(Vec::new())),
            RecordKind::PlayerGameStat => {
                std::mem::replace(&mut self.player_stats, Ok(Vec::new()))
            }
            RecordKind::GoalieGameStat => {
                std::mem::replace(&mut self.goalie_stats, Ok(Vec::new()))
            }
            _ => Ok(Vec::new()),
        }
    }
}

pub fn extract_game(doc: &Value) -> GameExtraction {
    GameExtraction {
        result: game_result(doc),
        officials: game_officials(doc),
        team_stats: team_game_stats(doc),
        player_stats: player_game_stats(doc),
        goalie_stats: goalie_game_stats(doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scalar;
    use serde_json::json;

    fn player(id: i64, name: &str, code: &str, stats: Value) -> Value {
        json!({
            "person": {"id": id, "fullName": name},
            "position": {"code": code},
            "stats": stats,
        })
    }

    fn sample_game() -> Value {
        json!({
            "gamePk": 2019020300,
            "gameData": {
                "game": {"pk": 2019020300, "season": "20192020", "type": "R"},
                "datetime": {"dateTime": "2019-11-10T00:00:00Z"},
                "teams": {
                    "home": {"id": 1, "name": "New Jersey Devils"},
                    "away": {"id": 2, "name": "New York Islanders"},
                },
                "venue": {"name": "Prudential Center"},
            },
            "liveData": {
                "linescore": {
                    "currentPeriod": 3,
                    "teams": {"home": {"goals": 3}, "away": {"goals": 1}},
                },
                "boxscore": {
                    "officials": [
                        {"official": {"fullName": "Wes McCauley"}, "officialType": "Referee"},
                        {"official": {"fullName": "Pierre Racicot"}, "officialType": "Linesman"},
                    ],
                    "teams": {
                        "home": {
                            "coaches": [
                                {"person": {"fullName": "John Hynes"}},
                                {"person": {"fullName": "Alain Nasreddine"}},
                            ],
                            "teamStats": {"teamSkaterStats": {"goals": 3, "shots": 30, "hits": 21}},
                            "players": {
                                "ID1": player(1, "Taylor Hall", "L", json!({"skaterStats": {"goals": 2, "assists": 0}})),
                                "ID2": player(2, "Nico Hischier", "C", json!({"skaterStats": {"goals": 1, "assists": 1}})),
                                "ID3": player(3, "P.K. Subban", "D", json!({})),
                                "ID4": player(4, "Mackenzie Blackwood", "G", json!({"goalieStats": {"saves": 29, "shots": 30}})),
                                "ID5": player(5, "Scratched", "N/A", json!({})),
                            },
                        },
                        "away": {
                            "coaches": [{"person": {"fullName": "Barry Trotz"}}],
                            "teamStats": {"teamSkaterStats": {"goals": 1, "shots": 25, "hits": 30}},
                            "players": {
                                "ID6": player(6, "Semyon Varlamov", "G", json!({"goalieStats": {"saves": 27, "shots": 30}})),
                            },
                        },
                    },
                },
            },
        })
    }

    #[test]
    fn test_game_result_columns() {
        let record = game_result(&sample_game()).unwrap();
        let names: Vec<&str> = record.column_names().collect();
        assert_eq!(
            names,
            vec![
                "gameID", "season", "dateTime", "gameType", "homeTeamID", "homeTeamName",
                "awayTeamID", "awayTeamName", "homeGoals", "awayGoals", "homeTeamWin", "venue",
            ]
        );
        assert_eq!(record.get("homeTeamWin"), Some(&Scalar::Bool(true)));
        assert_eq!(record.get("season"), Some(&Scalar::Text("20192020".into())));
    }

    #[test]
    fn test_fixed_columns_match_extracted_records() {
        let doc = sample_game();
        let result = game_result(&doc).unwrap();
        assert_eq!(
            result.column_names().collect::<Vec<_>>(),
            game_fixed_columns(RecordKind::GameResult)
        );

        let official = &game_officials(&doc).unwrap()[0];
        assert_eq!(
            official.column_names().collect::<Vec<_>>(),
            game_fixed_columns(RecordKind::GameOfficial)
        );

        let team = &team_game_stats(&doc).unwrap()[0];
        let fixed = game_fixed_columns(RecordKind::TeamGameStat);
        assert_eq!(team.column_names().take(fixed.len()).collect::<Vec<_>>(), fixed);

        let skater = &player_game_stats(&doc).unwrap()[0];
        let fixed = game_fixed_columns(RecordKind::PlayerGameStat);
        assert_eq!(skater.column_names().take(fixed.len()).collect::<Vec<_>>(), fixed);

        assert!(game_fixed_columns(RecordKind::PlayerSeasonProfile).is_empty());
    }

    #[test]
    fn test_game_result_is_idempotent() {
        let doc = sample_game();
        assert_eq!(game_result(&doc).unwrap(), game_result(&doc).unwrap());
    }

    #[test]
    fn test_game_result_missing_game_pk() {
        let mut doc = sample_game();
        doc.as_object_mut().unwrap().remove("gamePk");
        assert_eq!(
            game_result(&doc).unwrap_err(),
            ExtractError::MissingField { path: "/gamePk".into() }
        );
    }

    #[test]
    fn test_officials() {
        let records = game_officials(&sample_game()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("officialName"), Some(&Scalar::Text("Wes McCauley".into())));
        assert_eq!(records[1].get("officialType"), Some(&Scalar::Text("Linesman".into())));
    }

    #[test]
    fn test_missing_officials_yield_nothing() {
        let mut doc = sample_game();
        doc["liveData"]["boxscore"]
            .as_object_mut()
            .unwrap()
            .remove("officials");
        assert!(game_officials(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_officials_stop_at_malformed_entry() {
        let mut doc = sample_game();
        doc["liveData"]["boxscore"]["officials"] = json!([
            {"official": {"fullName": "Wes McCauley"}, "officialType": "Referee"},
            {"official": {}, "officialType": "Referee"},
            {"official": {"fullName": "Pierre Racicot"}, "officialType": "Linesman"},
        ]);

        let records = game_officials(&doc).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("officialName"), Some(&Scalar::Text("Wes McCauley".into())));
    }

    #[test]
    fn test_team_stats_two_records() {
        let records = team_game_stats(&sample_game()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("homeAway"), Some(&Scalar::Text("home".into())));
        assert_eq!(records[1].get("homeAway"), Some(&Scalar::Text("away".into())));
        for record in &records {
            assert_eq!(record.get("homeTeamWin"), Some(&Scalar::Bool(true)));
            assert_eq!(record.get("periodsPlayed"), Some(&Scalar::Int(3)));
        }
        assert_eq!(records[0].get("headCoach"), Some(&Scalar::Text("John Hynes".into())));
        assert_eq!(records[1].get("hits"), Some(&Scalar::Int(30)));

        let names: Vec<&str> = records[0].column_names().collect();
        assert_eq!(
            names,
            vec![
                "gameID", "homeAway", "homeTeamWin", "periodsPlayed", "headCoach", "teamID",
                "teamName", "goals", "shots", "hits",
            ]
        );
    }

    #[test]
    fn test_team_stats_empty_coaches_fails() {
        let mut doc = sample_game();
        doc["liveData"]["boxscore"]["teams"]["away"]["coaches"] = json!([]);
        assert!(matches!(
            team_game_stats(&doc),
            Err(ExtractError::MissingField { .. })
        ));
    }

    #[test]
    fn test_roster_partition() {
        let doc = sample_game();
        let skaters = player_game_stats(&doc).unwrap();
        let goalies = goalie_game_stats(&doc).unwrap();

        assert_eq!(skaters.len(), 3);
        assert_eq!(goalies.len(), 2);
        assert!(skaters
            .iter()
            .all(|r| !matches!(r.get("position").and_then(Scalar::as_str), Some("G" | "N/A"))));
        assert_eq!(goalies[0].get("homeAway"), Some(&Scalar::Text("home".into())));
        assert_eq!(goalies[1].get("teamName"), Some(&Scalar::Text("New York Islanders".into())));
        assert_eq!(goalies[1].get("saves"), Some(&Scalar::Int(27)));
    }

    #[test]
    fn test_player_without_stats_block_has_fixed_columns_only() {
        let skaters = player_game_stats(&sample_game()).unwrap();
        let subban = skaters
            .iter()
            .find(|r| r.get("playerID") == Some(&Scalar::Int(3)))
            .unwrap();
        assert_eq!(subban.len(), 7);
        assert!(subban.get("goals").is_none());
    }

    #[test]
    fn test_non_object_stats_blocks_keep_fixed_columns() {
        let mut doc = sample_game();
        let home = &mut doc["liveData"]["boxscore"]["teams"]["home"]["players"];
        home["ID1"]["stats"] = json!({"skaterStats": []});
        home["ID2"]["stats"] = json!({"skaterStats": null});
        home["ID4"]["stats"] = json!({"goalieStats": "DNP"});

        let skaters = player_game_stats(&doc).unwrap();
        assert_eq!(skaters.len(), 3);
        for id in [1, 2] {
            let record = skaters
                .iter()
                .find(|r| r.get("playerID") == Some(&Scalar::Int(id)))
                .unwrap();
            assert_eq!(record.len(), 7);
            assert!(record.get("goals").is_none());
        }

        let goalies = goalie_game_stats(&doc).unwrap();
        assert_eq!(goalies.len(), 2);
        let names: Vec<&str> = goalies[0].column_names().collect();
        assert_eq!(
            names,
            vec!["gameID", "playerID", "fullName", "position", "homeAway", "teamID", "teamName"]
        );
        assert_eq!(goalies[1].get("saves"), Some(&Scalar::Int(27)));
    }

    #[test]
    fn test_extract_game_kinds_are_independent() {
        let mut doc = sample_game();
        doc["liveData"]["boxscore"]["teams"]["home"]["coaches"] = json!([]);
        let mut extraction = extract_game(&doc);

        assert!(extraction.take(RecordKind::TeamGameStat).is_err());
        assert_eq!(extraction.take(RecordKind::GameResult).unwrap().len(), 1);
        assert_eq!(extraction.take(RecordKind::PlayerGameStat).unwrap().len(), 3);
    }
}
