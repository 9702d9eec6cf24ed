//! Delimited-file output for record tables.
//!
//! One header row, no index column. Cells a record lacks are written empty.
//! An empty table still gets a header when its kind has known fixed columns.

use crate::error::ScrapeError;
use crate::extract::fixed_columns;
use crate::models::{OutputTable, RecordKind, Scalar};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// `game_results_2019.csv` style name for a per-season table.
pub fn season_file_name(kind: RecordKind, year: i32) -> String {
    format!("{}_{}.csv", kind.file_stem(), year)
}

/// `player_salary.csv` style name for a multi-season table.
pub fn file_name(kind: RecordKind) -> String {
    format!("{}.csv", kind.file_stem())
}

/// Write a table as CSV to any writer.
pub fn write_table<W: Write>(table: &OutputTable, writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    let mut header = table.header();
    if header.is_empty() {
        header = fixed_columns(table.kind)
            .into_iter()
            .map(str::to_string)
            .collect();
    }
    if !header.is_empty() {
        out.write_record(&header)?;
    }

    for record in table.records() {
        out.write_record(
            header
                .iter()
                .map(|column| record.get(column).map(Scalar::to_cell).unwrap_or_default()),
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Write a table to `dir/name`, returning the full path.
pub fn write_table_file(table: &OutputTable, dir: &Path, name: &str) -> Result<PathBuf, ScrapeError> {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).map_err(|source| ScrapeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_table(table, file).map_err(|source| ScrapeError::Csv {
        path: path.display().to_string(),
        source,
    })?;

    info!(
        "{} ({} rows) saved to {}",
        table.kind.description(),
        table.len(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlatRecord;

    #[test]
    fn test_file_names() {
        assert_eq!(season_file_name(RecordKind::GameResult, 2019), "game_results_2019.csv");
        assert_eq!(
            season_file_name(RecordKind::GoalieGameStat, 2012),
            "game_goalie_stats_2012.csv"
        );
        assert_eq!(file_name(RecordKind::PlayerSalary), "player_salary.csv");
    }

    #[test]
    fn test_write_table_with_ragged_columns() {
        let mut table = OutputTable::new(RecordKind::PlayerGameStat);
        let mut a = FlatRecord::new();
        a.set("gameID", 2019020300_i64);
        a.set("fullName", "Hall, Taylor");
        a.set("goals", 2_i64);
        let mut b = FlatRecord::new();
        b.set("gameID", 2019020300_i64);
        b.set("fullName", "P.K. Subban");
        table.push(a);
        table.push(b);

        let mut buf = Vec::new();
        write_table(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "gameID,fullName,goals\n2019020300,\"Hall, Taylor\",2\n2019020300,P.K. Subban,\n"
        );
    }

    fn written(table: &OutputTable) -> String {
        let mut buf = Vec::new();
        write_table(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_table_writes_fixed_header() {
        assert_eq!(
            written(&OutputTable::new(RecordKind::GameOfficial)),
            "gameID,officialName,officialType\n"
        );
        assert_eq!(
            written(&OutputTable::new(RecordKind::GameResult)),
            "gameID,season,dateTime,gameType,homeTeamID,homeTeamName,awayTeamID,awayTeamName,\
             homeGoals,awayGoals,homeTeamWin,venue\n"
        );
        assert!(written(&OutputTable::new(RecordKind::PlayerSalary)).starts_with("player,position,age,"));
    }

    #[test]
    fn test_empty_profile_table_is_empty() {
        assert!(written(&OutputTable::new(RecordKind::PlayerSeasonProfile)).is_empty());
    }

    #[test]
    fn test_whole_number_floats_in_rows() {
        let mut table = OutputTable::new(RecordKind::GoalieGameStat);
        let mut r = FlatRecord::new();
        r.extend_from_object(&serde_json::json!({
            "savePercentage": 100.0,
            "powerPlaySavePercentage": 91.0,
            "evenStrengthSavePercentage": 92.5,
        }));
        table.push(r);

        assert_eq!(
            written(&table),
            "savePercentage,powerPlaySavePercentage,evenStrengthSavePercentage\n100.0,91.0,92.5\n"
        );
    }

    #[test]
    fn test_write_table_file() {
        let dir = std::env::temp_dir().join(format!("nhl_scrape_export_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut table = OutputTable::new(RecordKind::GameResult);
        let mut r = FlatRecord::new();
        r.set("homeTeamWin", true);
        table.push(r);

        let path = write_table_file(&table, &dir, &season_file_name(table.kind, 2019)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "homeTeamWin\nTrue\n");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
