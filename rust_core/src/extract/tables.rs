//! HTML table extraction for the salary and skater season pages.

use crate::error::ExtractError;
use crate::models::{FlatRecord, Scalar};
use crate::season_config::season_label;
use scraper::{ElementRef, Html, Selector};

/// Salary columns after `team` and `season` are stamped on.
pub const SALARY_COLUMNS: [&str; 13] = [
    "player",
    "position",
    "age",
    "base_salary",
    "signing_bonus",
    "perf_bonus",
    "total_salary",
    "na",
    "total_cap_hit",
    "adjusted_cap_hit",
    "cap_pct",
    "team",
    "season",
];

/// Placeholder salary column, always dropped.
const SALARY_PLACEHOLDER: &str = "na";

pub const SKATER_COLUMNS: [&str; 28] = [
    "rank",
    "player",
    "age",
    "team",
    "position",
    "games_played",
    "goals",
    "assists",
    "points",
    "plus_minus",
    "penalties_in_minutes",
    "point_shares",
    "even_strength_goals",
    "powerplay_goals",
    "shorthanded_goals",
    "game_winning_goals",
    "even_strength_assists",
    "powerplay_assists",
    "shorthanded_assists",
    "shots",
    "shooting_pct",
    "time_on_ice_min",
    "average_time_on_ice",
    "blocks",
    "hits",
    "faceoff_wins",
    "faceoff_losses",
    "faceoff_win_pct",
];

/// Text grid of one HTML table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl HtmlTable {
    /// Column count, taken from the header or else the first row.
    pub fn width(&self) -> usize {
        if self.header.is_empty() {
            self.rows.first().map(Vec::len).unwrap_or(0)
        } else {
            self.header.len()
        }
    }

    /// Rows as records under new column names. Short rows are padded with
    /// empty cells and long rows are cut to the header width.
    pub fn to_records(&self, columns: &[&str]) -> Result<Vec<FlatRecord>, ExtractError> {
        if self.width() != columns.len() {
            return Err(ExtractError::TableShape {
                expected: columns.len(),
                found: self.width(),
            });
        }

        Ok(self
            .rows
            .iter()
            .map(|row| {
                let mut record = FlatRecord::new();
                for (i, column) in columns.iter().enumerate() {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    record.set(*column, infer_cell(cell));
                }
                record
            })
            .collect())
    }
}

fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|_| ExtractError::Selector(css))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn row_cells(row: ElementRef<'_>, cell_sel: &Selector) -> Vec<String> {
    row.select(cell_sel).map(cell_text).collect()
}

/// Parse the first `<table>` of a page.
///
/// The header is the last `<thead>` row (or a leading all-`<th>` row when the
/// table has no `<thead>`). Body rows repeating the header, marked with a
/// `thead` class, are skipped.
pub fn first_table(html: &str) -> Result<HtmlTable, ExtractError> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let head_row_sel = selector("thead tr")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("th, td")?;
    let td_sel = selector("td")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or(ExtractError::NoTable)?;

    let head_rows: Vec<ElementRef<'_>> = table.select(&head_row_sel).collect();
    let mut header = head_rows.last().map(|row| row_cells(*row, &cell_sel)).unwrap_or_default();

    let mut rows = Vec::new();
    for row in table.select(&row_sel) {
        if head_rows.contains(&row) {
            continue;
        }
        if row
            .value()
            .attr("class")
            .is_some_and(|class| class.split_whitespace().any(|c| c == "thead"))
        {
            continue;
        }
        if header.is_empty() && rows.is_empty() && row.select(&td_sel).next().is_none() {
            header = row_cells(row, &cell_sel);
            continue;
        }
        let cells = row_cells(row, &cell_sel);
        if !cells.is_empty() {
            rows.push(cells);
        }
    }

    Ok(HtmlTable { header, rows })
}

/// Output columns of a salary table, placeholder excluded.
pub fn salary_output_columns() -> Vec<&'static str> {
    SALARY_COLUMNS
        .iter()
        .copied()
        .filter(|column| *column != SALARY_PLACEHOLDER)
        .collect()
}

/// Output columns of a league skater table.
pub fn skater_output_columns() -> Vec<&'static str> {
    let mut columns = SKATER_COLUMNS.to_vec();
    columns.push("season");
    columns
}

/// `""` is null; integers and decimals become numbers; anything else is text.
pub fn infer_cell(cell: &str) -> Scalar {
    if cell.is_empty() {
        Scalar::Null
    } else if let Ok(i) = cell.parse::<i64>() {
        Scalar::Int(i)
    } else if let Some(f) = cell.parse::<f64>().ok().filter(|f| f.is_finite()) {
        Scalar::Float(f)
    } else {
        Scalar::Text(cell.to_string())
    }
}

/// Salary rows of one team's page for the season starting in `year`.
///
/// The raw table carries eleven columns; the eighth is a placeholder and is
/// dropped whatever it holds.
pub fn salary_records(html: &str, team: &str, year: i32) -> Result<Vec<FlatRecord>, ExtractError> {
    let table = first_table(html)?;
    let raw_columns = &SALARY_COLUMNS[..SALARY_COLUMNS.len() - 2];
    let season = season_label(year);

    let mut records = table.to_records(raw_columns)?;
    for record in &mut records {
        record.set("team", team);
        record.set("season", season.as_str());
        record.remove(SALARY_PLACEHOLDER);
    }
    Ok(records)
}

/// League skater rows for the season ending in `year`.
pub fn skater_season_records(html: &str, year: i32) -> Result<Vec<FlatRecord>, ExtractError> {
    let table = first_table(html)?;
    let season = season_label(year - 1);

    let mut records = table.to_records(&SKATER_COLUMNS)?;
    for record in &mut records {
        record.set("season", season.as_str());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salary_page(placeholder: &str) -> String {
        format!(
            r#"<html><body>
            <table>
              <thead><tr>
                <th>Player</th><th>Pos</th><th>Age</th><th>Base</th><th>Signing</th>
                <th>Perf</th><th>Total</th><th></th><th>Cap Hit</th><th>Adj</th><th>Cap %</th>
              </tr></thead>
              <tbody>
                <tr><td>Connor McDavid</td><td>C</td><td>22</td><td>$1,000,000</td><td>$14,000,000</td>
                    <td>-</td><td>$15,000,000</td><td>{placeholder}</td><td>$12,500,000</td><td>$12,500,000</td><td>15.41</td></tr>
                <tr><td>Leon Draisaitl</td><td>C</td><td>24</td><td>$6,500,000</td><td>$2,000,000</td>
                    <td>-</td><td>$8,500,000</td><td>{placeholder}</td><td>$8,500,000</td><td>$8,500,000</td><td>10.48</td></tr>
              </tbody>
            </table>
            <table><tr><td>ignored</td></tr></table>
            </body></html>"#
        )
    }

    #[test]
    fn test_salary_columns() {
        let records = salary_records(&salary_page(""), "edmonton-oilers", 2019).unwrap();
        assert_eq!(records.len(), 2);

        let names: Vec<&str> = records[0].column_names().collect();
        assert_eq!(
            names,
            vec![
                "player", "position", "age", "base_salary", "signing_bonus", "perf_bonus",
                "total_salary", "total_cap_hit", "adjusted_cap_hit", "cap_pct", "team", "season",
            ]
        );
        assert_eq!(records[0].get("age"), Some(&Scalar::Int(22)));
        assert_eq!(records[1].get("season"), Some(&Scalar::Text("2019/2020".into())));
        assert_eq!(records[1].get("team"), Some(&Scalar::Text("edmonton-oilers".into())));
    }

    #[test]
    fn test_salary_placeholder_dropped_regardless_of_content() {
        let records = salary_records(&salary_page("Buyout"), "edmonton-oilers", 2019).unwrap();
        assert!(records.iter().all(|r| r.get("na").is_none() && r.len() == 12));
        assert!(records
            .iter()
            .all(|r| r.iter().all(|(_, v)| v.as_str() != Some("Buyout"))));
    }

    #[test]
    fn test_page_without_table() {
        assert_eq!(
            salary_records("<html><p>Subscribe</p></html>", "seattle-kraken", 2019).unwrap_err(),
            ExtractError::NoTable
        );
    }

    #[test]
    fn test_wrong_width_table() {
        let html = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>";
        assert_eq!(
            salary_records(html, "x", 2019).unwrap_err(),
            ExtractError::TableShape { expected: 11, found: 2 }
        );
    }

    #[test]
    fn test_first_table_without_thead() {
        let html = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td> x  y </td></tr></table>";
        let table = first_table(html).unwrap();
        assert_eq!(table.header, vec!["A", "B"]);
        assert_eq!(table.rows, vec![vec!["1".to_string(), "x y".to_string()]]);
    }

    #[test]
    fn test_skater_table_skips_repeated_headers() {
        let head: String = SKATER_COLUMNS.iter().map(|c| format!("<th>{c}</th>")).collect();
        let row: String = (0..28).map(|i| format!("<td>{i}</td>")).collect();
        let html = format!(
            "<table><thead><tr><th colspan=\"28\">Scoring</th></tr><tr>{head}</tr></thead>\
             <tbody><tr>{row}</tr><tr class=\"thead\">{head}</tr><tr>{row}</tr></tbody></table>"
        );

        let records = skater_season_records(&html, 2020).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("faceoff_win_pct"), Some(&Scalar::Int(27)));
        assert_eq!(records[0].get("season"), Some(&Scalar::Text("2019/2020".into())));
    }

    #[test]
    fn test_infer_cell() {
        assert_eq!(infer_cell(""), Scalar::Null);
        assert_eq!(infer_cell("15.41"), Scalar::Float(15.41));
        assert_eq!(infer_cell("$1,000"), Scalar::Text("$1,000".into()));
    }
}
