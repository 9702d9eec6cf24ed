// Shared record models for the NHL scrapers
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub mod game_id;

pub use game_id::GameId;

// ============================================================================
// Scalar cell values
// ============================================================================

/// A single cell of a flat record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Render the cell the way it lands in a delimited file.
    pub fn to_cell(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Bool(true) => "True".to_string(),
            Scalar::Bool(false) => "False".to_string(),
            Scalar::Int(i) => i.to_string(),
            // Whole-number floats keep one decimal place: 100.0, not 100
            Scalar::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{:.1}", f),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s.clone(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&Value> for Scalar {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Bool(*b),
            Value::Number(n) => n
                .as_i64()
                .map(Scalar::Int)
                .or_else(|| n.as_f64().map(Scalar::Float))
                .unwrap_or_else(|| Scalar::Text(n.to_string())),
            Value::String(s) => Scalar::Text(s.clone()),
            // Nested sub-objects are kept as compact JSON text
            Value::Array(_) | Value::Object(_) => Scalar::Text(value.to_string()),
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cell())
    }
}

// ============================================================================
// Flat records
// ============================================================================

/// Ordered column -> scalar mapping produced by one extractor call.
///
/// Setting a column that already exists overwrites the value in place, so a
/// pass-through stats key that collides with a fixed column keeps the fixed
/// column's position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    columns: Vec<(String, Scalar)>,
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Scalar>) {
        let column = column.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.columns.push((column, value)),
        }
    }

    /// Copy every key of a JSON object into the record, in payload order.
    /// Non-object values contribute nothing.
    pub fn extend_from_object(&mut self, value: &Value) {
        if let Some(map) = value.as_object() {
            for (key, v) in map {
                self.set(key.as_str(), Scalar::from(v));
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    pub fn remove(&mut self, column: &str) -> Option<Scalar> {
        let idx = self.columns.iter().position(|(name, _)| name == column)?;
        Some(self.columns.remove(idx).1)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.columns.iter().map(|(name, v)| (name.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ============================================================================
// Record kinds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    GameResult,
    GameOfficial,
    TeamGameStat,
    PlayerGameStat,
    GoalieGameStat,
    PlayerSeasonProfile,
    PlayerSalary,
    PlayerSeasonTable,
}

impl RecordKind {
    /// The five tables produced by one pass over a season's game documents.
    pub const GAME_TABLES: [RecordKind; 5] = [
        RecordKind::GameResult,
        RecordKind::GameOfficial,
        RecordKind::TeamGameStat,
        RecordKind::PlayerGameStat,
        RecordKind::GoalieGameStat,
    ];

    /// File stem for the table, e.g. `game_results`.
    pub fn file_stem(&self) -> &'static str {
        match self {
            RecordKind::GameResult => "game_results",
            RecordKind::GameOfficial => "game_officials",
            RecordKind::TeamGameStat => "game_team_stats",
            RecordKind::PlayerGameStat => "game_player_stats",
            RecordKind::GoalieGameStat => "game_goalie_stats",
            RecordKind::PlayerSeasonProfile => "player_profiles",
            RecordKind::PlayerSalary => "player_salary",
            RecordKind::PlayerSeasonTable => "player_season",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RecordKind::GameResult => "Game results",
            RecordKind::GameOfficial => "Game officials",
            RecordKind::TeamGameStat => "Team game statistics",
            RecordKind::PlayerGameStat => "Player game statistics",
            RecordKind::GoalieGameStat => "Goalie game statistics",
            RecordKind::PlayerSeasonProfile => "Player season profiles",
            RecordKind::PlayerSalary => "Player salaries",
            RecordKind::PlayerSeasonTable => "Player season statistics",
        }
    }
}

// ============================================================================
// Output tables
// ============================================================================

/// Ordered sequence of records of one kind. No deduplication.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    pub kind: RecordKind,
    records: Vec<FlatRecord>,
}

impl OutputTable {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: FlatRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = FlatRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[FlatRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FlatRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Union of all record columns in first-seen order.
    ///
    /// Stats pass-through columns vary between seasons, so the header is
    /// derived from the data instead of a fixed schema.
    pub fn header(&self) -> Vec<String> {
        let mut header: Vec<String> = Vec::new();
        for record in &self.records {
            for name in record.column_names() {
                if !header.iter().any(|h| h == name) {
                    header.push(name.to_string());
                }
            }
        }
        header
    }

    /// Stable sort by the given text/number columns, missing cells first.
    pub fn sort_by_columns(&mut self, columns: &[&str]) {
        self.records.sort_by(|a, b| {
            for column in columns {
                let left = a.get(column).map(Scalar::to_cell).unwrap_or_default();
                let right = b.get(column).map(Scalar::to_cell).unwrap_or_default();
                match left.cmp(&right) {
                    std::cmp::Ordering::Equal => continue,
                    other => return other,
                }
            }
            std::cmp::Ordering::Equal
        });
    }
}
