//! Roster boundary
//!
//! Raw tabular rows (CSV records or JSON objects) → validated `Player` list.
//! Missing columns are rejected here; bad level cells are coerced to 0 here,
//! so the planner itself only ever sees clean `Player`s.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Read;
use tracing::{debug, warn};

use crate::error::RosterError;
use crate::scoring::MAX_LEVEL;

pub const COL_NAME: &str = "name";
pub const COL_SB_LEVEL: &str = "sb_level";
pub const COL_MAG_LEVEL: &str = "mag_level";

/// 필수 컬럼 (순서대로 검사)
pub const REQUIRED_COLUMNS: [&str; 3] = [COL_NAME, COL_SB_LEVEL, COL_MAG_LEVEL];

/// Default placeholder row count for a fresh roster
pub const DEFAULT_ROSTER_SIZE: usize = 10;

/// A single roster entry. Level 0 means the attack type is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub sb_level: u8,
    pub mag_level: u8,
}

impl Player {
    pub fn new(name: impl Into<String>, sb_level: u8, mag_level: u8) -> Self {
        Self { name: name.into(), sb_level, mag_level }
    }

    pub fn can_sb(&self) -> bool {
        self.sb_level > 0
    }

    pub fn can_mag(&self) -> bool {
        self.mag_level > 0
    }

    /// Both attacks unusable: only Idle is possible
    pub fn is_idle_only(&self) -> bool {
        !self.can_sb() && !self.can_mag()
    }
}

/// Ten placeholder rows (`Player 1`..`Player 10`, all levels 0).
pub fn default_roster() -> Vec<Player> {
    (1..=DEFAULT_ROSTER_SIZE)
        .map(|i| Player::new(format!("Player {}", i), 0, 0))
        .collect()
}

/// Untyped roster table as entered by the user.
///
/// `None` cells are absent values (empty JSON key, null).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRoster {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawRoster {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub fn push_row(&mut self, row: Vec<Option<String>>) {
        self.rows.push(row);
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.trim() == column)
    }

    /// Build a table from JSON row objects.
    ///
    /// Columns are the union of keys in first-seen order; keys absent
    /// from a row become `None` cells. An empty row list still carries the
    /// required columns (empty roster table, not a malformed one).
    pub fn from_json_rows(rows: &[Map<String, Value>]) -> Self {
        if rows.is_empty() {
            return RawRoster::new(REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect());
        }

        let mut columns: Vec<String> = Vec::new();
        for row in rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let mut raw = RawRoster::new(columns);
        for row in rows {
            let cells = raw
                .columns
                .iter()
                .map(|column| row.get(column).and_then(json_cell))
                .collect();
            raw.push_row(cells);
        }
        raw
    }
}

impl From<&[Player]> for RawRoster {
    fn from(players: &[Player]) -> Self {
        let mut raw = RawRoster::new(REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect());
        for player in players {
            raw.push_row(vec![
                Some(player.name.clone()),
                Some(player.sb_level.to_string()),
                Some(player.mag_level.to_string()),
            ]);
        }
        raw
    }
}

fn json_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Counts of level cells that had to be coerced to 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizeReport {
    /// 빈 셀 (입력 중인 행)
    pub blank_cells: u32,
    /// 숫자가 아니거나 0-20 범위 밖
    pub invalid_cells: u32,
}

impl SanitizeReport {
    pub fn coerced(&self) -> u32 {
        self.blank_cells + self.invalid_cells
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRoster {
    pub players: Vec<Player>,
    pub report: SanitizeReport,
}

enum LevelCell {
    Valid(u8),
    Blank,
    Invalid,
}

fn parse_level(cell: Option<&str>) -> LevelCell {
    let text = match cell.map(str::trim) {
        None | Some("") => return LevelCell::Blank,
        Some(text) => text,
    };

    let value = match text.parse::<i64>() {
        Ok(v) => v,
        Err(_) => match text.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 => f as i64,
            _ => return LevelCell::Invalid,
        },
    };

    match u8::try_from(value) {
        Ok(level) if level <= MAX_LEVEL => LevelCell::Valid(level),
        _ => LevelCell::Invalid,
    }
}

/// Check required columns and coerce every level cell into 0..=20.
pub fn validate_roster(raw: &RawRoster) -> Result<ValidatedRoster, RosterError> {
    let mut indices = [0usize; 3];
    for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = raw
            .column_index(column)
            .ok_or_else(|| RosterError::MissingColumn { column: column.to_string() })?;
    }
    let [name_idx, sb_idx, mag_idx] = indices;

    let mut report = SanitizeReport::default();
    let mut players = Vec::with_capacity(raw.rows.len());

    for (row_no, row) in raw.rows.iter().enumerate() {
        let cell = |idx: usize| row.get(idx).and_then(|c| c.as_deref());
        let name = cell(name_idx).unwrap_or_default().to_string();

        let mut level = |idx: usize, column: &str| match parse_level(cell(idx)) {
            LevelCell::Valid(v) => v,
            LevelCell::Blank => {
                report.blank_cells += 1;
                0
            }
            LevelCell::Invalid => {
                report.invalid_cells += 1;
                warn!(
                    "Row {} ({}): invalid {} value {:?}, treating as 0",
                    row_no + 1,
                    name,
                    column,
                    cell(idx).unwrap_or_default()
                );
                0
            }
        };

        let sb_level = level(sb_idx, COL_SB_LEVEL);
        let mag_level = level(mag_idx, COL_MAG_LEVEL);
        players.push(Player { name, sb_level, mag_level });
    }

    debug!(
        "Validated roster: {} players, {} blank / {} invalid level cells",
        players.len(),
        report.blank_cells,
        report.invalid_cells
    );

    Ok(ValidatedRoster { players, report })
}

/// Read a roster CSV (header row required) into a raw table.
pub fn read_roster_csv<R: Read>(reader: R) -> Result<RawRoster, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = csv_reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut raw = RawRoster::new(columns);

    for record in csv_reader.records() {
        let record = record?;
        let row = (0..raw.columns.len())
            .map(|i| record.get(i).filter(|v| !v.is_empty()).map(str::to_string))
            .collect();
        raw.push_row(row);
    }

    Ok(raw)
}

/// Write players as a roster CSV (`name,sb_level,mag_level`).
pub fn write_roster_csv<W: std::io::Write>(players: &[Player], writer: W) -> Result<(), RosterError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for player in players {
        csv_writer.serialize(player)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// How many players can use each attack type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterCapability {
    pub players: u32,
    pub sb_capable: u32,
    pub mag_capable: u32,
    pub idle_only: u32,
}

impl RosterCapability {
    pub fn of(players: &[Player]) -> Self {
        players.iter().fold(Self::default(), |mut cap, p| {
            cap.players += 1;
            cap.sb_capable += u32::from(p.can_sb());
            cap.mag_capable += u32::from(p.can_mag());
            cap.idle_only += u32::from(p.is_idle_only());
            cap
        })
    }
}
