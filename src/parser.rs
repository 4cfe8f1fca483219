//! CSV parser for the bat-tracking swing table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SwingError;

/// Columns the downstream pipeline cannot run without. Checked up front so a
/// renamed column surfaces as a schema error instead of a row-level one.
const REQUIRED_COLUMNS: &[&str] = &[
    "hitter",
    "team",
    "game_date",
    "bat_speed",
    "swing_length",
    "exit_velocity",
    "pitch_release_speed",
];

/// One recorded swing, straight from the source table.
///
/// `exit_velocity` and `pitch_release_speed` are absent for swings without a
/// tracked batted ball; metrics that need them are undefined for those rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingRecord {
    pub hitter: String,
    pub team: String,
    pub game_date: NaiveDate,
    /// mph, >= 0.
    pub bat_speed: f64,
    /// feet.
    pub swing_length: f64,
    /// mph.
    pub exit_velocity: Option<f64>,
    /// mph, at release.
    pub pitch_release_speed: Option<f64>,
}

/// Decodes the raw CSV bytes into swing records.
///
/// # Errors
///
/// Returns [`SwingError::SchemaMismatch`] if a required column is missing or
/// a row fails to deserialize.
pub fn parse_swings(bytes: &[u8]) -> Result<Vec<SwingRecord>, SwingError> {
    let mut rdr = csv::Reader::from_reader(bytes);

    let headers = rdr
        .headers()
        .map_err(|e| SwingError::SchemaMismatch(e.to_string()))?
        .clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *col) {
            return Err(SwingError::SchemaMismatch(format!(
                "missing column `{col}`"
            )));
        }
    }

    let mut records = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        let record: SwingRecord =
            result.map_err(|e| SwingError::SchemaMismatch(format!("row {}: {e}", i + 1)))?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "hitter,team,game_date,bat_speed,swing_length,exit_velocity,pitch_release_speed";

    #[test]
    fn test_parse_valid_rows() {
        let csv = format!(
            "{HEADER}\n\
             Juan Soto,NYY,2024-05-01,75.2,7.3,105.1,94.0\n\
             Luis Arraez,SD,2024-05-01,62.4,6.1,88.0,91.5\n"
        );
        let records = parse_swings(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hitter, "Juan Soto");
        assert_eq!(records[0].team, "NYY");
        assert_eq!(
            records[0].game_date,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert_eq!(records[0].bat_speed, 75.2);
        assert_eq!(records[1].exit_velocity, Some(88.0));
    }

    #[test]
    fn test_parse_empty_optional_cells() {
        let csv = format!("{HEADER}\nJuan Soto,NYY,2024-05-01,75.2,7.3,,\n");
        let records = parse_swings(csv.as_bytes()).unwrap();

        assert_eq!(records[0].exit_velocity, None);
        assert_eq!(records[0].pitch_release_speed, None);
    }

    #[test]
    fn test_parse_missing_column_is_schema_mismatch() {
        let csv = "hitter,team,game_date,bat_speed\nJuan Soto,NYY,2024-05-01,75.2\n";
        let err = parse_swings(csv.as_bytes()).unwrap_err();

        match err {
            SwingError::SchemaMismatch(msg) => assert!(msg.contains("swing_length")),
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_bad_cell_is_schema_mismatch() {
        let csv = format!("{HEADER}\nJuan Soto,NYY,not-a-date,75.2,7.3,105.1,94.0\n");
        let err = parse_swings(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, SwingError::SchemaMismatch(_)));
    }

    #[test]
    fn test_parse_header_only_is_empty() {
        let csv = format!("{HEADER}\n");
        let records = parse_swings(csv.as_bytes()).unwrap();
        assert!(records.is_empty());
    }
}
