//! Daily summary table
//!
//! Writes one human-readable CSV row per day with the key levels in both
//! denominations, for spreadsheet review alongside the JSON snapshot.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::{GexError, GexResult};
use crate::engine::Snapshot;

#[derive(Debug, Serialize)]
struct DailyRow<'a> {
    date: String,
    timestamp: String,
    spx_price: f64,
    es_price: f64,
    spread: f64,
    regime: &'a str,
    put_wall_spx: Option<f64>,
    put_wall_es: Option<f64>,
    call_wall_spx: Option<f64>,
    call_wall_es: Option<f64>,
    gamma_flip_spx: Option<f64>,
    gamma_flip_es: Option<f64>,
}

/// Write the daily summary table for a snapshot.
///
/// The file is named `daily_table_YYYYMMDD.csv` after the snapshot's capture
/// date; a rerun on the same day overwrites it.
pub fn write_daily_table(data_dir: &Path, snapshot: &Snapshot) -> GexResult<PathBuf> {
    if !data_dir.exists() {
        std::fs::create_dir_all(data_dir).map_err(GexError::IO)?;
    }

    let date = snapshot.timestamp.date_naive();
    let out_path = data_dir.join(format!("daily_table_{}.csv", date.format("%Y%m%d")));

    let row = DailyRow {
        date: date.to_string(),
        timestamp: snapshot.timestamp.to_rfc3339(),
        spx_price: snapshot.spx_price,
        es_price: snapshot.es_price,
        spread: snapshot.spread,
        regime: snapshot.regime.as_str(),
        put_wall_spx: snapshot.levels_spx.put_wall,
        put_wall_es: snapshot.levels_es.put_wall,
        call_wall_spx: snapshot.levels_spx.call_wall,
        call_wall_es: snapshot.levels_es.call_wall,
        gamma_flip_spx: snapshot.levels_spx.gamma_flip,
        gamma_flip_es: snapshot.levels_es.gamma_flip,
    };

    let mut writer =
        csv::Writer::from_path(&out_path).map_err(|e| GexError::Serialization(e.to_string()))?;
    writer
        .serialize(&row)
        .map_err(|e| GexError::Serialization(e.to_string()))?;
    writer
        .flush()
        .map_err(GexError::IO)?;

    tracing::info!("Daily table written to {:?}", out_path);
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GammaProfile, LevelSet, Regime};
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    #[test]
    fn test_write_daily_table() {
        let snapshot = Snapshot {
            spx_price: 5900.0,
            es_price: 5902.5,
            spread: 2.5,
            regime: Regime::ShortGamma,
            levels_spx: LevelSet {
                put_wall: Some(5800.0),
                call_wall: Some(6000.0),
                gamma_flip: None,
            },
            levels_es: LevelSet {
                put_wall: Some(5802.5),
                call_wall: Some(6002.5),
                gamma_flip: None,
            },
            gamma_profile: GammaProfile::default(),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 14, 14, 30, 0).unwrap(),
        };

        let dir = tempdir().unwrap();
        let path = write_daily_table(dir.path(), &snapshot).unwrap();

        assert!(path.ends_with("daily_table_20250314.csv"));

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        let header = lines.next().unwrap();
        let row = lines.next().unwrap();

        assert!(header.starts_with("date,timestamp,spx_price"));
        assert!(row.contains("short_gamma"));
        assert!(row.contains("5802.5"));
        // Absent gamma flip leaves empty cells
        assert!(row.ends_with(",,"));
    }
}
