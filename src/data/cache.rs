//! Local persistence for analysis artifacts
//!
//! Two small JSON stores under one data directory:
//! - `SnapshotStore`: the latest snapshot, written whole after each cycle
//!   and read back by display/alerting collaborators
//! - `SpreadCache`: the session basis spread, computed once at market open
//!   and reused for the rest of the trading day

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{GexError, GexResult};
use crate::engine::Snapshot;

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Data directory
    pub data_dir: PathBuf,
    /// Whether persistence is enabled
    pub enabled: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            enabled: true,
        }
    }
}

/// Durable store for the most recent snapshot.
pub struct SnapshotStore {
    config: StoreConfig,
}

impl SnapshotStore {
    const LATEST_FILE: &'static str = "snapshot_latest.json";

    pub fn new(config: StoreConfig) -> GexResult<Self> {
        if config.enabled && !config.data_dir.exists() {
            fs::create_dir_all(&config.data_dir).map_err(GexError::IO)?;
        }
        Ok(Self { config })
    }

    fn latest_path(&self) -> PathBuf {
        self.config.data_dir.join(Self::LATEST_FILE)
    }

    /// Persist a snapshot as the latest result
    pub fn save(&self, snapshot: &Snapshot) -> GexResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| GexError::Serialization(e.to_string()))?;
        fs::write(self.latest_path(), json).map_err(GexError::IO)?;

        tracing::info!("Cached snapshot at {:?}", self.latest_path());
        Ok(())
    }

    /// Load the latest snapshot, if one exists
    pub fn load_latest(&self) -> GexResult<Option<Snapshot>> {
        let path = self.latest_path();
        if !self.config.enabled || !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(GexError::IO)?;
        let snapshot: Snapshot =
            serde_json::from_str(&json).map_err(|e| GexError::Serialization(e.to_string()))?;

        tracing::info!("Loaded snapshot from cache");
        Ok(Some(snapshot))
    }

    /// Remove the stored snapshot
    pub fn clear(&self) -> GexResult<()> {
        let path = self.latest_path();
        if path.exists() {
            fs::remove_file(path).map_err(GexError::IO)?;
        }
        Ok(())
    }
}

/// Cached session spread record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadRecord {
    pub spread: f64,
    pub spx_price: f64,
    pub es_price: f64,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
}

/// File-backed cache for the daily ES-SPX spread.
///
/// The spread is established once per session and stays fixed for the
/// trading day; a cached record is only reused on the day it was written.
pub struct SpreadCache {
    config: StoreConfig,
}

impl SpreadCache {
    const SPREAD_FILE: &'static str = "daily_spread.json";

    pub fn new(config: StoreConfig) -> GexResult<Self> {
        if config.enabled && !config.data_dir.exists() {
            fs::create_dir_all(&config.data_dir).map_err(GexError::IO)?;
        }
        Ok(Self { config })
    }

    fn spread_path(&self) -> PathBuf {
        self.config.data_dir.join(Self::SPREAD_FILE)
    }

    /// Compute today's spread from fresh prices and persist it
    pub fn save(&self, spx_price: f64, es_price: f64) -> GexResult<f64> {
        let record = SpreadRecord {
            spread: es_price - spx_price,
            spx_price,
            es_price,
            date: Utc::now().date_naive(),
            timestamp: Utc::now(),
        };

        if self.config.enabled {
            let json = serde_json::to_string_pretty(&record)
                .map_err(|e| GexError::Serialization(e.to_string()))?;
            fs::write(self.spread_path(), json).map_err(GexError::IO)?;
            tracing::info!(
                "Spread calculated and cached: {:.2} (ES {:.2}, SPX {:.2})",
                record.spread,
                es_price,
                spx_price
            );
        }

        Ok(record.spread)
    }

    /// Load today's spread, if a record from today exists
    pub fn load_today(&self) -> GexResult<Option<f64>> {
        let path = self.spread_path();
        if !self.config.enabled || !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(GexError::IO)?;
        let record: SpreadRecord =
            serde_json::from_str(&json).map_err(|e| GexError::Serialization(e.to_string()))?;

        if record.date == Utc::now().date_naive() {
            tracing::info!("Loaded cached spread: {:.2}", record.spread);
            Ok(Some(record.spread))
        } else {
            tracing::debug!("Cached spread is stale (from {})", record.date);
            Ok(None)
        }
    }
}
