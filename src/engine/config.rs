//! Configuration for the gamma analysis pipeline

use serde::{Deserialize, Serialize};

use super::detector::DetectorConfig;
use super::snapshot::SnapshotBuilder;

/// Configuration for one analysis cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Contract pre-filtering before aggregation
    pub filter: FilterConfig,
    /// Level detection
    pub detector: DetectorConfig,
    /// Strikes retained in the externally exposed profile
    pub max_profile_strikes: usize,
    /// Strikes reported by importance ranking
    pub top_levels_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            detector: DetectorConfig::default(),
            max_profile_strikes: SnapshotBuilder::DEFAULT_MAX_STRIKES,
            top_levels_count: 5,
        }
    }
}

impl EngineConfig {
    /// Wide settings: more strikes in, larger profile out
    pub fn wide() -> Self {
        Self {
            filter: FilterConfig {
                strike_range_percent: 3.0,
                min_volume_threshold: 10,
            },
            max_profile_strikes: 100,
            ..Default::default()
        }
    }

    /// Tight settings: only liquid strikes close to spot
    pub fn tight() -> Self {
        Self {
            filter: FilterConfig {
                strike_range_percent: 1.0,
                min_volume_threshold: 100,
            },
            ..Default::default()
        }
    }
}

/// Contract pre-filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Keep strikes within ±this percent of the current price
    /// Default: 1.5
    pub strike_range_percent: f64,

    /// Drop contracts below this trading volume
    /// Default: 50
    pub min_volume_threshold: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            strike_range_percent: 1.5,
            min_volume_threshold: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_relative_to_default() {
        let default = EngineConfig::default();
        let wide = EngineConfig::wide();
        let tight = EngineConfig::tight();

        assert!(wide.filter.strike_range_percent > default.filter.strike_range_percent);
        assert!(wide.filter.min_volume_threshold < default.filter.min_volume_threshold);
        assert!(wide.max_profile_strikes > default.max_profile_strikes);

        assert!(tight.filter.strike_range_percent < default.filter.strike_range_percent);
        assert!(tight.filter.min_volume_threshold > default.filter.min_volume_threshold);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.filter.min_volume_threshold, 50);
        assert_eq!(back.top_levels_count, 5);
        assert_eq!(back.detector.flip_band_pct, 0.01);
    }
}
