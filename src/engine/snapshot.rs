//! Snapshot assembly
//!
//! Combines prices, detected levels (both denominations), and the gamma
//! profile into one immutable `Snapshot`, the unit handed whole to the
//! cache store, display layer, and alerting. Field names and shapes match
//! the external JSON representation consumed downstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::GammaProfile;
use super::{LevelSet, Regime};

/// One analysis cycle's result, immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current SPX cash price
    pub spx_price: f64,
    /// Current ES front-month price
    pub es_price: f64,
    /// Session basis spread (ES - SPX)
    pub spread: f64,
    /// Market regime ("long_gamma" / "short_gamma")
    pub regime: Regime,
    /// Levels in index units; keys present only when detected
    pub levels_spx: LevelSet,
    /// The same levels shifted by the spread
    pub levels_es: LevelSet,
    /// Per-strike exposure profile, ascending, possibly truncated
    pub gamma_profile: GammaProfile,
    /// Capture time (ISO-8601)
    pub timestamp: DateTime<Utc>,
}

/// Assembles snapshots, applying the profile truncation policy.
pub struct SnapshotBuilder {
    max_profile_strikes: usize,
}

impl SnapshotBuilder {
    /// Default cap on the number of strikes exposed externally
    pub const DEFAULT_MAX_STRIKES: usize = 50;

    pub fn new() -> Self {
        Self {
            max_profile_strikes: Self::DEFAULT_MAX_STRIKES,
        }
    }

    /// Override the profile cap
    pub fn with_max_strikes(max_profile_strikes: usize) -> Self {
        Self {
            max_profile_strikes,
        }
    }

    /// Build a snapshot. Never mutates its inputs.
    ///
    /// When the profile exceeds the cap, truncation keeps the detected level
    /// strikes plus the strikes nearest the current price, in ascending
    /// strike order.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        &self,
        spx_price: f64,
        es_price: f64,
        spread: f64,
        regime: Regime,
        levels_spx: LevelSet,
        levels_es: LevelSet,
        profile: &GammaProfile,
        timestamp: DateTime<Utc>,
    ) -> Snapshot {
        let gamma_profile =
            truncate_profile(profile, spx_price, &levels_spx, self.max_profile_strikes);

        Snapshot {
            spx_price,
            es_price,
            spread,
            regime,
            levels_spx,
            levels_es,
            gamma_profile,
            timestamp,
        }
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Cap the profile at `max_strikes`, preferentially retaining the detected
/// level strikes and then strikes nearest `price`. Ascending order is
/// preserved.
fn truncate_profile(
    profile: &GammaProfile,
    price: f64,
    levels: &LevelSet,
    max_strikes: usize,
) -> GammaProfile {
    let n = profile.len();
    if n <= max_strikes {
        return profile.clone();
    }

    let mut keep = vec![false; n];
    let mut kept = 0usize;

    // Level strikes carry the detection result; pin them first.
    for level in [levels.put_wall, levels.call_wall, levels.gamma_flip]
        .into_iter()
        .flatten()
    {
        if let Some(i) = profile.strikes.iter().position(|a| a.strike == level) {
            if !keep[i] {
                keep[i] = true;
                kept += 1;
            }
        }
    }

    // Fill the remaining budget with strikes nearest the current price.
    let mut by_distance: Vec<usize> = (0..n).collect();
    by_distance.sort_by(|&a, &b| {
        let da = (profile.strikes[a].strike - price).abs();
        let db = (profile.strikes[b].strike - price).abs();
        da.partial_cmp(&db)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    for i in by_distance {
        if kept >= max_strikes {
            break;
        }
        if !keep[i] {
            keep[i] = true;
            kept += 1;
        }
    }

    let strikes = profile
        .strikes
        .iter()
        .zip(keep.iter())
        .filter(|(_, &k)| k)
        .map(|(a, _)| a.clone())
        .collect();

    GammaProfile { strikes }
}
