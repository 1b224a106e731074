//! Level detection on an aggregated gamma profile
//!
//! Scans a `GammaProfile` against the current index price to locate three
//! named levels and classify the prevailing regime:
//! - **Put wall**: strike strictly below price with maximal |put_gamma|
//! - **Call wall**: strike strictly above price with maximal |call_gamma|
//! - **Gamma flip**: strike within ±flip_band_pct of price with minimal
//!   |net_gamma| (the near-zero-crossing point)
//!
//! Ties break to the lowest strike so results are reproducible. Pure and
//! deterministic; an empty profile yields an all-absent level set.

use serde::{Deserialize, Serialize};

use crate::core::{GexError, GexResult};

use super::aggregate::{GammaProfile, StrikeAggregate};
use super::{LevelSet, Regime};

/// Detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Half-width of the gamma-flip search band as a fraction of price.
    /// The band is inclusive: `[price * (1 - pct), price * (1 + pct)]`.
    /// Default: 0.01 (±1%)
    pub flip_band_pct: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self { flip_band_pct: 0.01 }
    }
}

/// Result of level detection for one analysis cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDetection {
    /// Detected levels in index units
    pub levels: LevelSet,
    /// Market regime implied by price vs. gamma flip
    pub regime: Regime,
    /// Index price the detection ran against
    pub price: f64,
    /// Dealer put gamma at the put wall, if detected
    pub put_wall_gamma: Option<f64>,
    /// Dealer call gamma at the call wall, if detected
    pub call_wall_gamma: Option<f64>,
    /// Net dealer gamma at the flip strike, if detected
    pub gamma_flip_net: Option<f64>,
}

/// Main level detector
pub struct LevelDetector {
    config: DetectorConfig,
}

impl LevelDetector {
    /// Create a detector with default configuration
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run detection on an aggregated profile at the current index price.
    ///
    /// Errors with `MissingPrice` when the price is non-finite or
    /// non-positive; the caller must supply a usable fallback instead.
    pub fn detect(&self, profile: &GammaProfile, price: f64) -> GexResult<LevelDetection> {
        if !price.is_finite() || price <= 0.0 {
            return Err(GexError::missing_price(format!(
                "level detection requires a usable index price, got {price}"
            )));
        }

        let put_wall = select_max(
            profile.iter().filter(|a| a.strike < price),
            |a| a.put_gamma.abs(),
        );
        let call_wall = select_max(
            profile.iter().filter(|a| a.strike > price),
            |a| a.call_gamma.abs(),
        );

        let band_lo = price * (1.0 - self.config.flip_band_pct);
        let band_hi = price * (1.0 + self.config.flip_band_pct);
        let gamma_flip = select_min(
            profile
                .iter()
                .filter(|a| a.strike >= band_lo && a.strike <= band_hi),
            |a| a.net_gamma.abs(),
        );

        let levels = LevelSet {
            put_wall: put_wall.map(|a| a.strike),
            call_wall: call_wall.map(|a| a.strike),
            gamma_flip: gamma_flip.map(|a| a.strike),
        };

        // With no flip strike the comparison degenerates to price vs. itself
        // and the regime defaults to long gamma. Treat that regime as
        // low-confidence.
        let flip_strike = levels.gamma_flip.unwrap_or(price);
        let regime = if price > flip_strike {
            Regime::ShortGamma
        } else {
            Regime::LongGamma
        };

        Ok(LevelDetection {
            levels,
            regime,
            price,
            put_wall_gamma: put_wall.map(|a| a.put_gamma),
            call_wall_gamma: call_wall.map(|a| a.call_gamma),
            gamma_flip_net: gamma_flip.map(|a| a.net_gamma),
        })
    }
}

impl Default for LevelDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function with default configuration
pub fn detect_levels(profile: &GammaProfile, price: f64) -> GexResult<LevelDetection> {
    LevelDetector::new().detect(profile, price)
}

/// First aggregate (in ascending-strike order) maximizing `key`.
///
/// Strict comparison keeps the earliest candidate, so the lowest strike wins
/// among ties.
fn select_max<'a>(
    candidates: impl Iterator<Item = &'a StrikeAggregate>,
    key: impl Fn(&StrikeAggregate) -> f64,
) -> Option<&'a StrikeAggregate> {
    let mut best: Option<(&StrikeAggregate, f64)> = None;
    for agg in candidates {
        let k = key(agg);
        if best.map(|(_, bk)| k > bk).unwrap_or(true) {
            best = Some((agg, k));
        }
    }
    best.map(|(a, _)| a)
}

/// First aggregate (in ascending-strike order) minimizing `key`.
fn select_min<'a>(
    candidates: impl Iterator<Item = &'a StrikeAggregate>,
    key: impl Fn(&StrikeAggregate) -> f64,
) -> Option<&'a StrikeAggregate> {
    let mut best: Option<(&StrikeAggregate, f64)> = None;
    for agg in candidates {
        let k = key(agg);
        if best.map(|(_, bk)| k < bk).unwrap_or(true) {
            best = Some((agg, k));
        }
    }
    best.map(|(a, _)| a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Contract, OptionType};
    use crate::engine::aggregate::aggregate_by_strike;

    fn profile_from(rows: &[(f64, OptionType, u64, u64, f64)]) -> GammaProfile {
        let contracts: Vec<Contract> = rows
            .iter()
            .map(|&(k, t, v, oi, g)| Contract::new(k, t, v, oi, g).unwrap())
            .collect();
        aggregate_by_strike(&contracts)
    }

    #[test]
    fn test_empty_profile_all_absent() {
        let detection = detect_levels(&GammaProfile::default(), 5900.0).unwrap();

        assert!(detection.levels.put_wall.is_none());
        assert!(detection.levels.call_wall.is_none());
        assert!(detection.levels.gamma_flip.is_none());
        assert_eq!(detection.regime, Regime::LongGamma);
    }

    #[test]
    fn test_missing_price_is_an_error() {
        let profile = profile_from(&[(5800.0, OptionType::Put, 10, 100, 0.002)]);

        assert!(matches!(
            detect_levels(&profile, f64::NAN),
            Err(GexError::MissingPrice(_))
        ));
        assert!(matches!(
            detect_levels(&profile, 0.0),
            Err(GexError::MissingPrice(_))
        ));
    }

    #[test]
    fn test_put_wall_strictly_below_price() {
        // Only strikes at or above price: no put wall
        let profile = profile_from(&[
            (5900.0, OptionType::Put, 10, 1000, 0.002),
            (6000.0, OptionType::Put, 10, 2000, 0.002),
        ]);

        let detection = detect_levels(&profile, 5900.0).unwrap();
        assert!(detection.levels.put_wall.is_none());
    }

    #[test]
    fn test_call_wall_strictly_above_price() {
        let profile = profile_from(&[
            (5800.0, OptionType::Call, 10, 1000, 0.002),
            (5900.0, OptionType::Call, 10, 2000, 0.002),
        ]);

        let detection = detect_levels(&profile, 5900.0).unwrap();
        assert!(detection.levels.call_wall.is_none());
    }

    #[test]
    fn test_wall_selection_by_magnitude() {
        let profile = profile_from(&[
            (5800.0, OptionType::Put, 0, 1000, 0.002), // |put_gamma| = 200
            (5850.0, OptionType::Put, 0, 200, 0.001),  // |put_gamma| = 20
            (5950.0, OptionType::Call, 0, 500, 0.001), // |call_gamma| = 50
            (6000.0, OptionType::Call, 0, 1500, 0.0015), // |call_gamma| = 225
        ]);

        let detection = detect_levels(&profile, 5900.0).unwrap();
        assert_eq!(detection.levels.put_wall, Some(5800.0));
        assert_eq!(detection.put_wall_gamma, Some(-200.0));
        assert_eq!(detection.levels.call_wall, Some(6000.0));
        assert_eq!(detection.call_wall_gamma, Some(-225.0));
    }

    #[test]
    fn test_tie_break_lowest_strike() {
        // Identical put gamma magnitude at 5800 and 5850
        let profile = profile_from(&[
            (5800.0, OptionType::Put, 0, 1000, 0.002),
            (5850.0, OptionType::Put, 0, 1000, 0.002),
        ]);

        let detection = detect_levels(&profile, 5900.0).unwrap();
        assert_eq!(detection.levels.put_wall, Some(5800.0));
    }

    #[test]
    fn test_gamma_flip_band_inclusive() {
        // Band at price 5900 is [5841, 5959]
        let profile = profile_from(&[
            (5841.0, OptionType::Call, 0, 10, 0.001),  // net -1, in band
            (5900.0, OptionType::Call, 0, 100, 0.001), // net -10, in band
            (5960.0, OptionType::Call, 0, 1, 0.00001), // just outside band
        ]);

        let detection = detect_levels(&profile, 5900.0).unwrap();
        // 5841 has the smallest |net_gamma| among in-band strikes
        assert_eq!(detection.levels.gamma_flip, Some(5841.0));
        assert_eq!(detection.gamma_flip_net, Some(-1.0));
    }

    #[test]
    fn test_gamma_flip_absent_outside_band() {
        let profile = profile_from(&[
            (5700.0, OptionType::Put, 0, 100, 0.002),
            (6100.0, OptionType::Call, 0, 100, 0.002),
        ]);

        let detection = detect_levels(&profile, 5900.0).unwrap();
        assert!(detection.levels.gamma_flip.is_none());
        // Fallback: price compared to itself degenerates to long gamma
        assert_eq!(detection.regime, Regime::LongGamma);
    }

    #[test]
    fn test_regime_consistent_with_flip() {
        let profile = profile_from(&[
            (5870.0, OptionType::Call, 0, 1, 0.000001), // near-zero net, in band
            (5800.0, OptionType::Put, 0, 1000, 0.002),
        ]);

        let detection = detect_levels(&profile, 5900.0).unwrap();
        let flip = detection.levels.gamma_flip.unwrap();
        assert_eq!(
            detection.regime == Regime::ShortGamma,
            detection.price > flip
        );
        // Price 5900 above flip 5870: dealers short gamma
        assert_eq!(detection.regime, Regime::ShortGamma);
    }
}
