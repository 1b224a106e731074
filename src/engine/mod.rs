//! Dealer gamma exposure engine
//!
//! Converts raw per-contract options data into an aggregated per-strike
//! exposure profile and derives actionable price levels from it.
//!
//! Pipeline per analysis cycle:
//! 1. **Dealer gamma**: per-contract signed exposure (`-OI × gamma × 100`)
//! 2. **Strike aggregation**: net/call/put gamma sums per strike, ascending
//! 3. **Level detection**: put wall, call wall, gamma flip, regime
//! 4. **Spread conversion**: index levels shifted to futures terms
//! 5. **Snapshot**: one immutable result object handed to collaborators
//!
//! The engine is pure and synchronous: no I/O, no shared state, no retries.
//! Concurrent cycles are safe because each call works only on its inputs.

pub mod aggregate;
pub mod alert;
pub mod config;
pub mod dealer;
pub mod detector;
pub mod snapshot;
pub mod spread;

pub use aggregate::*;
pub use alert::*;
pub use config::*;
pub use dealer::*;
pub use detector::*;
pub use snapshot::*;
pub use spread::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Contract, GexResult};

/// Market regime implied by price position relative to the gamma flip.
///
/// Derived, never stored independently of the price/flip relationship that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Price at or below the flip: dealer hedging dampens moves
    LongGamma,
    /// Price above the flip: dealer hedging amplifies moves
    ShortGamma,
}

impl Regime {
    /// Wire name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::LongGamma => "long_gamma",
            Regime::ShortGamma => "short_gamma",
        }
    }

    /// User-friendly label for display
    pub fn label(&self) -> &'static str {
        match self {
            Regime::LongGamma => "LONG GAMMA (mean reversion)",
            Regime::ShortGamma => "SHORT GAMMA (higher volatility)",
        }
    }
}

/// Named levels from one detection run. A level is `None` when its
/// detection precondition found no eligible strike; absent levels are
/// omitted from the serialized form rather than emitted as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    /// Hypothesized support below price
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub put_wall: Option<f64>,
    /// Hypothesized resistance above price
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub call_wall: Option<f64>,
    /// Pivot between regimes near price
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub gamma_flip: Option<f64>,
}

impl LevelSet {
    /// No level detected at all?
    pub fn is_empty(&self) -> bool {
        self.put_wall.is_none() && self.call_wall.is_none() && self.gamma_flip.is_none()
    }

    /// Present levels as (name, value) pairs, fixed order
    pub fn present(&self) -> Vec<(&'static str, f64)> {
        [
            ("put_wall", self.put_wall),
            ("call_wall", self.call_wall),
            ("gamma_flip", self.gamma_flip),
        ]
        .into_iter()
        .filter_map(|(name, v)| v.map(|v| (name, v)))
        .collect()
    }
}

/// Index and futures prices for one trading session.
///
/// The spread is fixed at construction and expected to be held for the
/// session; persistence across cycles is the caller's responsibility
/// (see `data::cache::SpreadCache`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionPrices {
    /// SPX cash price
    pub spx_price: f64,
    /// ES front-month price
    pub es_price: f64,
    /// Basis spread (ES - SPX)
    pub spread: f64,
}

impl SessionPrices {
    /// Compute the spread from fresh prices
    pub fn new(spx_price: f64, es_price: f64) -> Self {
        Self {
            spx_price,
            es_price,
            spread: es_price - spx_price,
        }
    }

    /// Use a previously established session spread
    pub fn with_spread(spx_price: f64, es_price: f64, spread: f64) -> Self {
        Self {
            spx_price,
            es_price,
            spread,
        }
    }
}

/// Facade running the full analysis pipeline.
pub struct GammaEngine {
    config: EngineConfig,
}

impl GammaEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one analysis cycle over already-validated contracts.
    ///
    /// Contracts are aggregated as given; range/volume pre-filtering is the
    /// contract source's job (`data::source::filter_by_range`).
    pub fn analyze(
        &self,
        contracts: &[Contract],
        prices: &SessionPrices,
        timestamp: DateTime<Utc>,
    ) -> GexResult<Snapshot> {
        let profile = aggregate_by_strike(contracts);

        let detector = LevelDetector::with_config(self.config.detector.clone());
        let detection = detector.detect(&profile, prices.spx_price)?;

        let levels_es = convert_levels(&detection.levels, prices.spread)?;

        let snapshot = SnapshotBuilder::with_max_strikes(self.config.max_profile_strikes).build(
            prices.spx_price,
            prices.es_price,
            prices.spread,
            detection.regime,
            detection.levels,
            levels_es,
            &profile,
            timestamp,
        );

        Ok(snapshot)
    }
}

impl Default for GammaEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function with default configuration
pub fn analyze_session(
    contracts: &[Contract],
    prices: &SessionPrices,
    timestamp: DateTime<Utc>,
) -> GexResult<Snapshot> {
    GammaEngine::new().analyze(contracts, prices, timestamp)
}
