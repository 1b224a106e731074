//! # Gamma Levels - Dealer Gamma Exposure Engine
//!
//! Estimates options-dealer gamma exposure for the SPX index and its ES
//! futures proxy, and derives actionable price levels from it.
//!
//! ## Overview
//!
//! Dealers hedging the listed options book leave footprints at strikes with
//! concentrated open interest. Assuming dealers are net short the options
//! they quote, per-strike dealer gamma pinpoints:
//! - **Put Wall**: hypothesized support below spot
//! - **Call Wall**: hypothesized resistance above spot
//! - **Gamma Flip**: the pivot near spot where net dealer gamma crosses zero
//!
//! ## Key Components
//!
//! - **Engine**: dealer gamma per contract, per-strike aggregation, level
//!   detection, regime classification, ES conversion, snapshot assembly
//! - **Data**: Yahoo Finance prices/chains, a synthetic contract generator,
//!   JSON snapshot/spread stores, daily CSV summary
//!
//! ## Usage
//!
//! ```rust
//! use gamma_levels::prelude::*;
//! use chrono::Utc;
//!
//! let spx_price = 5850.0;
//! let contracts = SyntheticGenerator::with_seed(spx_price, 42).generate();
//! let prices = SessionPrices::new(spx_price, spx_price + 2.5);
//!
//! let snapshot = analyze_session(&contracts, &prices, Utc::now()).unwrap();
//! println!("Regime: {}", snapshot.regime.label());
//! for (name, level) in snapshot.levels_es.present() {
//!     println!("{}: ES {:.2}", name, level);
//! }
//! ```
//!
//! ## What This Engine Does
//!
//! - Aggregates supplied per-contract gammas into a per-strike profile
//! - Detects walls, the flip strike, and the prevailing regime
//! - Converts index levels to futures terms via the session spread
//!
//! ## What This Engine Does NOT Do
//!
//! - Derive Greeks from a pricing model (gamma is an input)
//! - Schedule itself, render charts, or deliver notifications
//! - Predict prices

pub mod core;
pub mod data;
pub mod engine;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{Contract, GexError, GexResult, OptionType, CONTRACT_MULTIPLIER};

    // Engine
    pub use crate::engine::{
        aggregate_by_strike,
        analyze_session,
        conditions_from_levels,
        dealer_exposure,
        dealer_gamma,
        detect_levels,
        AlertCondition,
        DealerExposure,
        DetectorConfig,
        EngineConfig,
        FilterConfig,
        GammaEngine,
        GammaProfile,
        LevelDetection,
        LevelDetector,
        LevelSet,
        Regime,
        SessionPrices,
        Snapshot,
        SnapshotBuilder,
        StrikeAggregate,
        // Spread conversion
        convert_levels,
    };

    // Data collaborators
    pub use crate::data::{
        filter_by_range, write_daily_table, ContractSource, SnapshotStore, SpotQuote, SpreadCache,
        SpreadRecord, StoreConfig, SyntheticGenerator, YahooClient, YahooContractFeed,
    };
}

// Re-export main types at crate root
pub use crate::core::{GexError, GexResult};
pub use crate::engine::{GammaEngine, Snapshot};
