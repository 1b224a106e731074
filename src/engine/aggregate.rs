//! Strike aggregation
//!
//! Groups per-contract dealer exposure into one rollup per distinct strike
//! and emits an ordered `GammaProfile`. Aggregation is keyed on the exact
//! strike value (no tolerance or rounding), so callers must pre-normalize
//! strikes to a canonical increment before ingestion.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::Contract;

use super::dealer::dealer_exposure;

/// Per-strike rollup of dealer gamma exposure.
///
/// `net_gamma` is always recomputed as `call_gamma + put_gamma` when the
/// profile is built; it is never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikeAggregate {
    /// Strike price (unique within a profile)
    pub strike: f64,
    /// Summed dealer call gamma at this strike
    pub call_gamma: f64,
    /// Summed dealer put gamma at this strike
    pub put_gamma: f64,
    /// `call_gamma + put_gamma`
    pub net_gamma: f64,
    /// Summed volume
    pub volume: u64,
    /// Summed open interest
    pub open_interest: u64,
}

/// Ordered sequence of strike aggregates, strictly ascending by strike with
/// no duplicates. Built fresh each analysis cycle; immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GammaProfile {
    pub strikes: Vec<StrikeAggregate>,
}

impl GammaProfile {
    pub fn len(&self) -> usize {
        self.strikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StrikeAggregate> {
        self.strikes.iter()
    }

    /// Aggregate at an exact strike, if present
    pub fn at_strike(&self, strike: f64) -> Option<&StrikeAggregate> {
        self.strikes.iter().find(|a| a.strike == strike)
    }

    /// Top N strikes by importance score `|net_gamma| * volume`, strongest
    /// first. Strikes with zero volume score zero and sort last.
    pub fn rank_by_importance(&self, top_n: usize) -> Vec<&StrikeAggregate> {
        let mut ranked: Vec<&StrikeAggregate> = self.strikes.iter().collect();
        ranked.sort_by(|a, b| {
            let sa = a.net_gamma.abs() * a.volume as f64;
            let sb = b.net_gamma.abs() * b.volume as f64;
            sb.partial_cmp(&sa)
                .unwrap_or(std::cmp::Ordering::Equal)
                // Equal scores fall back to ascending strike for determinism
                .then_with(|| a.strike.partial_cmp(&b.strike).unwrap_or(std::cmp::Ordering::Equal))
        });
        ranked.truncate(top_n);
        ranked
    }
}

/// Map key over the exact strike bits.
///
/// Strikes are validated positive and finite at contract construction, and
/// IEEE-754 bit order coincides with numeric order for positive floats, so a
/// `BTreeMap` over the bits yields strikes in ascending numeric order
/// independent of input iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct StrikeKey(u64);

impl StrikeKey {
    fn new(strike: f64) -> Self {
        Self(strike.to_bits())
    }
}

/// Group contracts by exact strike and sum dealer exposures.
///
/// Output is strictly ascending by strike with one aggregate per distinct
/// strike. For a fixed input multiset the result is identical across runs
/// and across input permutations.
pub fn aggregate_by_strike(contracts: &[Contract]) -> GammaProfile {
    let mut by_strike: BTreeMap<StrikeKey, StrikeAggregate> = BTreeMap::new();

    for contract in contracts {
        let exposure = dealer_exposure(contract);

        let agg = by_strike
            .entry(StrikeKey::new(contract.strike))
            .or_insert_with(|| StrikeAggregate {
                strike: contract.strike,
                call_gamma: 0.0,
                put_gamma: 0.0,
                net_gamma: 0.0,
                volume: 0,
                open_interest: 0,
            });

        agg.call_gamma += exposure.call_gamma;
        agg.put_gamma += exposure.put_gamma;
        agg.volume += contract.volume;
        agg.open_interest += contract.open_interest;
    }

    let strikes = by_strike
        .into_values()
        .map(|mut agg| {
            agg.net_gamma = agg.call_gamma + agg.put_gamma;
            agg
        })
        .collect();

    GammaProfile { strikes }
}
