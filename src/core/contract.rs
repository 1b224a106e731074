//! Option contract input data
//!
//! A `Contract` is one option instrument as seen in a single analysis cycle:
//! strike, call/put side, volume, open interest, and the per-contract gamma
//! supplied by the data feed. Contracts are validated once at construction
//! and never mutated afterwards.

use serde::{Deserialize, Serialize};

use super::error::{GexError, GexResult};

/// Shares per listed contract. Fixed property of the options market being
/// modeled, not a tunable.
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

/// One option instrument at a point in time.
///
/// Gamma here is the per-contract Greek as supplied by the feed; this crate
/// does not derive Greeks from a pricing model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Strike price (positive). Callers must pre-normalize strikes to a
    /// canonical increment; strikes are compared exactly downstream.
    pub strike: f64,
    /// Call or put
    #[serde(rename = "type")]
    pub option_type: OptionType,
    /// Trading volume
    pub volume: u64,
    /// Open interest
    pub open_interest: u64,
    /// Per-contract gamma from the feed
    pub gamma: f64,
}

impl Contract {
    /// Build a validated contract.
    ///
    /// Rejects non-positive or non-finite strikes and non-finite gammas at
    /// ingestion, so the aggregator and detector can assume valid inputs.
    pub fn new(
        strike: f64,
        option_type: OptionType,
        volume: u64,
        open_interest: u64,
        gamma: f64,
    ) -> GexResult<Self> {
        if !strike.is_finite() || strike <= 0.0 {
            return Err(GexError::malformed_contract(format!(
                "strike must be positive and finite, got {strike}"
            )));
        }
        if !gamma.is_finite() {
            return Err(GexError::malformed_contract(format!(
                "gamma must be finite, got {gamma}"
            )));
        }

        Ok(Self {
            strike,
            option_type,
            volume,
            open_interest,
            gamma,
        })
    }

    /// Is this a call?
    pub fn is_call(&self) -> bool {
        self.option_type == OptionType::Call
    }

    /// Is this a put?
    pub fn is_put(&self) -> bool {
        self.option_type == OptionType::Put
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_contract() {
        let c = Contract::new(5900.0, OptionType::Call, 100, 500, 0.002).unwrap();
        assert!(c.is_call());
        assert!(!c.is_put());
        assert_eq!(c.open_interest, 500);
    }

    #[test]
    fn test_rejects_bad_strike() {
        assert!(Contract::new(0.0, OptionType::Put, 0, 0, 0.001).is_err());
        assert!(Contract::new(-5.0, OptionType::Put, 0, 0, 0.001).is_err());
        assert!(Contract::new(f64::NAN, OptionType::Put, 0, 0, 0.001).is_err());
    }

    #[test]
    fn test_rejects_non_finite_gamma() {
        assert!(Contract::new(5900.0, OptionType::Call, 10, 10, f64::INFINITY).is_err());
        assert!(Contract::new(5900.0, OptionType::Call, 10, 10, f64::NAN).is_err());
    }

    #[test]
    fn test_serde_type_field() {
        let c = Contract::new(5800.0, OptionType::Put, 10, 20, 0.001).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"type\":\"put\""));

        let back: Contract = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
