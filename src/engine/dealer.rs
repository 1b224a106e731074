//! Dealer gamma exposure per contract
//!
//! Converts one contract's open interest and supplied gamma into a signed
//! dealer-exposure value. The model assumes dealers are net short the listed
//! options (selling to retail), so dealer gamma is the negation of the
//! holder's gamma, scaled by open interest and the contract multiplier.

use crate::core::{Contract, OptionType, CONTRACT_MULTIPLIER};

/// Signed dealer gamma exposure for a single contract, split into call and
/// put contributions so that both sides can be summed independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DealerExposure {
    /// `-open_interest * gamma * 100`
    pub dealer_gamma: f64,
    /// Equals `dealer_gamma` for calls, 0 for puts
    pub call_gamma: f64,
    /// Equals `dealer_gamma` for puts, 0 for calls
    pub put_gamma: f64,
}

/// Dealer gamma for raw open interest and gamma values.
pub fn dealer_gamma(open_interest: u64, gamma: f64) -> f64 {
    -(open_interest as f64) * gamma * CONTRACT_MULTIPLIER
}

/// Compute the full exposure split for one contract.
///
/// The opposite side is defined as exactly 0 so downstream sums need no
/// conditional branching.
pub fn dealer_exposure(contract: &Contract) -> DealerExposure {
    let dg = dealer_gamma(contract.open_interest, contract.gamma);

    let (call_gamma, put_gamma) = match contract.option_type {
        OptionType::Call => (dg, 0.0),
        OptionType::Put => (0.0, dg),
    };

    DealerExposure {
        dealer_gamma: dg,
        call_gamma,
        put_gamma,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dealer_gamma_formula() {
        // O=500, G=0.002 -> -500 * 0.002 * 100 = -100
        assert_eq!(dealer_gamma(500, 0.002), -100.0);
        assert_eq!(dealer_gamma(0, 0.002), 0.0);
        assert_eq!(dealer_gamma(1000, 0.0), 0.0);
    }

    #[test]
    fn test_call_exposure_zeroes_put_side() {
        let c = Contract::new(6000.0, OptionType::Call, 100, 1500, 0.0015).unwrap();
        let exp = dealer_exposure(&c);

        assert_eq!(exp.dealer_gamma, -225.0);
        assert_eq!(exp.call_gamma, -225.0);
        assert_eq!(exp.put_gamma, 0.0);
    }

    #[test]
    fn test_put_exposure_zeroes_call_side() {
        let c = Contract::new(5800.0, OptionType::Put, 100, 1000, 0.002).unwrap();
        let exp = dealer_exposure(&c);

        assert_eq!(exp.dealer_gamma, -200.0);
        assert_eq!(exp.call_gamma, 0.0);
        assert_eq!(exp.put_gamma, -200.0);
    }
}
