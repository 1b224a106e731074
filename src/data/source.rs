//! Contract sources
//!
//! The engine has no opinion on where contracts come from; anything that can
//! produce a validated contract set for one analysis cycle implements
//! `ContractSource`. Two implementations live here: a seedable synthetic
//! generator for offline runs and testing, and the range/volume pre-filter
//! applied to any source's output before aggregation. The live Yahoo feed
//! implements the same trait in `data::yahoo`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::{Contract, GexResult, OptionType};
use crate::engine::FilterConfig;

/// A provider of one analysis cycle's contract set.
pub trait ContractSource {
    fn fetch_contracts(&self) -> GexResult<Vec<Contract>>;
}

/// Synthetic 0DTE-style contract generator.
///
/// Strikes every 5 points within ±100 of the center price. Volume, open
/// interest, and gamma decay exponentially with distance from the center,
/// which produces plausible wall/flip structure around spot.
pub struct SyntheticGenerator {
    center_price: f64,
    seed: Option<u64>,
}

impl SyntheticGenerator {
    /// Strike increment in points
    pub const STRIKE_STEP: f64 = 5.0;
    /// Half-width of the generated strike range in points
    pub const STRIKE_HALF_RANGE: f64 = 100.0;

    pub fn new(center_price: f64) -> Self {
        Self {
            center_price,
            seed: None,
        }
    }

    /// Fix the RNG seed for reproducible output
    pub fn with_seed(center_price: f64, seed: u64) -> Self {
        Self {
            center_price,
            seed: Some(seed),
        }
    }

    /// Generate the contract set.
    pub fn generate(&self) -> Vec<Contract> {
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut contracts = Vec::new();
        let mut strike = self.center_price - Self::STRIKE_HALF_RANGE;

        while strike < self.center_price + Self::STRIKE_HALF_RANGE {
            if strike <= 0.0 {
                strike += Self::STRIKE_STEP;
                continue;
            }
            let distance = (strike - self.center_price).abs();
            let gamma = 0.001 * (-distance / 30.0).exp();

            let call_volume = (1000.0 * (-distance / 50.0).exp()).max(100.0) as u64;
            let call_oi = (call_volume as f64 * rng.gen_range(2.0..5.0)) as u64;
            contracts.push(
                Contract::new(strike, OptionType::Call, call_volume, call_oi, gamma)
                    .expect("synthetic strikes are positive and finite"),
            );

            let put_volume = (1200.0 * (-distance / 50.0).exp()).max(100.0) as u64;
            let put_oi = (put_volume as f64 * rng.gen_range(2.0..5.0)) as u64;
            contracts.push(
                Contract::new(strike, OptionType::Put, put_volume, put_oi, gamma)
                    .expect("synthetic strikes are positive and finite"),
            );

            strike += Self::STRIKE_STEP;
        }

        tracing::info!(
            "Generated {} synthetic contracts around {:.2}",
            contracts.len(),
            self.center_price
        );

        contracts
    }
}

impl ContractSource for SyntheticGenerator {
    fn fetch_contracts(&self) -> GexResult<Vec<Contract>> {
        Ok(self.generate())
    }
}

/// Keep contracts with strikes within ±`strike_range_percent` of the current
/// price and at least `min_volume_threshold` traded volume. Both band edges
/// are inclusive.
pub fn filter_by_range(
    contracts: &[Contract],
    current_price: f64,
    config: &FilterConfig,
) -> Vec<Contract> {
    let range = config.strike_range_percent / 100.0;
    let lower = current_price * (1.0 - range);
    let upper = current_price * (1.0 + range);

    let filtered: Vec<Contract> = contracts
        .iter()
        .filter(|c| {
            c.strike >= lower && c.strike <= upper && c.volume >= config.min_volume_threshold
        })
        .cloned()
        .collect();

    tracing::info!(
        "Filtered {} of {} contracts within ±{}% ({:.2} - {:.2})",
        filtered.len(),
        contracts.len(),
        config.strike_range_percent,
        lower,
        upper
    );

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_covers_expected_strikes() {
        let contracts = SyntheticGenerator::with_seed(5850.0, 7).generate();

        // 40 strikes, one call and one put each
        assert_eq!(contracts.len(), 80);

        let min = contracts.iter().map(|c| c.strike).fold(f64::MAX, f64::min);
        let max = contracts.iter().map(|c| c.strike).fold(f64::MIN, f64::max);
        assert_eq!(min, 5750.0);
        assert_eq!(max, 5945.0);
    }

    #[test]
    fn test_generator_seed_reproducible() {
        let a = SyntheticGenerator::with_seed(5850.0, 42).generate();
        let b = SyntheticGenerator::with_seed(5850.0, 42).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_gamma_decays_with_distance() {
        let contracts = SyntheticGenerator::with_seed(5850.0, 1).generate();

        let atm = contracts.iter().find(|c| c.strike == 5850.0).unwrap();
        let far = contracts.iter().find(|c| c.strike == 5750.0).unwrap();
        assert!(atm.gamma > far.gamma);
    }

    #[test]
    fn test_filter_by_range() {
        let contracts = vec![
            Contract::new(5800.0, OptionType::Put, 100, 10, 0.001).unwrap(),
            Contract::new(5900.0, OptionType::Call, 100, 10, 0.001).unwrap(),
            Contract::new(6100.0, OptionType::Call, 100, 10, 0.001).unwrap(), // out of band
            Contract::new(5905.0, OptionType::Call, 5, 10, 0.001).unwrap(),   // thin volume
        ];

        let config = FilterConfig {
            strike_range_percent: 2.0,
            min_volume_threshold: 50,
        };
        let filtered = filter_by_range(&contracts, 5900.0, &config);

        let strikes: Vec<f64> = filtered.iter().map(|c| c.strike).collect();
        assert_eq!(strikes, vec![5800.0, 5900.0]);
    }

    #[test]
    fn test_filter_keeps_strikes_exactly_on_band_edges() {
        // 2% of 6000 lands exactly on 5880 and 6120; both edges stay in
        let contracts = vec![
            Contract::new(5880.0, OptionType::Put, 100, 10, 0.001).unwrap(),
            Contract::new(6120.0, OptionType::Call, 100, 10, 0.001).unwrap(),
            Contract::new(5879.0, OptionType::Put, 100, 10, 0.001).unwrap(),
            Contract::new(6121.0, OptionType::Call, 100, 10, 0.001).unwrap(),
        ];

        let config = FilterConfig {
            strike_range_percent: 2.0,
            min_volume_threshold: 50,
        };
        let filtered = filter_by_range(&contracts, 6000.0, &config);

        let strikes: Vec<f64> = filtered.iter().map(|c| c.strike).collect();
        assert_eq!(strikes, vec![5880.0, 6120.0]);
    }
}
