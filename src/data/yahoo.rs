//! Yahoo Finance data fetcher
//!
//! Free quotes for the SPX cash index (^GSPC) and the ES front-month future
//! (ES=F), plus an option-chain feed mapped onto the engine's `Contract`
//! type. Uses Yahoo Finance's unofficial API.
//!
//! Note: data is delayed ~15 minutes and intended for personal use. Callers
//! that need a guaranteed price must supply their own fallback when a fetch
//! fails; the engine itself never invents one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Contract, GexError, GexResult, OptionType};
use crate::engine::SessionPrices;

use super::source::ContractSource;

/// Yahoo symbol for the SPX cash index
pub const SPX_SYMBOL: &str = "^GSPC";
/// Yahoo symbol for the ES front-month future
pub const ES_SYMBOL: &str = "ES=F";

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: "https://query1.finance.yahoo.com/v7/finance".to_string(),
        }
    }

    /// Get current quote for a symbol
    pub fn get_quote(&self, symbol: &str) -> GexResult<SpotQuote> {
        let url = format!("{}/quote?symbols={}", self.base_url, symbol);

        let response: YahooQuoteResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| GexError::Network(e.to_string()))?
            .json()
            .map_err(|e| GexError::Data(format!("Failed to parse quote: {}", e)))?;

        let result = response
            .quote_response
            .result
            .into_iter()
            .next()
            .ok_or_else(|| GexError::Data("No quote data returned".into()))?;

        Ok(SpotQuote {
            symbol: symbol.to_string(),
            price: result.regular_market_price,
            timestamp: Utc::now(),
        })
    }

    /// Current SPX cash price
    pub fn get_spx_price(&self) -> GexResult<f64> {
        self.get_quote(SPX_SYMBOL).map(|q| q.price)
    }

    /// Current ES front-month price
    pub fn get_es_price(&self) -> GexResult<f64> {
        self.get_quote(ES_SYMBOL).map(|q| q.price)
    }

    /// Fetch both prices and derive a fresh session spread
    pub fn session_prices(&self) -> GexResult<SessionPrices> {
        let spx = self.get_spx_price()?;
        let es = self.get_es_price()?;
        let prices = SessionPrices::new(spx, es);
        tracing::info!(
            "Session prices: SPX {:.2}, ES {:.2}, spread {:.2}",
            prices.spx_price,
            prices.es_price,
            prices.spread
        );
        Ok(prices)
    }

    /// Get the option chain for a symbol, mapped to engine contracts.
    ///
    /// Rows without a usable gamma are skipped: the engine consumes supplied
    /// Greeks and does not derive them. Pass `expiry` to select a specific
    /// expiration, `None` for the nearest one.
    pub fn get_option_contracts(
        &self,
        symbol: &str,
        expiry: Option<NaiveDate>,
    ) -> GexResult<Vec<Contract>> {
        let url = match expiry {
            Some(date) => {
                let ts = date
                    .and_hms_opt(16, 0, 0)
                    .expect("valid wall-clock time")
                    .and_utc()
                    .timestamp();
                format!("{}/options/{}?date={}", self.base_url, symbol, ts)
            }
            None => format!("{}/options/{}", self.base_url, symbol),
        };

        let response: YahooOptionsResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| GexError::Network(e.to_string()))?
            .json()
            .map_err(|e| GexError::Data(format!("Failed to parse options: {}", e)))?;

        let chain = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| GexError::Data("No options data returned".into()))?;

        let mut contracts = Vec::new();
        let mut skipped = 0usize;

        if let Some(options) = chain.options.first() {
            for (data, option_type) in options
                .calls
                .iter()
                .map(|d| (d, OptionType::Call))
                .chain(options.puts.iter().map(|d| (d, OptionType::Put)))
            {
                match convert_option_data(data, option_type) {
                    Some(contract) => contracts.push(contract),
                    None => skipped += 1,
                }
            }
        }

        tracing::info!(
            "Fetched {} contracts for {} ({} rows skipped)",
            contracts.len(),
            symbol,
            skipped
        );

        Ok(contracts)
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Map one Yahoo option row to a validated contract. Rows missing a strike
/// or gamma, or failing validation, are dropped.
fn convert_option_data(data: &YahooOptionData, option_type: OptionType) -> Option<Contract> {
    let strike = data.strike?;
    let gamma = data.gamma?;

    Contract::new(
        strike,
        option_type,
        data.volume.unwrap_or(0).max(0) as u64,
        data.open_interest.unwrap_or(0).max(0) as u64,
        gamma,
    )
    .ok()
}

/// Live option feed for one underlying, usable wherever the engine accepts a
/// `ContractSource`.
pub struct YahooContractFeed {
    client: YahooClient,
    symbol: String,
    expiry: Option<NaiveDate>,
}

impl YahooContractFeed {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            client: YahooClient::new(),
            symbol: symbol.into(),
            expiry: None,
        }
    }

    /// Pin a specific expiration date
    pub fn with_expiry(mut self, expiry: NaiveDate) -> Self {
        self.expiry = Some(expiry);
        self
    }
}

impl ContractSource for YahooContractFeed {
    fn fetch_contracts(&self) -> GexResult<Vec<Contract>> {
        self.client.get_option_contracts(&self.symbol, self.expiry)
    }
}

/// Spot price quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotQuote {
    pub symbol: String,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResult,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResult {
    result: Vec<YahooQuoteData>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteData {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: f64,
}

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    calls: Vec<YahooOptionData>,
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    strike: Option<f64>,
    volume: Option<i64>,
    #[serde(rename = "openInterest")]
    open_interest: Option<i64>,
    // Greeks are not always present
    gamma: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_option_data_requires_gamma() {
        let data = YahooOptionData {
            strike: Some(5900.0),
            volume: Some(120),
            open_interest: Some(450),
            gamma: None,
        };
        assert!(convert_option_data(&data, OptionType::Call).is_none());

        let data = YahooOptionData {
            gamma: Some(0.0015),
            ..data
        };
        let contract = convert_option_data(&data, OptionType::Call).unwrap();
        assert_eq!(contract.strike, 5900.0);
        assert_eq!(contract.volume, 120);
        assert_eq!(contract.open_interest, 450);
    }

    #[test]
    fn test_convert_option_data_drops_invalid_strike() {
        let data = YahooOptionData {
            strike: Some(-1.0),
            volume: None,
            open_interest: None,
            gamma: Some(0.001),
        };
        assert!(convert_option_data(&data, OptionType::Put).is_none());
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_spx_price() {
        let client = YahooClient::new();
        let price = client.get_spx_price().unwrap();
        assert!(price > 0.0);
        println!("SPX price: {}", price);
    }

    #[test]
    #[ignore] // Requires network
    fn test_session_prices() {
        let client = YahooClient::new();
        let prices = client.session_prices().unwrap();
        assert!(prices.spx_price > 0.0);
        assert!(prices.es_price > 0.0);
        println!("Spread: {}", prices.spread);
    }
}
