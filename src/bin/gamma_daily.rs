//! Daily analysis run
//!
//! Fetches prices and the live option chain (with synthetic fallbacks when
//! offline), reuses or establishes the session spread, runs one analysis
//! cycle, and persists the snapshot plus the daily table.

use std::path::PathBuf;

use chrono::Utc;
use gamma_levels::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_SPX_PRICE: f64 = 5850.0;
const DEFAULT_SPREAD: f64 = 2.5;

/// Yahoo symbol carrying the SPX option chain (the `^GSPC` quote has none)
const SPX_OPTIONS_SYMBOL: &str = "^SPX";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(e) = run() {
        tracing::error!("Daily run failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> GexResult<()> {
    let data_dir = PathBuf::from("./data");
    let store_config = StoreConfig {
        data_dir: data_dir.clone(),
        enabled: true,
    };

    // Prices: live when reachable, defaults otherwise. The engine requires
    // a usable price, so the fallback is supplied here, never invented by
    // the core.
    let yahoo = YahooClient::new();
    let (spx_price, es_price) = match yahoo.session_prices() {
        Ok(live) => (live.spx_price, live.es_price),
        Err(e) => {
            tracing::warn!("Live prices unavailable ({e}), using defaults");
            (DEFAULT_SPX_PRICE, DEFAULT_SPX_PRICE + DEFAULT_SPREAD)
        }
    };

    // The spread is fixed per session: reuse today's record when present.
    let spread_cache = SpreadCache::new(store_config.clone())?;
    let spread = match spread_cache.load_today()? {
        Some(spread) => spread,
        None => spread_cache.save(spx_price, es_price)?,
    };
    let prices = SessionPrices::with_spread(spx_price, es_price, spread);

    // Contracts: the live chain when reachable, synthetic 0DTE otherwise.
    let feed = YahooContractFeed::new(SPX_OPTIONS_SYMBOL);
    let contracts = contracts_or_synthetic(feed.fetch_contracts(), spx_price);
    let config = EngineConfig::default();
    let filtered = filter_by_range(&contracts, spx_price, &config.filter);

    let snapshot = GammaEngine::with_config(config).analyze(&filtered, &prices, Utc::now())?;

    tracing::info!(
        "Regime {} | SPX levels: {:?} | ES levels: {:?}",
        snapshot.regime.as_str(),
        snapshot.levels_spx.present(),
        snapshot.levels_es.present()
    );

    SnapshotStore::new(store_config)?.save(&snapshot)?;
    let table = write_daily_table(&data_dir, &snapshot)?;
    tracing::info!("Daily run complete, table at {:?}", table);

    Ok(())
}

/// A non-empty live chain wins; anything else falls back to synthetic
/// contracts centered on the current price.
fn contracts_or_synthetic(live: GexResult<Vec<Contract>>, center_price: f64) -> Vec<Contract> {
    match live {
        Ok(contracts) if !contracts.is_empty() => contracts,
        Ok(_) => {
            tracing::warn!("Live chain came back empty, generating synthetic contracts");
            SyntheticGenerator::new(center_price).generate()
        }
        Err(e) => {
            tracing::warn!("Live chain unavailable ({e}), generating synthetic contracts");
            SyntheticGenerator::new(center_price).generate()
        }
    }
}
