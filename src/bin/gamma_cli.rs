//! Gamma Levels CLI
//!
//! Command-line walk-through of the gamma exposure pipeline.

use chrono::Utc;
use gamma_levels::prelude::*;

fn main() {
    println!("Gamma Levels - Dealer Gamma Exposure");
    println!("====================================\n");

    // Example: synthetic analysis cycle
    let spx_price = 5850.0;
    let es_price = 5852.5;

    println!("Synthetic Analysis Example:");
    println!("  SPX: ${:.2}", spx_price);
    println!("  ES: ${:.2}", es_price);
    println!("  Spread: {:.2}\n", es_price - spx_price);

    let config = EngineConfig::default();

    let generator = SyntheticGenerator::with_seed(spx_price, 42);
    let contracts = generator.generate();
    println!("Generated {} contracts", contracts.len());

    let filtered = filter_by_range(&contracts, spx_price, &config.filter);
    println!("Filtered to {} contracts near spot\n", filtered.len());

    let prices = SessionPrices::new(spx_price, es_price);
    let engine = GammaEngine::with_config(config.clone());
    let snapshot = match engine.analyze(&filtered, &prices, Utc::now()) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    };

    println!("Regime: {}", snapshot.regime.label());
    println!("\nSPX Levels:");
    for (name, level) in snapshot.levels_spx.present() {
        println!("  {}: ${:.2}", name, level);
    }
    println!("\nES Levels:");
    for (name, level) in snapshot.levels_es.present() {
        println!("  {}: ${:.2}", name, level);
    }

    println!("\nGamma profile: {} strikes", snapshot.gamma_profile.len());
    println!("\nTop strikes by importance:");
    for agg in snapshot.gamma_profile.rank_by_importance(config.top_levels_count) {
        println!(
            "  ${:.0}  net {:.1}  (vol {})",
            agg.strike, agg.net_gamma, agg.volume
        );
    }

    // Alert conditions on the ES levels
    let conditions = conditions_from_levels(&snapshot.levels_es, 0.5);
    println!("\nArmed {} alert conditions", conditions.len());

    // Try fetching real prices
    println!("\n--- Live Data ---");
    println!("Attempting to fetch SPX/ES prices from Yahoo Finance...\n");

    let yahoo = YahooClient::new();
    match yahoo.session_prices() {
        Ok(live) => {
            println!("Live prices:");
            println!("  SPX: ${:.2}", live.spx_price);
            println!("  ES: ${:.2}", live.es_price);
            println!("  Spread: {:.2}", live.spread);
        }
        Err(e) => {
            println!("Could not fetch prices: {:?}", e);
            println!("(This is expected if you're offline or Yahoo API is unavailable)");
        }
    }

    println!("\n--- Done ---");
}
