//! Example: analyze gamma levels from hand-built contracts
//!
//! Run with: cargo run --example analyze_levels

use chrono::Utc;
use gamma_levels::prelude::*;

fn main() {
    // Build a small contract set around spot with a deliberate put
    // concentration below and call concentration above
    let spx_price = 5900.0;
    let es_price = 5902.5;

    let mut contracts = Vec::new();
    for i in 0..21 {
        let strike = 5800.0 + i as f64 * 10.0;
        let distance = (strike - spx_price).abs();
        let gamma = 0.001 * (-distance / 40.0).exp();

        // Heavy put open interest at 5820, heavy call open interest at 5980
        let put_oi = if strike == 5820.0 { 5000 } else { 500 };
        let call_oi = if strike == 5980.0 { 4000 } else { 400 };

        contracts.push(Contract::new(strike, OptionType::Put, 200, put_oi, gamma).unwrap());
        contracts.push(Contract::new(strike, OptionType::Call, 200, call_oi, gamma).unwrap());
    }

    let prices = SessionPrices::new(spx_price, es_price);
    let snapshot = analyze_session(&contracts, &prices, Utc::now()).unwrap();

    // Print results
    println!("=== Gamma Level Analysis ===\n");
    println!("SPX: {:.2}", snapshot.spx_price);
    println!("ES: {:.2} (spread {:+.2})", snapshot.es_price, snapshot.spread);
    println!("Regime: {}\n", snapshot.regime.label());

    println!("--- Levels ---\n");
    for (name, level) in snapshot.levels_spx.present() {
        let es_level = level + snapshot.spread;
        println!("{:<12} SPX {:.2}  ->  ES {:.2}", name, level, es_level);
    }

    println!("\n--- Profile ({} strikes) ---\n", snapshot.gamma_profile.len());
    for agg in snapshot.gamma_profile.iter() {
        let marker = match snapshot.levels_spx.present().iter().find(|(_, v)| *v == agg.strike) {
            Some((name, _)) => format!("  <- {}", name),
            None => String::new(),
        };
        println!(
            "{:.0}: net {:>10.1} (call {:>9.1}, put {:>9.1}){}",
            agg.strike, agg.net_gamma, agg.call_gamma, agg.put_gamma, marker
        );
    }

    // Arm alert conditions on the ES-denominated levels
    let conditions = conditions_from_levels(&snapshot.levels_es, 0.5);
    println!("\n--- Alerts ---\n");
    for cond in &conditions {
        println!(
            "{} armed at ES {:.2} (±{} pts)",
            cond.level_name, cond.es_level, cond.distance_threshold
        );
    }
}
