use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yield_ranker::config::Config;
use yield_ranker::services::{SnapshotBuilder, SnapshotStore};
use yield_ranker::sources::LiveMarketData;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,yield_ranker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n🚀 ETH Yield Ranker Starting...\n");

    let config = Config::load();
    tracing::info!("✓ Configuration loaded");

    // Optional stake override: bad input substitutes the configured default
    let user_eth_amount = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<f64>() {
            Ok(amount) => amount,
            Err(_) => {
                tracing::warn!(
                    "Invalid ETH amount input: {}, using default {}",
                    arg,
                    config.default_eth_amount
                );
                config.default_eth_amount
            }
        },
        None => config.default_eth_amount,
    };

    let source = Arc::new(LiveMarketData::new(&config));
    let store = SnapshotStore::new(config.snapshot_path());
    let builder = SnapshotBuilder::new(source, store, &config);

    let snapshot = builder.build(user_eth_amount).await;

    tracing::info!("✓ Snapshot built: {}", snapshot.timestamp);

    println!("\nTop results for {} ETH:", snapshot.user_eth_amount);
    for result in snapshot.results.iter().take(8) {
        println!(
            " - {} {} base {:.2}% net {:.2}% · {}",
            result.protocol, result.symbol, result.base_apy, result.net_apy, result.url
        );
    }
}
