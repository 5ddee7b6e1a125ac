use std::sync::Arc;

use crate::config::Config;
use crate::models::{MarketContext, NormalizedPool, RankedResult, Snapshot};
use crate::sources::MarketDataSource;

use super::{economics, normalizer, SnapshotStore};

/// Orchestrates one fetch-normalize-rank-persist cycle.
pub struct SnapshotBuilder {
    source: Arc<dyn MarketDataSource>,
    store: SnapshotStore,
    gas_units_rebalance: u64,
}

impl SnapshotBuilder {
    pub fn new(source: Arc<dyn MarketDataSource>, store: SnapshotStore, config: &Config) -> Self {
        Self {
            source,
            store,
            gas_units_rebalance: config.gas_units_rebalance,
        }
    }

    /// All fetches are sequential, and every failure path below this call
    /// degrades to a default, so the returned snapshot is always well-formed
    /// even when the result list is empty. Persistence failures are logged
    /// by the store and do not affect the returned value.
    pub async fn build(&self, user_eth_amount: f64) -> Snapshot {
        let raw = self.source.fetch_pool_listing().await;
        let pools = normalizer::normalize(&raw);

        let eth_price_usd = self.source.fetch_eth_price_usd().await;
        let gas_gwei = self.source.fetch_gas_price_gwei().await;
        let gas_eth = economics::gas_cost_eth(self.gas_units_rebalance, gas_gwei);

        let market = MarketContext {
            eth_price_usd,
            gas_gwei,
            gas_eth,
        };

        tracing::info!("Fetched {} ETH/WETH pools from listing", pools.len());
        tracing::info!(
            "ETH price: ${}, gas: {} gwei, rebalance cost: {:.6} ETH",
            eth_price_usd,
            gas_gwei,
            gas_eth
        );

        let snapshot = assemble_snapshot(&pools, market, user_eth_amount);
        self.store.save(&snapshot);
        snapshot
    }
}

/// Deterministic assembly over already-fetched inputs: identical inputs
/// produce identical ordering and values. Sort is stable, descending by net
/// APY; APYs are rescaled to percent and rounded to 6 decimal places.
pub fn assemble_snapshot(
    pools: &[NormalizedPool],
    market: MarketContext,
    user_eth_amount: f64,
) -> Snapshot {
    let mut results: Vec<RankedResult> = pools
        .iter()
        .map(|pool| {
            let net = economics::net_apy_decimal(
                pool.base_apy_decimal,
                market.gas_eth,
                market.eth_price_usd,
                user_eth_amount,
            );
            RankedResult {
                protocol: pool.protocol.clone(),
                symbol: pool.symbol.clone(),
                tvl_usd: pool.tvl_usd,
                base_apy: round6(pool.base_apy_decimal * 100.0),
                net_apy: round6(net * 100.0),
                url: pool.url.clone(),
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.net_apy
            .partial_cmp(&a.net_apy)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Snapshot {
        timestamp: chrono::Utc::now().to_rfc3339(),
        eth_price_usd: market.eth_price_usd,
        gas_gwei: market.gas_gwei,
        gas_eth: market.gas_eth,
        user_eth_amount,
        results,
    }
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
