use serde::{Deserialize, Serialize};

/// Market-wide figures, fetched once per run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarketContext {
    pub eth_price_usd: f64,
    pub gas_gwei: f64,
    /// ETH cost of one rebalance transaction at the configured gas estimate.
    pub gas_eth: f64,
}

/// One ranked pool in the output document. APYs are percentages here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub protocol: String,
    pub symbol: String,
    #[serde(rename = "tvlUsd")]
    pub tvl_usd: f64,
    pub base_apy: f64,
    /// Gas-adjusted yield. Never negative: pools below break-even report 0.
    pub net_apy: f64,
    pub url: String,
}

/// The persisted output of one fetch-and-rank cycle. Overwrites the previous
/// snapshot in full; there is no history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// RFC 3339 UTC generation time.
    pub timestamp: String,
    pub eth_price_usd: f64,
    pub gas_gwei: f64,
    pub gas_eth: f64,
    pub user_eth_amount: f64,
    /// Sorted descending by net_apy.
    pub results: Vec<RankedResult>,
}
