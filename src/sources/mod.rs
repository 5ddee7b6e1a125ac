pub mod coingecko;
pub mod defillama;
pub mod etherscan;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::Config;
use coingecko::CoinGeckoClient;
use defillama::DefiLlamaClient;
use etherscan::{EtherscanGasClient, FALLBACK_GAS_GWEI};

#[derive(Debug)]
pub enum SourceError {
    Network(String),
    Parse(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Network(e) => write!(f, "Network error: {}", e),
            SourceError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

/// Result of one pool-listing fetch. Only the Json arm can carry pools; a
/// 2xx body that fails JSON parsing is kept as Text so callers can see what
/// the endpoint actually returned.
#[derive(Debug, Clone)]
pub enum RawListing {
    Json(Value),
    Text(String),
    Empty,
}

/// Seam between the snapshot builder and the outside world. Every method
/// resolves to a usable value: failures degrade to typed defaults inside the
/// implementation and never cross this boundary as errors.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch_pool_listing(&self) -> RawListing;
    async fn fetch_eth_price_usd(&self) -> f64;
    async fn fetch_gas_price_gwei(&self) -> f64;
}

/// Live market data backed by DefiLlama, CoinGecko and Etherscan.
pub struct LiveMarketData {
    defillama: DefiLlamaClient,
    coingecko: CoinGeckoClient,
    etherscan: EtherscanGasClient,
    fallback_eth_price_usd: f64,
}

impl LiveMarketData {
    pub fn new(config: &Config) -> Self {
        Self {
            defillama: DefiLlamaClient::new(),
            coingecko: CoinGeckoClient::new(),
            etherscan: EtherscanGasClient::new(config.etherscan_api_key.clone()),
            fallback_eth_price_usd: config.fallback_eth_price_usd,
        }
    }
}

#[async_trait]
impl MarketDataSource for LiveMarketData {
    async fn fetch_pool_listing(&self) -> RawListing {
        self.defillama.fetch_pools().await
    }

    async fn fetch_eth_price_usd(&self) -> f64 {
        match self.coingecko.fetch_eth_price().await {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!(
                    "ETH price fetch failed ({}), using fallback ${}",
                    e,
                    self.fallback_eth_price_usd
                );
                self.fallback_eth_price_usd
            }
        }
    }

    async fn fetch_gas_price_gwei(&self) -> f64 {
        match self.etherscan.fetch_gas_gwei().await {
            Ok(gwei) => gwei,
            Err(e) => {
                tracing::debug!("Gas oracle fetch failed ({}), using {} gwei", e, FALLBACK_GAS_GWEI);
                FALLBACK_GAS_GWEI
            }
        }
    }
}
