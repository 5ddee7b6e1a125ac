use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::SourceError;

const PRICE_ENDPOINT: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=ethereum&vs_currencies=usd";

/// CoinGecko spot price lookup for ETH/USD.
pub struct CoinGeckoClient {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    ethereum: Option<UsdQuote>,
}

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: Option<f64>,
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(8))
                .build()
                .unwrap(),
        }
    }

    pub async fn fetch_eth_price(&self) -> Result<f64, SourceError> {
        let resp = self
            .client
            .get(PRICE_ENDPOINT)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Network(format!("status {}", resp.status())));
        }

        let data: SimplePriceResponse = resp
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        data.ethereum
            .and_then(|q| q.usd)
            .ok_or_else(|| SourceError::Parse("no ethereum.usd field".to_string()))
    }
}
