use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::SourceError;

/// Gas price used when the oracle is unconfigured, unreachable or empty.
pub const FALLBACK_GAS_GWEI: f64 = 50.0;

const GAS_ORACLE_ENDPOINT: &str =
    "https://api.etherscan.io/api?module=gastracker&action=gasoracle";

/// Etherscan gas oracle. The network is only touched when an API key is
/// configured.
pub struct EtherscanGasClient {
    client: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GasOracleResponse {
    result: Option<GasOracleResult>,
}

// Etherscan returns gas prices as strings.
#[derive(Debug, Deserialize)]
struct GasOracleResult {
    #[serde(rename = "ProposeGasPrice")]
    propose_gas_price: Option<String>,
    #[serde(rename = "SafeGasPrice")]
    safe_gas_price: Option<String>,
    #[serde(rename = "FastGasPrice")]
    fast_gas_price: Option<String>,
}

impl EtherscanGasClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(8))
                .build()
                .unwrap(),
            api_key,
        }
    }

    /// First parseable of proposed/safe/fast gas price. Falls back to the
    /// constant when no key is set or the oracle answer has nothing usable.
    pub async fn fetch_gas_gwei(&self) -> Result<f64, SourceError> {
        if self.api_key.is_empty() {
            tracing::debug!("No Etherscan API key, using {} gwei", FALLBACK_GAS_GWEI);
            return Ok(FALLBACK_GAS_GWEI);
        }

        let url = format!("{}&apikey={}", GAS_ORACLE_ENDPOINT, self.api_key);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Network(format!("status {}", resp.status())));
        }

        let data: GasOracleResponse = resp
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        let gwei = data
            .result
            .and_then(|r| {
                [r.propose_gas_price, r.safe_gas_price, r.fast_gas_price]
                    .into_iter()
                    .flatten()
                    .find_map(|s| s.parse::<f64>().ok())
            })
            .unwrap_or(FALLBACK_GAS_GWEI);

        Ok(gwei)
    }
}
