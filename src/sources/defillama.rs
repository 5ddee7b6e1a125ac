use reqwest::Client;
use std::time::Duration;

use super::RawListing;

/// Candidate listing endpoints, tried in order. The first 2xx response wins.
const POOL_ENDPOINTS: &[&str] = &[
    "https://yields.llama.fi/pools",
    "https://api.llama.fi/pools",
    "https://yields.llama.fi/poolsV2",
];

/// DefiLlama yields aggregator.
pub struct DefiLlamaClient {
    client: Client,
}

impl DefiLlamaClient {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(12))
                .build()
                .unwrap(),
        }
    }

    /// Walk the candidate endpoints until one answers. Transport errors and
    /// non-2xx statuses advance to the next candidate; an unparseable 2xx
    /// body still counts as a hit and comes back as Text.
    pub async fn fetch_pools(&self) -> RawListing {
        for url in POOL_ENDPOINTS {
            match self.client.get(*url).send().await {
                Ok(resp) if resp.status().is_success() => match resp.text().await {
                    Ok(body) => {
                        return match serde_json::from_str(&body) {
                            Ok(value) => RawListing::Json(value),
                            Err(_) => RawListing::Text(body),
                        };
                    }
                    Err(e) => {
                        tracing::debug!("Listing body read failed for {}: {}", url, e);
                    }
                },
                Ok(resp) => {
                    tracing::debug!("Listing endpoint {} returned {}", url, resp.status());
                }
                Err(e) => {
                    tracing::debug!("Listing endpoint {} unreachable: {}", url, e);
                }
            }
        }

        tracing::warn!("Failed to fetch pools from any DefiLlama endpoint");
        RawListing::Empty
    }
}
