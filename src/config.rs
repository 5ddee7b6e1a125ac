use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub etherscan_api_key: String,
    #[serde(default = "default_eth_amount")]
    pub default_eth_amount: f64,
    #[serde(default = "default_eth_price")]
    pub fallback_eth_price_usd: f64,
    #[serde(default = "default_gas_units")]
    pub gas_units_rebalance: u64,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_eth_amount() -> f64 { 1.0 }
fn default_eth_price() -> f64 { 1600.0 }
fn default_gas_units() -> u64 { 210_000 }
fn default_data_dir() -> String { "./data".to_string() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    /// Layered load: config.toml if present and valid, environment variables
    /// otherwise. Never fails the run.
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("config.toml invalid ({}), falling back to environment", e);
                }
            },
            Err(_) => {
                tracing::debug!("No config.toml, falling back to environment");
            }
        }
        Self::from_env()
    }

    /// Environment-variable configuration with hard defaults. Unparseable
    /// values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            etherscan_api_key: std::env::var("ETHERSCAN_API_KEY").unwrap_or_default(),
            default_eth_amount: env_f64("DEFAULT_ETH_AMOUNT", default_eth_amount()),
            fallback_eth_price_usd: env_f64("ETH_PRICE_USD", default_eth_price()),
            gas_units_rebalance: env_u64("GAS_UNITS_REBALANCE", default_gas_units()),
            storage: StorageConfig::default(),
        }
    }

    /// Fixed output location, overwritten wholesale on every run.
    pub fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir).join("snapshot.json")
    }
}

fn env_f64(key: &str, fallback: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

fn env_u64(key: &str, fallback: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.etherscan_api_key, "");
        assert_eq!(config.default_eth_amount, 1.0);
        assert_eq!(config.fallback_eth_price_usd, 1600.0);
        assert_eq!(config.gas_units_rebalance, 210_000);
        assert_eq!(config.storage.data_dir, "./data");
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: Config = toml::from_str(
            r#"
            default_eth_amount = 2.5

            [storage]
            data_dir = "/tmp/yr"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_eth_amount, 2.5);
        assert_eq!(config.fallback_eth_price_usd, 1600.0);
        assert_eq!(config.storage.data_dir, "/tmp/yr");
        assert_eq!(config.snapshot_path(), PathBuf::from("/tmp/yr/snapshot.json"));
    }
}
