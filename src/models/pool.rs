use serde::{Deserialize, Serialize};

/// Canonical pool shape after normalization. Only ETH/WETH pools above the
/// TVL floor are ever constructed; everything else is dropped at the
/// normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedPool {
    pub protocol: String,
    pub symbol: String,
    /// Yield as a fraction of principal per year (0.05 = 5%).
    pub base_apy_decimal: f64,
    pub tvl_usd: f64,
    /// Deep link to the pool's detail page, or "n/a".
    pub url: String,
}
