//! Pure gas and yield math. No I/O, no side effects.

/// ETH cost of a transaction: gas units priced in gwei, converted via wei
/// (1 gwei = 1e9 wei, 1 ETH = 1e18 wei).
pub fn gas_cost_eth(gas_units: u64, gas_price_gwei: f64) -> f64 {
    let wei = gas_units as f64 * gas_price_gwei * 1e9;
    wei / 1e18
}

/// Net yield after amortizing one rebalance against the stake. A zero stake
/// has no gas impact by definition. Pools are never reported below
/// break-even: the result clamps to zero.
pub fn net_apy_decimal(
    base_apy_decimal: f64,
    gas_cost_eth: f64,
    eth_price_usd: f64,
    user_stake_eth: f64,
) -> f64 {
    let stake_usd = user_stake_eth * eth_price_usd;
    let gas_usd = gas_cost_eth * eth_price_usd;
    let gas_impact = if stake_usd > 0.0 { gas_usd / stake_usd } else { 0.0 };
    (base_apy_decimal - gas_impact).max(0.0)
}
