use serde_json::Value;

use crate::models::NormalizedPool;
use crate::sources::RawListing;

/// Pools at or below this TVL are dropped.
const MIN_TVL_USD: f64 = 10_000.0;

/// Only ETH-denominated pools are ranked.
const TRACKED_SYMBOLS: &[&str] = &["ETH", "WETH"];

// Alternate keys per field, in precedence order. Listing endpoints and
// schema versions disagree on naming, so every field is an ordered lookup.
const PROTOCOL_KEYS: &[&str] = &["project", "pool", "title", "name"];
const APY_KEYS: &[&str] = &["apy", "apyBase", "apyMean30d", "apyBase10d"];
const TVL_KEYS: &[&str] = &["tvlUsd", "tvl"];
const POOL_ID_KEYS: &[&str] = &["pool", "id", "poolId"];

const POOL_URL_PREFIX: &str = "https://defillama.com/yields/pool/";

/// First non-empty string among `keys`, trimmed.
fn first_string(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| record.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// First non-zero numeric among `keys`. Accepts JSON numbers and numeric
/// strings, which listing endpoints mix freely; zero counts as absent, as
/// endpoints zero-fill fields they do not track.
fn first_number(record: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|k| record.get(*k))
        .filter_map(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .find(|n| *n != 0.0)
}

/// Unit heuristic: figures above 1 are percentages, everything else is
/// already a decimal fraction. A true decimal APY above 100% is
/// indistinguishable from a percentage figure here.
pub fn normalize_apy(value: f64) -> f64 {
    if value > 1.0 {
        value / 100.0
    } else {
        value
    }
}

fn normalize_record(record: &Value) -> Option<NormalizedPool> {
    if !record.is_object() {
        return None;
    }

    let protocol = first_string(record, PROTOCOL_KEYS).unwrap_or_default();
    let symbol = first_string(record, &["symbol"])
        .map(|s| s.to_uppercase())
        .unwrap_or_default();
    let base_apy_decimal = normalize_apy(first_number(record, APY_KEYS).unwrap_or(0.0));
    let tvl_usd = first_number(record, TVL_KEYS).unwrap_or(0.0);
    let pool_id = first_string(record, POOL_ID_KEYS).unwrap_or_default();

    if tvl_usd <= MIN_TVL_USD || !TRACKED_SYMBOLS.contains(&symbol.as_str()) {
        return None;
    }

    let url = if pool_id.is_empty() {
        "n/a".to_string()
    } else {
        format!("{}{}", POOL_URL_PREFIX, pool_id)
    };

    Some(NormalizedPool {
        protocol,
        symbol,
        base_apy_decimal,
        tvl_usd,
        url,
    })
}

/// Convert a raw listing into canonical pools. A listing is either an object
/// with a `data` array or a bare array; anything else yields no pools.
/// Records that fail the symbol/TVL filter or are not objects are dropped
/// silently.
pub fn normalize(raw: &RawListing) -> Vec<NormalizedPool> {
    let value = match raw {
        RawListing::Json(value) => value,
        RawListing::Text(_) | RawListing::Empty => return Vec::new(),
    };

    let records = match value {
        Value::Object(map) => match map.get("data").and_then(Value::as_array) {
            Some(arr) => arr,
            None => return Vec::new(),
        },
        Value::Array(arr) => arr,
        _ => return Vec::new(),
    };

    records.iter().filter_map(normalize_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing(records: Value) -> RawListing {
        RawListing::Json(json!({ "data": records }))
    }

    #[test]
    fn apy_above_one_is_a_percentage() {
        assert_eq!(normalize_apy(5.0), 0.05);
        assert_eq!(normalize_apy(150.0), 1.5);
    }

    #[test]
    fn apy_at_or_below_one_is_a_decimal() {
        assert_eq!(normalize_apy(1.0), 1.0);
        assert_eq!(normalize_apy(0.04), 0.04);
        assert_eq!(normalize_apy(0.0), 0.0);
        assert_eq!(normalize_apy(-2.0), -2.0);
    }

    #[test]
    fn keeps_only_eth_weth_above_tvl_floor() {
        let raw = listing(json!([
            { "project": "a", "symbol": "WETH", "apy": 5.0, "tvlUsd": 50_000.0 },
            { "project": "b", "symbol": "eth",  "apy": 4.0, "tvlUsd": 20_000.0 },
            { "project": "c", "symbol": "USDC", "apy": 8.0, "tvlUsd": 1_000_000.0 },
            { "project": "d", "symbol": "WETH", "apy": 9.0, "tvlUsd": 10_000.0 },
            { "project": "e", "symbol": "WETH", "apy": 9.0, "tvlUsd": 500.0 },
            { "project": "f", "symbol": "WETH", "apy": 9.0 }
        ]));

        let pools = normalize(&raw);
        assert_eq!(pools.len(), 2);
        assert_eq!(pools[0].protocol, "a");
        // lowercase symbol is uppercased, not dropped
        assert_eq!(pools[1].protocol, "b");
        assert_eq!(pools[1].symbol, "ETH");
    }

    #[test]
    fn field_precedence_follows_key_order() {
        let raw = listing(json!([
            {
                "project": "lido",
                "name": "ignored",
                "symbol": "WETH",
                "apyBase": 3.5,
                "apyMean30d": 9.9,
                "tvlUsd": 50_000.0,
                "pool": "abc-123"
            }
        ]));

        let pools = normalize(&raw);
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].protocol, "lido");
        assert_eq!(pools[0].base_apy_decimal, 0.035);
        assert_eq!(pools[0].url, "https://defillama.com/yields/pool/abc-123");
    }

    #[test]
    fn missing_pool_id_yields_sentinel_url() {
        let raw = listing(json!([
            { "project": "x", "symbol": "ETH", "apy": 2.0, "tvlUsd": 30_000.0 }
        ]));

        let pools = normalize(&raw);
        assert_eq!(pools[0].url, "n/a");
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let raw = listing(json!([
            { "project": "x", "symbol": "ETH", "apy": "4.2", "tvlUsd": "30000" }
        ]));

        let pools = normalize(&raw);
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].base_apy_decimal, 0.042);
        assert_eq!(pools[0].tvl_usd, 30_000.0);
    }

    #[test]
    fn non_object_records_are_skipped() {
        let raw = listing(json!([
            "garbage",
            42,
            { "project": "x", "symbol": "ETH", "apy": 2.0, "tvlUsd": 30_000.0 }
        ]));

        assert_eq!(normalize(&raw).len(), 1);
    }

    #[test]
    fn bare_array_listing_is_accepted() {
        let raw = RawListing::Json(json!([
            { "project": "x", "symbol": "ETH", "apy": 2.0, "tvlUsd": 30_000.0 }
        ]));

        assert_eq!(normalize(&raw).len(), 1);
    }

    #[test]
    fn text_and_empty_listings_yield_nothing() {
        assert!(normalize(&RawListing::Text("<html>rate limited</html>".into())).is_empty());
        assert!(normalize(&RawListing::Empty).is_empty());
        assert!(normalize(&RawListing::Json(json!({ "status": "ok" }))).is_empty());
        assert!(normalize(&RawListing::Json(json!(null))).is_empty());
    }

    #[test]
    fn protocol_defaults_to_empty_when_all_alternates_missing() {
        let raw = listing(json!([
            { "symbol": "ETH", "apy": 2.0, "tvlUsd": 30_000.0 }
        ]));

        let pools = normalize(&raw);
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].protocol, "");
    }
}
