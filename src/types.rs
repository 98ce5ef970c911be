// =============================================================================
// Shared types used across the Polaris analytics engine
// =============================================================================
//
// Strongly-typed caller inputs. Every numeric field is a plain `f64`/`i64` —
// alternate field names or loosely-typed market rows are a caller-side
// mapping concern, not part of the engine's contract.

use serde::{Deserialize, Serialize};

/// One raw price row as supplied by the caller.
///
/// `close` is required; the OHLC extras are optional pass-through for callers
/// that already have them — the engine computes from `close` only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawPricePoint {
    /// Epoch milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    pub close: f64,
}

impl RawPricePoint {
    /// Shorthand constructor for a close-only row.
    pub fn new(timestamp: i64, close: f64) -> Self {
        Self {
            timestamp,
            open: None,
            high: None,
            low: None,
            close,
        }
    }
}

/// Identity metadata attached to every assembled result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetMeta {
    pub id: String,
    pub symbol: String,
    pub name: String,
}

/// Batch input: one asset's identity plus its raw price history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetHistory {
    #[serde(flatten)]
    pub meta: AssetMeta,
    pub rows: Vec<RawPricePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_point_deserializes_without_ohlc() {
        let p: RawPricePoint =
            serde_json::from_str(r#"{ "timestamp": 1700000000000, "close": 42.5 }"#).unwrap();
        assert_eq!(p.timestamp, 1_700_000_000_000);
        assert!((p.close - 42.5).abs() < f64::EPSILON);
        assert!(p.open.is_none());
        assert!(p.high.is_none());
        assert!(p.low.is_none());
    }

    #[test]
    fn asset_history_flattens_identity() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "BTC",
            "name": "Bitcoin",
            "rows": [{ "timestamp": 1, "close": 100.0 }]
        }"#;
        let asset: AssetHistory = serde_json::from_str(json).unwrap();
        assert_eq!(asset.meta.id, "bitcoin");
        assert_eq!(asset.meta.symbol, "BTC");
        assert_eq!(asset.rows.len(), 1);
    }
}
