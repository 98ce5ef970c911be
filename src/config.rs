// =============================================================================
// Engine Configuration — JSON settings with atomic save
// =============================================================================
//
// Central configuration for the Polaris analytics engine. Persistence uses an
// atomic tmp + rename pattern to prevent corruption on crash. All fields
// carry `#[serde(default)]` so that adding new fields never breaks loading an
// older config file.
//
// The indicator lookbacks are deliberately NOT here: they are part of the
// output contract's column names (`sma20`, `ema12`, ...) and live as
// constants in the indicators module.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_min_price_points() -> usize {
    30
}

fn default_min_return_points() -> usize {
    20
}

fn default_annualization_days() -> f64 {
    // Crypto markets trade every calendar day.
    365.0
}

fn default_max_concurrent_assets() -> usize {
    8
}

// =============================================================================
// RiskParams
// =============================================================================

/// Preconditions and annualization for the risk metrics calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskParams {
    /// Minimum cleaned price points before risk metrics are attempted.
    #[serde(default = "default_min_price_points")]
    pub min_price_points: usize,

    /// Minimum derived returns before risk metrics are attempted.
    #[serde(default = "default_min_return_points")]
    pub min_return_points: usize,

    /// Day count used to annualize Sharpe and Sortino (sqrt scaling).
    #[serde(default = "default_annualization_days")]
    pub annualization_days: f64,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            min_price_points: default_min_price_points(),
            min_return_points: default_min_return_points(),
            annualization_days: default_annualization_days(),
        }
    }
}

// =============================================================================
// EngineConfig
// =============================================================================

/// Top-level configuration for the analytics engine and its batch driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Risk calculator preconditions and annualization.
    #[serde(default)]
    pub risk: RiskParams,

    /// Upper bound on concurrently computing assets in a batch. Each
    /// computation is CPU-bound, so this is the host-imposed backpressure.
    #[serde(default = "default_max_concurrent_assets")]
    pub max_concurrent_assets: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk: RiskParams::default(),
            max_concurrent_assets: default_max_concurrent_assets(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist or fails to parse, returns an error so the
    /// caller can fall back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse engine config from {}", path.display()))?;

        info!(
            path = %path.display(),
            max_concurrent_assets = config.max_concurrent_assets,
            min_price_points = config.risk.min_price_points,
            "engine config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise engine config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "engine config saved (atomic)");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.risk.min_price_points, 30);
        assert_eq!(cfg.risk.min_return_points, 20);
        assert!((cfg.risk.annualization_days - 365.0).abs() < f64::EPSILON);
        assert_eq!(cfg.max_concurrent_assets, 8);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.risk.min_price_points, 30);
        assert_eq!(cfg.max_concurrent_assets, 8);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "max_concurrent_assets": 2, "risk": { "min_price_points": 60 } }"#;
        let cfg: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.max_concurrent_assets, 2);
        assert_eq!(cfg.risk.min_price_points, 60);
        // Untouched fields keep their defaults.
        assert_eq!(cfg.risk.min_return_points, 20);
        assert!((cfg.risk.annualization_days - 365.0).abs() < f64::EPSILON);
    }

    #[test]
    fn roundtrip_serialisation() {
        let cfg = EngineConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.max_concurrent_assets, cfg2.max_concurrent_assets);
        assert_eq!(cfg.risk.min_price_points, cfg2.risk.min_price_points);
    }
}
