// =============================================================================
// Polaris Analytics — Batch Runner Entry Point
// =============================================================================
//
// Reads a JSON file of asset histories, runs the risk batch (and, when
// requested, the indicator batch), and writes the reports to disk. Logs go
// to stderr so the report files are the only artifacts.
//
// Environment:
//   POLARIS_CONFIG           engine config path   (default engine_config.json)
//   POLARIS_INPUT            input histories path (or first CLI argument)
//   POLARIS_OUTPUT           risk report path     (default risk_report.json)
//   POLARIS_INDICATORS_OUT   when set, also write the indicator batch here
// =============================================================================

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use polaris_analytics::{compute_indicator_batch, compute_risk_batch, AssetHistory, EngineConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Polaris Analytics batch runner starting");

    // ── 2. Config ────────────────────────────────────────────────────────
    let config_path =
        std::env::var("POLARIS_CONFIG").unwrap_or_else(|_| "engine_config.json".into());
    let config = EngineConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        EngineConfig::default()
    });

    // ── 3. Input histories ───────────────────────────────────────────────
    let input_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("POLARIS_INPUT").ok())
        .context("no input file: pass a path argument or set POLARIS_INPUT")?;

    let raw = std::fs::read_to_string(&input_path)
        .with_context(|| format!("failed to read asset histories from {input_path}"))?;
    let assets: Vec<AssetHistory> =
        serde_json::from_str(&raw).context("failed to parse asset histories")?;

    info!(
        assets = assets.len(),
        max_concurrent = config.max_concurrent_assets,
        "input loaded"
    );

    // ── 4. Risk batch ────────────────────────────────────────────────────
    let report = compute_risk_batch(assets.clone(), &config).await;

    let output_path =
        std::env::var("POLARIS_OUTPUT").unwrap_or_else(|_| "risk_report.json".into());
    let json = serde_json::to_string_pretty(&report).context("failed to serialise risk report")?;
    std::fs::write(&output_path, json)
        .with_context(|| format!("failed to write risk report to {output_path}"))?;

    info!(
        path = %output_path,
        computed = report.computed,
        skipped = report.skipped,
        "risk report written"
    );

    // ── 5. Optional indicator batch ──────────────────────────────────────
    if let Ok(indicators_path) = std::env::var("POLARIS_INDICATORS_OUT") {
        let reports = compute_indicator_batch(assets, &config).await;
        let json = serde_json::to_string_pretty(&reports)
            .context("failed to serialise indicator reports")?;
        std::fs::write(&indicators_path, json)
            .with_context(|| format!("failed to write indicator reports to {indicators_path}"))?;
        info!(path = %indicators_path, reports = reports.len(), "indicator reports written");
    }

    info!("Polaris Analytics batch runner done");
    Ok(())
}
