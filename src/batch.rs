// =============================================================================
// Batch Driver — bounded fan-out over independent per-asset pipelines
// =============================================================================
//
// Each asset flows through preprocess -> indicators/risk -> assemble with no
// shared state, so a batch is embarrassingly parallel. The driver spawns one
// task per asset, bounds concurrency with a semaphore (the computations are
// CPU-bound; the engine has no natural backpressure of its own), and joins
// all-settled: an asset that yields nothing — too little history, degenerate
// returns, even a panicking task — is counted as skipped and never aborts or
// delays the rest of the batch.
//
// Output order matches input order regardless of completion order, so a
// batch is deterministic end to end.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::assemble::{self, IndicatorReport, RiskProfile};
use crate::config::{EngineConfig, RiskParams};
use crate::indicators::IndicatorSet;
use crate::risk;
use crate::series::PriceSeries;
use crate::types::AssetHistory;

/// Result of one risk batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Epoch milliseconds at assembly time.
    pub generated_at: i64,
    pub requested: usize,
    pub computed: usize,
    pub skipped: usize,
    pub profiles: Vec<RiskProfile>,
}

// ---------------------------------------------------------------------------
// Per-asset pipelines (synchronous, pure)
// ---------------------------------------------------------------------------

/// Full risk pipeline for one asset: clean -> metrics -> profile.
///
/// `None` covers every skip reason: nothing valid after cleaning, history
/// below the risk preconditions, or a non-finite metric.
pub fn risk_profile_for_asset(asset: &AssetHistory, params: &RiskParams) -> Option<RiskProfile> {
    let series = PriceSeries::from_raw(&asset.rows)?;
    let metrics = risk::compute_risk_metrics(&series, params)?;
    assemble::assemble_risk_profile(&asset.meta, series.last_close(), &metrics)
}

/// Full indicator pipeline for one asset: clean -> columns -> report.
///
/// Indicator columns degrade per-column rather than failing whole, so the
/// only skip reason is a series with no valid rows at all.
pub fn indicator_report_for_asset(asset: &AssetHistory) -> Option<IndicatorReport> {
    let series = PriceSeries::from_raw(&asset.rows)?;
    let set = IndicatorSet::compute(series.closes());
    Some(assemble::assemble_indicator_report(
        &asset.meta,
        series.last_close(),
        set,
    ))
}

// ---------------------------------------------------------------------------
// Batch fan-out
// ---------------------------------------------------------------------------

/// Compute risk profiles for a batch of assets.
///
/// Per-asset failures are isolated and silent at the engine boundary; this
/// driver is the layer that counts and logs them.
pub async fn compute_risk_batch(assets: Vec<AssetHistory>, config: &EngineConfig) -> BatchReport {
    let requested = assets.len();
    let params = config.risk.clone();

    let slots = run_bounded(assets, config.max_concurrent_assets, move |asset| {
        let profile = risk_profile_for_asset(&asset, &params);
        if profile.is_none() {
            debug!(id = %asset.meta.id, "asset skipped: no risk profile");
        }
        profile
    })
    .await;

    let profiles: Vec<RiskProfile> = slots.into_iter().flatten().collect();
    let computed = profiles.len();
    let skipped = requested - computed;

    info!(requested, computed, skipped, "risk batch complete");

    BatchReport {
        generated_at: chrono::Utc::now().timestamp_millis(),
        requested,
        computed,
        skipped,
        profiles,
    }
}

/// Compute indicator reports for a batch of assets.
///
/// Assets whose history cleans down to nothing are omitted.
pub async fn compute_indicator_batch(
    assets: Vec<AssetHistory>,
    config: &EngineConfig,
) -> Vec<IndicatorReport> {
    let requested = assets.len();

    let slots = run_bounded(assets, config.max_concurrent_assets, |asset| {
        indicator_report_for_asset(&asset)
    })
    .await;

    let reports: Vec<IndicatorReport> = slots.into_iter().flatten().collect();
    info!(
        requested,
        computed = reports.len(),
        skipped = requested - reports.len(),
        "indicator batch complete"
    );
    reports
}

/// Fan out `work` over `assets` with at most `max_concurrent` running at
/// once, all-settled, preserving input order in the returned slots.
///
/// A panicking task resolves its slot to `None` instead of tearing down the
/// batch.
async fn run_bounded<T, F>(
    assets: Vec<AssetHistory>,
    max_concurrent: usize,
    work: F,
) -> Vec<Option<T>>
where
    T: Send + 'static,
    F: Fn(AssetHistory) -> Option<T> + Clone + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut join_set = JoinSet::new();

    let count = assets.len();
    for (index, asset) in assets.into_iter().enumerate() {
        let semaphore = semaphore.clone();
        let work = work.clone();
        join_set.spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return (index, None);
            };
            (index, work(asset))
        });
    }

    let mut slots: Vec<Option<T>> = (0..count).map(|_| None).collect();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = result,
            Err(e) => {
                // All-settled join: one bad asset never aborts the batch.
                warn!(error = %e, "asset computation task failed");
            }
        }
    }
    slots
}
