// =============================================================================
// Result Assembler — output contracts for downstream consumers
// =============================================================================
//
// Pure packaging: attaches `{id, symbol, name, currentPrice}` identity to
// computed indicator arrays or risk metrics, applies the single 4-decimal
// rounding pass, and enforces the "all finite or omit" rule for risk
// profiles. Rounding happens here and only here — never mid-computation, so
// recursive EMA/RSI chains never compound rounding error.
//
// Field names follow the downstream contract verbatim (camelCase), since the
// spreadsheet writer and the API serializer consume these shapes as-is.

use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorSet;
use crate::risk::RiskMetrics;
use crate::types::AssetMeta;

/// Decimal places applied to every emitted numeric value.
const ROUND_DECIMALS: i32 = 4;

/// Per-asset risk profile, emitted only when every numeric field is finite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub var95: f64,
    pub var99: f64,
    pub sharpe: f64,
    pub sortino: f64,
    pub max_drawdown: f64,
    pub volatility: f64,
    pub risk_level: u8,
}

/// Per-asset indicator report: identity plus the aligned indicator columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorReport {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub indicators: IndicatorSet,
}

/// Package a risk profile, or nothing.
///
/// This is the boundary that guarantees the fail-closed policy: a profile
/// with any non-finite field (including the current price) is dropped whole —
/// no partial or guessed values are ever emitted.
pub fn assemble_risk_profile(
    meta: &AssetMeta,
    current_price: f64,
    metrics: &RiskMetrics,
) -> Option<RiskProfile> {
    let fields = [
        current_price,
        metrics.var95,
        metrics.var99,
        metrics.sharpe,
        metrics.sortino,
        metrics.max_drawdown,
        metrics.volatility,
    ];
    if !fields.iter().all(|v| v.is_finite()) {
        return None;
    }

    Some(RiskProfile {
        id: meta.id.clone(),
        symbol: meta.symbol.clone(),
        name: meta.name.clone(),
        current_price: round(current_price),
        var95: round(metrics.var95),
        var99: round(metrics.var99),
        sharpe: round(metrics.sharpe),
        sortino: round(metrics.sortino),
        max_drawdown: round(metrics.max_drawdown),
        volatility: round(metrics.volatility),
        risk_level: metrics.risk_level,
    })
}

/// Package an indicator report, rounding every defined entry.
///
/// Undefined slots stay `None` — they serialise as `null`, never as zero.
pub fn assemble_indicator_report(
    meta: &AssetMeta,
    current_price: f64,
    mut indicators: IndicatorSet,
) -> IndicatorReport {
    for column in [
        &mut indicators.sma20,
        &mut indicators.sma50,
        &mut indicators.ema12,
        &mut indicators.ema26,
        &mut indicators.rsi14,
        &mut indicators.macd,
        &mut indicators.signal,
        &mut indicators.macd_hist,
        &mut indicators.bb_upper,
        &mut indicators.bb_lower,
        &mut indicators.daily_return,
    ] {
        for slot in column.iter_mut() {
            if let Some(v) = slot {
                *v = round(*v);
            }
        }
    }

    IndicatorReport {
        id: meta.id.clone(),
        symbol: meta.symbol.clone(),
        name: meta.name.clone(),
        current_price: round(current_price),
        indicators,
    }
}

/// Round to `ROUND_DECIMALS` decimal places.
fn round(value: f64) -> f64 {
    let factor = 10f64.powi(ROUND_DECIMALS);
    (value * factor).round() / factor
}
