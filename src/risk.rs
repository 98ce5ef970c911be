// =============================================================================
// Risk Metrics Calculator
// =============================================================================
//
// Portfolio-style risk metrics over one asset's cleaned price history:
//
//   Volatility    — sample stddev of simple returns, as a percentage.
//   VaR 95 / 99   — empirical percentile of the return distribution via
//                   linear interpolation between adjacent order statistics;
//                   losses are reported as positive percentages.
//   Sharpe        — mean return / stddev, annualized with sqrt(365) since
//                   crypto trades every calendar day.
//   Sortino       — same numerator, denominator from negative returns only.
//   Max Drawdown  — largest peak-to-trough decline, in [0, 100].
//   Risk Level    — deterministic 1-5 step function of (volatility, drawdown).
//
// Fail-closed policy: a metrics bundle exists only when every component is
// finite. One degenerate asset (a flat-priced new listing, say) yields `None`
// and can never corrupt a batch.

use tracing::debug;

use crate::config::RiskParams;
use crate::series::PriceSeries;

/// Unrounded risk metrics for one asset. Produced only when every field is
/// finite; rounding happens later, at the assembly boundary.
#[derive(Debug, Clone, Copy)]
pub struct RiskMetrics {
    pub var95: f64,
    pub var99: f64,
    pub sharpe: f64,
    pub sortino: f64,
    pub max_drawdown: f64,
    pub volatility: f64,
    pub risk_level: u8,
}

/// Compute the full metrics bundle for a cleaned series.
///
/// Returns `None` when:
/// - the series is shorter than `params.min_price_points`, or
/// - the return series is shorter than `params.min_return_points`, or
/// - any component metric is undefined (zero variance, too few negative
///   returns) or non-finite.
pub fn compute_risk_metrics(series: &PriceSeries, params: &RiskParams) -> Option<RiskMetrics> {
    if series.len() < params.min_price_points {
        debug!(
            points = series.len(),
            required = params.min_price_points,
            "risk metrics skipped: insufficient price history"
        );
        return None;
    }

    let returns = series.simple_returns();
    if returns.len() < params.min_return_points {
        debug!(
            returns = returns.len(),
            required = params.min_return_points,
            "risk metrics skipped: insufficient return history"
        );
        return None;
    }

    let volatility = volatility_pct(&returns)?;
    let var95 = value_at_risk_pct(&returns, 0.05)?;
    let var99 = value_at_risk_pct(&returns, 0.01)?;
    let sharpe = sharpe_ratio(&returns, params.annualization_days)?;
    let sortino = sortino_ratio(&returns, params.annualization_days)?;
    let max_drawdown = max_drawdown_pct(series.closes())?;

    // All finite, or nothing.
    if ![var95, var99, sharpe, sortino, max_drawdown, volatility]
        .iter()
        .all(|v| v.is_finite())
    {
        debug!("risk metrics skipped: non-finite component");
        return None;
    }

    Some(RiskMetrics {
        var95,
        var99,
        sharpe,
        sortino,
        max_drawdown,
        volatility,
        risk_level: classify_risk_level(volatility, max_drawdown),
    })
}

// ---------------------------------------------------------------------------
// Component metrics
// ---------------------------------------------------------------------------

/// Sample standard deviation of the return series, as a percentage.
///
/// Returns `None` with fewer than two returns (the n-1 divisor needs them).
pub fn volatility_pct(returns: &[f64]) -> Option<f64> {
    sample_std_dev(returns).map(|sd| sd * 100.0)
}

/// Empirical Value at Risk at the given tail probability, as a positive
/// loss percentage floored at zero.
///
/// The quantile is taken at fractional rank `(n-1) * tail` with linear
/// interpolation between the adjacent order statistics.
pub fn value_at_risk_pct(returns: &[f64], tail: f64) -> Option<f64> {
    if returns.is_empty() || !(0.0..=1.0).contains(&tail) {
        return None;
    }

    let mut sorted = returns.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (sorted.len() - 1) as f64 * tail;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    let quantile = sorted[lo] + frac * (sorted[hi] - sorted[lo]);

    // Losses are positive numbers; a profitable tail floors at zero.
    Some((-quantile).max(0.0) * 100.0)
}

/// Annualized Sharpe ratio: `mean / stddev * sqrt(annualization_days)`.
///
/// Returns `None` when the stddev is zero (flat return series) or there are
/// fewer than two returns.
pub fn sharpe_ratio(returns: &[f64], annualization_days: f64) -> Option<f64> {
    let sd = sample_std_dev(returns)?;
    if sd == 0.0 {
        return None;
    }
    Some(mean(returns) / sd * annualization_days.sqrt())
}

/// Annualized Sortino ratio: Sharpe's numerator over the sample stddev of
/// only the negative returns.
///
/// Returns `None` with fewer than two negative returns or zero downside
/// deviation.
pub fn sortino_ratio(returns: &[f64], annualization_days: f64) -> Option<f64> {
    let negatives: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    if negatives.len() < 2 {
        return None;
    }
    let downside = sample_std_dev(&negatives)?;
    if downside == 0.0 {
        return None;
    }
    Some(mean(returns) / downside * annualization_days.sqrt())
}

/// Maximum peak-to-trough decline over the price series, in `[0, 100]`.
///
/// Single forward pass tracking the running peak.
pub fn max_drawdown_pct(closes: &[f64]) -> Option<f64> {
    if closes.is_empty() {
        return None;
    }

    let mut peak = closes[0];
    let mut max_dd = 0.0_f64;
    for &price in closes {
        if price > peak {
            peak = price;
        }
        let dd = (peak - price) / peak * 100.0;
        if dd > max_dd {
            max_dd = dd;
        }
    }
    Some(max_dd)
}

/// Deterministic 1-5 risk classification from volatility % and drawdown %.
///
/// First matching row wins; increasing either input never decreases the
/// level.
pub fn classify_risk_level(vol_pct: f64, dd_pct: f64) -> u8 {
    if vol_pct < 2.5 && dd_pct < 35.0 {
        1
    } else if vol_pct < 4.0 && dd_pct < 55.0 {
        2
    } else if vol_pct < 6.0 && dd_pct < 70.0 {
        3
    } else if vol_pct < 9.0 && dd_pct < 85.0 {
        4
    } else {
        5
    }
}

/// Display label for a risk level, for downstream renderers.
pub fn risk_level_label(level: u8) -> &'static str {
    match level {
        1 => "VERY LOW",
        2 => "LOW",
        3 => "MODERATE",
        4 => "HIGH",
        _ => "VERY HIGH",
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sample standard deviation (divide by n-1); `None` with fewer than 2 points.
fn sample_std_dev(xs: &[f64]) -> Option<f64> {
    if xs.len() < 2 {
        return None;
    }
    let m = mean(xs);
    let variance = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (xs.len() - 1) as f64;
    Some(variance.sqrt())
}
