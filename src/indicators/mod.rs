// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the technical indicators computed
// by the analytics engine. Every series function returns a `Vec<Option<f64>>`
// index-aligned to its input — `None` marks "not yet computable" slots before
// an indicator's minimum lookback, so callers can always distinguish a
// missing value from a computed zero.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod momentum;
pub mod rsi;
pub mod sma;

use serde::{Deserialize, Serialize};

// Standard lookbacks — these are the contract's column names (`sma20`,
// `ema12`, ...), so they are fixed rather than configurable.
pub const SMA_SHORT_PERIOD: usize = 20;
pub const SMA_LONG_PERIOD: usize = 50;
pub const EMA_FAST_PERIOD: usize = 12;
pub const EMA_SLOW_PERIOD: usize = 26;
pub const RSI_PERIOD: usize = 14;
pub const MACD_SIGNAL_PERIOD: usize = 9;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_NUM_STD: f64 = 2.0;

/// The full set of indicator columns for one asset.
///
/// Every array has the same length as the cleaned price series and is
/// index-aligned to it; `None` serialises as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    pub sma20: Vec<Option<f64>>,
    pub sma50: Vec<Option<f64>>,
    pub ema12: Vec<Option<f64>>,
    pub ema26: Vec<Option<f64>>,
    pub rsi14: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub macd_hist: Vec<Option<f64>>,
    pub bb_upper: Vec<Option<f64>>,
    pub bb_lower: Vec<Option<f64>>,
    pub daily_return: Vec<Option<f64>>,
}

impl IndicatorSet {
    /// Compute every indicator column for the given cleaned closes.
    ///
    /// Columns fail independently: a series long enough for SMA20 but not
    /// for the MACD signal still gets its SMA20 values, with the signal
    /// column left entirely `None`.
    pub fn compute(closes: &[f64]) -> Self {
        let macd = macd::calculate_macd(
            closes,
            EMA_FAST_PERIOD,
            EMA_SLOW_PERIOD,
            MACD_SIGNAL_PERIOD,
        );
        let bb = bollinger::calculate_bollinger(closes, BOLLINGER_PERIOD, BOLLINGER_NUM_STD);

        Self {
            sma20: sma::calculate_sma(closes, SMA_SHORT_PERIOD),
            sma50: sma::calculate_sma(closes, SMA_LONG_PERIOD),
            ema12: ema::calculate_ema(closes, EMA_FAST_PERIOD),
            ema26: ema::calculate_ema(closes, EMA_SLOW_PERIOD),
            rsi14: rsi::calculate_rsi(closes, RSI_PERIOD),
            macd: macd.line,
            signal: macd.signal,
            macd_hist: macd.histogram,
            bb_upper: bb.upper,
            bb_lower: bb.lower,
            daily_return: momentum::calculate_daily_returns(closes),
        }
    }

    /// Length of every column (they are all equal by construction).
    pub fn len(&self) -> usize {
        self.sma20.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sma20.is_empty()
    }
}
