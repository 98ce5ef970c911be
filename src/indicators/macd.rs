// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// Three staged series, all index-aligned to the input closes:
//
//   line      = EMA(fast) - EMA(slow)          defined once both EMAs are
//   signal    = EMA(signal_period) of the line  — computed over the
//               *compacted* sequence of defined line values, then scattered
//               back to the original indices
//   histogram = line - signal
//
// The signal EMA must run on the compacted values: feeding the undefined
// warm-up prefix into the recursion would poison every later value.

use crate::indicators::ema::calculate_ema;

/// The three MACD component series, index-aligned to the input closes.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// Compute MACD line, signal, and histogram.
///
/// With the standard (12, 26, 9) parameters the line is defined from index
/// 25 and the signal (and histogram) from index 33, so a series needs at
/// least 34 closes before a histogram value exists.
///
/// # Edge cases
/// - `fast >= slow` or any zero period => all `None` (degenerate request)
/// - fewer than `signal_period` defined line values => signal all `None`
pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdSeries {
    let n = closes.len();
    let mut line = vec![None; n];
    let mut signal = vec![None; n];
    let mut histogram = vec![None; n];

    if fast == 0 || slow == 0 || signal_period == 0 || fast >= slow {
        return MacdSeries {
            line,
            signal,
            histogram,
        };
    }

    let ema_fast = calculate_ema(closes, fast);
    let ema_slow = calculate_ema(closes, slow);

    for i in 0..n {
        if let (Some(f), Some(s)) = (ema_fast[i], ema_slow[i]) {
            line[i] = Some(f - s);
        }
    }

    // Compact the defined line values, EMA them, scatter back.
    let defined: Vec<(usize, f64)> = line
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|x| (i, x)))
        .collect();

    if defined.len() >= signal_period {
        let compact: Vec<f64> = defined.iter().map(|&(_, v)| v).collect();
        let compact_ema = calculate_ema(&compact, signal_period);
        for (j, ema) in compact_ema.into_iter().enumerate() {
            if let Some(v) = ema {
                signal[defined[j].0] = Some(v);
            }
        }
    }

    for i in 0..n {
        if let (Some(l), Some(s)) = (line[i], signal[i]) {
            histogram[i] = Some(l - s);
        }
    }

    MacdSeries {
        line,
        signal,
        histogram,
    }
}
