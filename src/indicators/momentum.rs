// =============================================================================
// Momentum — daily return % and the screener heuristic score
// =============================================================================
//
// Two deliberately separate things live here:
//
//   * `calculate_daily_returns` — the real day-over-day percentage change,
//     index-aligned like every other indicator.
//   * `heuristic_momentum_score` — the crude screener formula
//     `50 + 2 * change_24h` clamped to [0, 100]. It merely *looks like* an
//     RSI because it shares the range. It is not one, it does not approximate
//     `rsi::calculate_rsi`, and the two must never be merged or substituted
//     for one another.

/// Day-over-day percentage change: `(P[i] - P[i-1]) / P[i-1] * 100`.
///
/// `out[0]` is `None` — there is no prior close to compare against.
pub fn calculate_daily_returns(closes: &[f64]) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    for i in 1..closes.len() {
        out[i] = Some((closes[i] - closes[i - 1]) / closes[i - 1] * 100.0);
    }
    out
}

/// Screener pseudo-oscillator: `50 + 2 * change_24h_pct`, clamped to [0, 100].
///
/// A +10 % day maps to 70, a -15 % day to 20. Useful as a cheap sort key in a
/// market screener, nothing more — in particular it is NOT a Relative
/// Strength Index and carries none of Wilder's smoothing semantics.
pub fn heuristic_momentum_score(change_24h_pct: f64) -> f64 {
    if !change_24h_pct.is_finite() {
        return 50.0;
    }
    (50.0 + change_24h_pct * 2.0).clamp(0.0, 100.0)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    // ---- calculate_daily_returns -----------------------------------------

    #[test]
    fn daily_returns_first_slot_undefined() {
        let out = calculate_daily_returns(&[100.0, 110.0, 99.0]);
        assert!(out[0].is_none());
        assert!((out[1].unwrap() - 10.0).abs() < 1e-10);
        assert!((out[2].unwrap() - (99.0 - 110.0) / 110.0 * 100.0).abs() < 1e-10);
    }

    #[test]
    fn daily_returns_flat_series_is_zero() {
        let out = calculate_daily_returns(&[100.0; 10]);
        for v in out.into_iter().skip(1) {
            assert!(v.unwrap().abs() < 1e-10);
        }
    }

    #[test]
    fn daily_returns_single_point() {
        let out = calculate_daily_returns(&[100.0]);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_none());
    }

    // ---- heuristic_momentum_score ----------------------------------------

    #[test]
    fn heuristic_score_maps_linearly_inside_range() {
        assert!((heuristic_momentum_score(0.0) - 50.0).abs() < 1e-10);
        assert!((heuristic_momentum_score(10.0) - 70.0).abs() < 1e-10);
        assert!((heuristic_momentum_score(-15.0) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn heuristic_score_clamps_to_bounds() {
        assert!((heuristic_momentum_score(100.0) - 100.0).abs() < 1e-10);
        assert!((heuristic_momentum_score(-100.0)).abs() < 1e-10);
    }

    #[test]
    fn heuristic_score_is_not_wilder_rsi() {
        // A monotonically rising series has Wilder RSI pinned at 100, while
        // the heuristic only sees the last 24 h change. The two disagree by
        // construction — which is exactly why they stay separate functions.
        let closes: Vec<f64> = (1..=30).map(|x| 100.0 + x as f64).collect();
        let rsi = crate::indicators::rsi::current_rsi(&closes, 14).unwrap().0;
        let change_24h = (closes[29] - closes[28]) / closes[28] * 100.0;
        let heuristic = heuristic_momentum_score(change_24h);
        assert!((rsi - 100.0).abs() < 1e-10);
        assert!(heuristic < 60.0);
    }

    #[test]
    fn heuristic_score_non_finite_input_is_neutral() {
        assert!((heuristic_momentum_score(f64::NAN) - 50.0).abs() < 1e-10);
    }
}
