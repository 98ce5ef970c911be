// =============================================================================
// Price Series Preprocessing & Return Series
// =============================================================================
//
// Raw caller input is noisy: rows can arrive out of order, carry duplicate
// timestamps, or hold non-finite / non-positive closes. The preprocessor
// normalises all of that into a clean, strictly-ordered series:
//
//   1. Drop every row whose close is non-finite or <= 0.
//   2. Sort by timestamp (stable).
//   3. Collapse duplicate timestamps — the most recent row wins, the same
//      rule a candle buffer applies when a finalized candle replaces the
//      in-progress one with the same open time.
//
// Gaps are never interpolated; filtering simply shrinks the series. A series
// that cleans down to nothing yields `None`, so downstream code can only ever
// observe a series with at least one point.

use crate::types::RawPricePoint;

/// A cleaned close-price series with strictly increasing timestamps.
///
/// Invariants (enforced by construction, never re-checked downstream):
/// - `timestamps.len() == closes.len() >= 1`
/// - timestamps strictly increasing, no duplicates
/// - every close finite and positive
#[derive(Debug, Clone)]
pub struct PriceSeries {
    timestamps: Vec<i64>,
    closes: Vec<f64>,
}

impl PriceSeries {
    /// Clean a raw row sequence into a `PriceSeries`.
    ///
    /// Returns `None` when no valid rows survive filtering.
    ///
    /// # Edge cases
    /// - Out-of-order rows are sorted, not rejected.
    /// - Duplicate timestamps keep the last row seen in input order.
    /// - NaN / infinite / zero / negative closes are dropped.
    pub fn from_raw(rows: &[RawPricePoint]) -> Option<Self> {
        let mut valid: Vec<(i64, f64)> = rows
            .iter()
            .filter(|r| r.close.is_finite() && r.close > 0.0)
            .map(|r| (r.timestamp, r.close))
            .collect();

        if valid.is_empty() {
            return None;
        }

        // Stable sort keeps input order within a duplicated timestamp, so
        // "take the last of each run" below means "most recent update wins".
        valid.sort_by_key(|(ts, _)| *ts);

        let mut timestamps = Vec::with_capacity(valid.len());
        let mut closes = Vec::with_capacity(valid.len());
        for (ts, close) in valid {
            if timestamps.last() == Some(&ts) {
                // Duplicate timestamp — replace with the newer row.
                *closes.last_mut()? = close;
            } else {
                timestamps.push(ts);
                closes.push(close);
            }
        }

        Some(Self { timestamps, closes })
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    /// Most recent close — the "current price" attached to assembled results.
    pub fn last_close(&self) -> f64 {
        // Safe: the constructor rejects empty series.
        *self.closes.last().expect("PriceSeries is never empty")
    }

    /// Derive the simple-return series: `r[i] = close[i+1]/close[i] - 1`.
    ///
    /// Length is `len() - 1`; a single-point series yields an empty vec.
    pub fn simple_returns(&self) -> Vec<f64> {
        self.closes
            .windows(2)
            .map(|w| w[1] / w[0] - 1.0)
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn rows(points: &[(i64, f64)]) -> Vec<RawPricePoint> {
        points
            .iter()
            .map(|&(ts, close)| RawPricePoint::new(ts, close))
            .collect()
    }

    // ---- from_raw --------------------------------------------------------

    #[test]
    fn empty_input_yields_none() {
        assert!(PriceSeries::from_raw(&[]).is_none());
    }

    #[test]
    fn all_invalid_rows_yield_none() {
        let raw = rows(&[(1, f64::NAN), (2, -5.0), (3, 0.0), (4, f64::INFINITY)]);
        assert!(PriceSeries::from_raw(&raw).is_none());
    }

    #[test]
    fn invalid_rows_are_filtered_not_fatal() {
        let raw = rows(&[(1, 100.0), (2, f64::NAN), (3, 101.0), (4, -1.0), (5, 102.0)]);
        let series = PriceSeries::from_raw(&raw).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), &[100.0, 101.0, 102.0]);
        assert_eq!(series.timestamps(), &[1, 3, 5]);
    }

    #[test]
    fn out_of_order_rows_are_sorted() {
        let raw = rows(&[(3, 103.0), (1, 101.0), (2, 102.0)]);
        let series = PriceSeries::from_raw(&raw).unwrap();
        assert_eq!(series.timestamps(), &[1, 2, 3]);
        assert_eq!(series.closes(), &[101.0, 102.0, 103.0]);
    }

    #[test]
    fn duplicate_timestamp_keeps_most_recent_row() {
        let raw = rows(&[(1, 100.0), (2, 105.0), (2, 106.0), (3, 107.0)]);
        let series = PriceSeries::from_raw(&raw).unwrap();
        assert_eq!(series.timestamps(), &[1, 2, 3]);
        assert_eq!(series.closes(), &[100.0, 106.0, 107.0]);
    }

    #[test]
    fn single_valid_row_is_a_valid_series() {
        let series = PriceSeries::from_raw(&rows(&[(10, 50.0)])).unwrap();
        assert_eq!(series.len(), 1);
        assert!((series.last_close() - 50.0).abs() < f64::EPSILON);
    }

    // ---- simple_returns --------------------------------------------------

    #[test]
    fn returns_have_length_n_minus_one() {
        let series = PriceSeries::from_raw(&rows(&[(1, 100.0), (2, 110.0), (3, 99.0)])).unwrap();
        let r = series.simple_returns();
        assert_eq!(r.len(), 2);
        assert!((r[0] - 0.10).abs() < 1e-12);
        assert!((r[1] - (99.0 / 110.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn single_point_series_has_no_returns() {
        let series = PriceSeries::from_raw(&rows(&[(1, 100.0)])).unwrap();
        assert!(series.simple_returns().is_empty());
    }

    #[test]
    fn flat_series_returns_are_zero() {
        let raw = rows(&[(1, 100.0), (2, 100.0), (3, 100.0)]);
        let series = PriceSeries::from_raw(&raw).unwrap();
        for r in series.simple_returns() {
            assert!(r.abs() < 1e-12);
        }
    }
}
