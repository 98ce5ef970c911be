// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Middle band = SMA(period); upper/lower = middle ± k·σ where σ is the
// *population* standard deviation of the same window (squared deviations
// divided by `period`, not `period - 1`).
//
// Whenever defined: upper >= middle >= lower.

/// The three Bollinger band series, index-aligned to the input closes.
#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands for `closes` with the given window and width.
///
/// Each output slot is `Some` for `i >= period - 1`, `None` before that.
///
/// # Edge cases
/// - `period == 0` or `closes.len() < period` => all `None`
/// - A flat window collapses all three bands onto the mean.
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> BollingerSeries {
    let n = closes.len();
    let mut upper = vec![None; n];
    let mut middle = vec![None; n];
    let mut lower = vec![None; n];

    if period == 0 || n < period {
        return BollingerSeries {
            upper,
            middle,
            lower,
        };
    }

    for (i, window) in closes.windows(period).enumerate() {
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance =
            window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period as f64;
        let half_width = num_std * variance.sqrt();

        let at = i + period - 1;
        upper[at] = Some(mean + half_width);
        middle[at] = Some(mean);
        lower[at] = Some(mean - half_width);
    }

    BollingerSeries {
        upper,
        middle,
        lower,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_alignment() {
        let closes: Vec<f64> = (1..=40).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, 20, 2.0);
        assert_eq!(bb.upper.len(), 40);
        assert!(bb.upper[..19].iter().all(Option::is_none));
        assert!(bb.upper[19..].iter().all(Option::is_some));
    }

    #[test]
    fn bollinger_band_ordering() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + 5.0 * ((i as f64) * 0.9).sin())
            .collect();
        let bb = calculate_bollinger(&closes, 20, 2.0);
        for i in 19..closes.len() {
            let (u, m, l) = (
                bb.upper[i].unwrap(),
                bb.middle[i].unwrap(),
                bb.lower[i].unwrap(),
            );
            assert!(u >= m && m >= l, "band ordering violated at {i}");
        }
    }

    #[test]
    fn bollinger_population_stddev() {
        // Window [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, population variance 4,
        // so the 2σ half-width is exactly 4.
        let closes = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bb = calculate_bollinger(&closes, 8, 2.0);
        assert!((bb.middle[7].unwrap() - 5.0).abs() < 1e-10);
        assert!((bb.upper[7].unwrap() - 9.0).abs() < 1e-10);
        assert!((bb.lower[7].unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn bollinger_insufficient_data() {
        let bb = calculate_bollinger(&[1.0, 2.0, 3.0], 20, 2.0);
        assert!(bb.upper.iter().all(Option::is_none));
        assert!(bb.middle.iter().all(Option::is_none));
        assert!(bb.lower.iter().all(Option::is_none));
    }

    #[test]
    fn bollinger_flat_window_collapses() {
        let bb = calculate_bollinger(&[100.0; 40], 20, 2.0);
        for i in 19..40 {
            assert!((bb.upper[i].unwrap() - 100.0).abs() < 1e-10);
            assert!((bb.middle[i].unwrap() - 100.0).abs() < 1e-10);
            assert!((bb.lower[i].unwrap() - 100.0).abs() < 1e-10);
        }
    }
}
