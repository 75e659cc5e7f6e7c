// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent values than the SMA does.
//
// Formula:
//   k     = 2 / (period + 1)
//   EMA_t = x_t * k + EMA_{t-1} * (1 - k)
//
// The first EMA value is seeded with the SMA of the first `period` values, so
// the output is index-aligned with `calculate_sma` over the same input.
// =============================================================================

use super::stats;

/// Smoothing factor `2 / (period + 1)`.
#[inline]
pub fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Compute the EMA series for `data` over `period`.
///
/// Output length is `data.len() - period + 1`; element `i` corresponds to
/// input index `i + period - 1`.
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - `data.len() < period` => empty vec
/// - A non-finite input stops the series at the last finite value.
pub fn calculate_ema(data: &[f64], period: usize) -> Vec<f64> {
    if !stats::has_window(data.len(), period) {
        return Vec::new();
    }

    let k = smoothing_factor(period);

    let seed = stats::mean(&data[..period]);
    if !seed.is_finite() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(stats::window_count(data.len(), period));
    result.push(seed);

    let mut prev = seed;
    for &value in &data[period..] {
        let ema = value * k + prev * (1.0 - k);
        if !ema.is_finite() {
            break;
        }
        result.push(ema);
        prev = ema;
    }

    result
}

/// Most recent EMA value, or `None` on insufficient data.
pub fn current_ema(data: &[f64], period: usize) -> Option<f64> {
    calculate_ema(data, period).last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::sma::calculate_sma;

    // ---- calculate_ema ---------------------------------------------------

    #[test]
    fn ema_without_a_full_window_is_empty() {
        let cases: [(&[f64], usize); 4] = [
            (&[], 4),
            (&[7.5, 8.0, 8.5], 0),
            (&[7.5, 8.0, 8.5], 4),
            (&[f64::NAN, 1.0], 2),
        ];
        for (data, period) in cases {
            assert!(calculate_ema(data, period).is_empty(), "{data:?} p={period}");
            assert!(current_ema(data, period).is_none());
        }
    }

    #[test]
    fn ema_single_window_is_its_mean() {
        let ema = calculate_ema(&[3.0, 9.0, 0.0, 12.0], 4);
        assert_eq!(ema.len(), 1);
        assert!((ema[0] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn ema_seed_equals_sma_for_mixed_periods() {
        let data: Vec<f64> = (0..64)
            .map(|i| 42.0 + (i as f64 * 0.61).sin() * 3.0 + (i % 5) as f64 * 0.2)
            .collect();
        let sma_len = |p: usize| calculate_sma(&data, p).len();
        for period in [1, 3, 7, 12, 26, 64] {
            let ema = calculate_ema(&data, period);
            let seed = calculate_sma(&data, period)[0];
            assert_eq!(ema.len(), sma_len(period), "period {period}");
            assert!((ema[0] - seed).abs() < 1e-3, "period {period}");
        }
    }

    #[test]
    fn ema_period_one_tracks_input() {
        let data = [5.0, -1.0, 2.5, 2.5, 40.0];
        let ema = calculate_ema(&data, 1);
        assert_eq!(ema.as_slice(), &data);
    }

    #[test]
    fn ema_recurrence() {
        let data = [20.0, 22.0, 21.0, 24.0, 19.0, 23.0, 25.0, 30.0];
        let ema = calculate_ema(&data, 4);
        let k = smoothing_factor(4);
        let mut expected = 21.75;
        assert!((ema[0] - expected).abs() < 1e-10);
        for (i, &x) in data[4..].iter().enumerate() {
            expected = x * k + expected * (1.0 - k);
            assert!((ema[i + 1] - expected).abs() < 1e-10);
        }
    }

    #[test]
    fn ema_stops_at_non_finite_input() {
        let ema = calculate_ema(&[4.0, 6.0, f64::INFINITY, 5.0], 2);
        assert_eq!(ema, vec![5.0]);
    }

    #[test]
    fn ema_lags_a_rising_series() {
        let data: Vec<f64> = (0..30).map(|i| 10.0 + i as f64).collect();
        let ema = calculate_ema(&data, 9);
        for (i, value) in ema.iter().enumerate() {
            assert!(*value < data[i + 8]);
        }
    }
}
