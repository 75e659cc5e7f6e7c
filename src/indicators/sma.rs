// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean of each window of `period` consecutive values:
//   SMA_t = (x_{t-period+1} + ... + x_t) / period
//
// Output element `i` corresponds to input index `i + period - 1`.
// =============================================================================

use super::stats;

/// Compute the SMA series for `data` over `period`.
///
/// Output length is `data.len() - period + 1`.
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - `data.len() < period` (including empty data) => empty vec
pub fn calculate_sma(data: &[f64], period: usize) -> Vec<f64> {
    let period_f = period as f64;
    stats::rolling_sum(data, period)
        .into_iter()
        .map(|sum| sum / period_f)
        .collect()
}

/// Most recent SMA value, or `None` on insufficient data.
pub fn current_sma(data: &[f64], period: usize) -> Option<f64> {
    if !stats::has_window(data.len(), period) {
        return None;
    }
    Some(stats::mean(&data[data.len() - period..]))
}
