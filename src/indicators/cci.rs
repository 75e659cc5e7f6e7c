// =============================================================================
// Commodity Channel Index (CCI)
// =============================================================================
//
//   TP  = (high + low + close) / 3
//   CCI = (TP - SMA(TP)) / (0.015 * MeanDeviation(TP))
//
// Mean deviation is taken around the window's SMA (see
// `stats::rolling_mean_abs_deviation`). A zero mean deviation yields 0.
// =============================================================================

use super::sma::calculate_sma;
use super::stats;

/// Lambert's constant: scales roughly 70-80% of values into [-100, 100].
pub const CCI_CONSTANT: f64 = 0.015;

/// Typical price `(high + low + close) / 3`, truncated to the shortest input.
pub fn typical_price(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    high.iter()
        .zip(low)
        .zip(close)
        .map(|((h, l), c)| (h + l + c) / 3.0)
        .collect()
}

/// Compute CCI. Element `i` corresponds to input index `i + period - 1`.
///
/// # Edge cases
/// - `period == 0` or fewer than `period` bars => empty vec
/// - Mean deviation of 0 (flat typical price) => 0.0
pub fn calculate_cci(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    let tp = typical_price(high, low, close);
    if !stats::has_window(tp.len(), period) {
        return Vec::new();
    }

    let sma = calculate_sma(&tp, period);
    let mean_dev = stats::rolling_mean_abs_deviation(&tp, period);

    sma.iter()
        .zip(&mean_dev)
        .enumerate()
        .map(|(i, (&avg, &dev))| {
            if dev == 0.0 {
                return 0.0;
            }
            let current = tp[stats::source_index(i, period)];
            let cci = (current - avg) / (CCI_CONSTANT * dev);
            if cci.is_finite() {
                cci
            } else {
                0.0
            }
        })
        .collect()
}

pub fn current_cci(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Option<f64> {
    calculate_cci(high, low, close, period).last().copied()
}
