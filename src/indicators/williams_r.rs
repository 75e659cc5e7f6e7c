// =============================================================================
// Williams %R
// =============================================================================
//
//   %R = (HH - close) / (HH - LL) * -100
//
// Bounded to [-100, 0]; a zero high/low range yields 0.
// =============================================================================

use super::stats;

/// Compute Williams %R. Element `i` corresponds to input index
/// `i + period - 1`; unequal inputs are truncated to the shortest.
///
/// # Edge cases
/// - `period == 0` or fewer than `period` bars => empty vec
/// - HH == LL => 0.0
pub fn calculate_williams_r(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    let n = high.len().min(low.len()).min(close.len());
    let highest = stats::rolling_max(&high[..n], period);
    let lowest = stats::rolling_min(&low[..n], period);

    highest
        .iter()
        .zip(&lowest)
        .enumerate()
        .map(|(i, (&hh, &ll))| {
            let range = hh - ll;
            if range == 0.0 {
                return 0.0;
            }
            let c = close[stats::source_index(i, period)];
            ((hh - c) / range * -100.0).clamp(-100.0, 0.0)
        })
        .collect()
}

pub fn current_williams_r(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Option<f64> {
    calculate_williams_r(high, low, close, period).last().copied()
}
