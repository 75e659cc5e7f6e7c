// =============================================================================
// Rolling Volume-Weighted Average Price (VWAP)
// =============================================================================
//
//   VWAP = Σ(price_i * volume_i) / Σ(volume_i)    over each window of `period`
//
// Windows with no traded volume are skipped rather than emitted as NaN, so the
// output can be shorter than `len - period + 1`.
// =============================================================================

use super::stats::{self, CompensatedSum};

/// Compute rolling VWAP from parallel `price` / `volume` slices (truncated to
/// the shorter of the two).
///
/// Compensated running sums keep this O(n). A window is skipped only when
/// none of its samples carries positive volume.
///
/// # Edge cases
/// - `period == 0` or fewer than `period` samples => empty vec
pub fn calculate_vwap(price: &[f64], volume: &[f64], period: usize) -> Vec<f64> {
    let n = price.len().min(volume.len());
    if !stats::has_window(n, period) {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(stats::window_count(n, period));
    let mut pv_sum = CompensatedSum::default();
    let mut vol_sum = CompensatedSum::default();
    // Exact count of positive-volume samples in the window.
    let mut traded = 0usize;

    for i in 0..n {
        pv_sum.add(price[i] * volume[i]);
        vol_sum.add(volume[i]);
        if volume[i] > 0.0 {
            traded += 1;
        }

        if i >= period {
            let out = i - period;
            pv_sum.add(-(price[out] * volume[out]));
            vol_sum.add(-volume[out]);
            if volume[out] > 0.0 {
                traded -= 1;
            }
        }

        if i + 1 < period || traded == 0 {
            continue;
        }

        let (pv, vol) = if vol_sum.value() > 0.0 {
            (pv_sum.value(), vol_sum.value())
        } else {
            window_sums(&price[i + 1 - period..=i], &volume[i + 1 - period..=i])
        };
        if vol <= 0.0 {
            continue;
        }
        let vwap = pv / vol;
        if vwap.is_finite() {
            result.push(vwap);
        }
    }

    result
}

/// Direct `(Σ price·volume, Σ volume)` over one window.
fn window_sums(price: &[f64], volume: &[f64]) -> (f64, f64) {
    let mut pv = CompensatedSum::default();
    let mut vol = CompensatedSum::default();
    for (p, v) in price.iter().zip(volume) {
        pv.add(p * v);
        vol.add(*v);
    }
    (pv.value(), vol.value())
}

pub fn current_vwap(price: &[f64], volume: &[f64], period: usize) -> Option<f64> {
    let n = price.len().min(volume.len());
    if !stats::has_window(n, period) {
        return None;
    }
    let start = n - period;
    let (pv, vol) = window_sums(&price[start..n], &volume[start..n]);
    if vol <= 0.0 {
        return None;
    }
    Some(pv / vol)
}
