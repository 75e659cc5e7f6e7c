// =============================================================================
// KDJ — Stochastic oscillator with K / D / J lines
// =============================================================================
//
//   RSV_t = (close_t - LL_t) / (HH_t - LL_t) * 100     (0 when HH == LL)
//   K_t   = ((m1 - 1) * K_{t-1} + RSV_t) / m1          K_{-1} = 50
//   D_t   = ((m2 - 1) * D_{t-1} + K_t)   / m2          D_{-1} = 50
//   J_t   = 3 * K_t - 2 * D_t
//
// HH / LL are the highest high and lowest low over the last `period` bars.
// K and D are clamped to [0, 100]; J is left unclamped.
// =============================================================================

use serde::{Deserialize, Serialize};

use super::stats;

pub const DEFAULT_PERIOD: usize = 9;
pub const DEFAULT_K_SMOOTHING: usize = 3;
pub const DEFAULT_D_SMOOTHING: usize = 3;

const SEED: f64 = 50.0;

/// Aligned K, D and J series. Element `i` corresponds to input index
/// `i + period - 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KdjSeries {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
    pub j: Vec<f64>,
}

impl KdjSeries {
    pub fn len(&self) -> usize {
        self.k.len()
    }

    pub fn is_empty(&self) -> bool {
        self.k.is_empty()
    }

    /// Latest `(k, d, j)` triple.
    pub fn last(&self) -> Option<(f64, f64, f64)> {
        Some((*self.k.last()?, *self.d.last()?, *self.j.last()?))
    }
}

/// Raw stochastic value for every complete window.
pub fn calculate_rsv(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
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
                0.0
            } else {
                (close[stats::source_index(i, period)] - ll) / range * 100.0
            }
        })
        .collect()
}

/// Compute KDJ with explicit look-back and smoothing periods.
///
/// Inputs of unequal length are truncated to the shortest.
///
/// # Edge cases
/// - `period == 0` or fewer than `period` bars => empty series
/// - A zero smoothing period is treated as 1 (no smoothing).
pub fn calculate_kdj(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
    k_smoothing: usize,
    d_smoothing: usize,
) -> KdjSeries {
    let rsv = calculate_rsv(high, low, close, period);
    if rsv.is_empty() {
        return KdjSeries::default();
    }

    let m1 = k_smoothing.max(1) as f64;
    let m2 = d_smoothing.max(1) as f64;

    let mut out = KdjSeries {
        k: Vec::with_capacity(rsv.len()),
        d: Vec::with_capacity(rsv.len()),
        j: Vec::with_capacity(rsv.len()),
    };

    let mut prev_k = SEED;
    let mut prev_d = SEED;
    for &value in &rsv {
        let k = (((m1 - 1.0) * prev_k + value) / m1).clamp(0.0, 100.0);
        let d = (((m2 - 1.0) * prev_d + k) / m2).clamp(0.0, 100.0);
        out.k.push(k);
        out.d.push(d);
        out.j.push(3.0 * k - 2.0 * d);
        prev_k = k;
        prev_d = d;
    }

    out
}

/// KDJ with the conventional 9 / 3 / 3 parameters.
pub fn calculate_kdj_default(high: &[f64], low: &[f64], close: &[f64]) -> KdjSeries {
    calculate_kdj(high, low, close, DEFAULT_PERIOD, DEFAULT_K_SMOOTHING, DEFAULT_D_SMOOTHING)
}
