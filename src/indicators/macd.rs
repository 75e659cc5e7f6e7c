// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   macd      = EMA(fast) - EMA(slow)       over the region both EMAs cover
//   signal    = EMA(macd, signal_period)
//   histogram = macd[i + offset] - signal[i], offset = signal_period - 1
//
// `histogram` is aligned with `signal`, which is shorter than `macd` by
// `offset` elements.
// =============================================================================

use serde::{Deserialize, Serialize};

use super::ema::calculate_ema;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// The three aligned MACD series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    /// Index into `macd` at which `signal[0]` and `histogram[0]` live.
    pub fn offset(&self) -> usize {
        self.macd.len().saturating_sub(self.signal.len())
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }

    /// Latest `(macd, signal)` pair.
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.macd.last()?, *self.signal.last()?))
    }

    /// `(macd, signal)` pair one step before the latest.
    pub fn previous(&self) -> Option<(f64, f64)> {
        let m = self.macd.len().checked_sub(2)?;
        let s = self.signal.len().checked_sub(2)?;
        Some((self.macd[m], self.signal[s]))
    }
}

/// Compute MACD with explicit periods.
///
/// When `fast > slow` the roles are not swapped: the longer EMA still limits
/// the overlap, and `macd` is always `EMA(fast) - EMA(slow)`.
///
/// # Edge cases
/// - Any period `== 0` or data shorter than the longer EMA period => all
///   three series empty.
/// - Enough data for `macd` but not for `signal` => `macd` populated,
///   `signal` and `histogram` empty.
pub fn calculate_macd(
    data: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdSeries {
    if fast_period == 0 || slow_period == 0 || signal_period == 0 {
        return MacdSeries::default();
    }

    let fast = calculate_ema(data, fast_period);
    let slow = calculate_ema(data, slow_period);
    if fast.is_empty() || slow.is_empty() {
        return MacdSeries::default();
    }

    // EMA(p)[j] corresponds to input index j + p - 1; drop the leading
    // elements of whichever EMA starts earlier.
    let (fast_skip, slow_skip) = if fast_period <= slow_period {
        (slow_period - fast_period, 0)
    } else {
        (0, fast_period - slow_period)
    };

    let macd: Vec<f64> = fast
        .iter()
        .skip(fast_skip)
        .zip(slow.iter().skip(slow_skip))
        .map(|(f, s)| f - s)
        .collect();

    let signal = calculate_ema(&macd, signal_period);
    let offset = macd.len() - signal.len().min(macd.len());
    let histogram: Vec<f64> = signal
        .iter()
        .enumerate()
        .map(|(i, s)| macd[i + offset] - s)
        .collect();

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}

/// MACD with the conventional 12 / 26 / 9 periods.
pub fn calculate_macd_default(data: &[f64]) -> MacdSeries {
    calculate_macd(data, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
