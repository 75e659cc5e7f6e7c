// =============================================================================
// Shared windowing and statistics helpers
// =============================================================================
//
// Every rolling helper follows the same policy as the indicators built on it:
// one output per complete window, empty output when `period == 0` or the
// input is shorter than `period`.
//
//   rolling_sum        compensated running total, O(n)
//   rolling_max/min    monotonic deque of candidate indices, O(n)
//   rolling_std_dev    shifted running sum / sum of squares, O(n)
//   rolling_mean_abs_deviation
//                      Fenwick trees over value ranks, O(n log n)
//
// Both dispersion helpers report exactly 0 for a window whose max equals its
// min.
// =============================================================================

use std::collections::VecDeque;

/// True when `period` is usable against a series of length `len`.
#[inline]
pub fn has_window(len: usize, period: usize) -> bool {
    period > 0 && len >= period
}

/// Number of complete windows of `period` over `len` samples.
#[inline]
pub fn window_count(len: usize, period: usize) -> usize {
    if has_window(len, period) {
        len - period + 1
    } else {
        0
    }
}

/// Map an output index of a simple windowed indicator back to the index of
/// the input sample that closes its window.
#[inline]
pub fn source_index(output_index: usize, period: usize) -> usize {
    output_index + period.saturating_sub(1)
}

/// Neumaier-compensated accumulator.
///
/// Removing a sample is `add(-x)`. The low-order bits lost when a large value
/// enters the running total are carried in `compensation`, so they come back
/// once that value leaves again.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    pub fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }

    /// Fold another accumulator in without losing its compensation term.
    pub fn merge(&mut self, other: &CompensatedSum) {
        self.add(other.sum);
        self.add(other.compensation);
    }

    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Sum of each window of `period` consecutive samples.
pub fn rolling_sum(data: &[f64], period: usize) -> Vec<f64> {
    if !has_window(data.len(), period) {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(window_count(data.len(), period));
    let mut sum = CompensatedSum::default();
    for &x in &data[..period] {
        sum.add(x);
    }
    result.push(sum.value());

    for i in period..data.len() {
        sum.add(data[i]);
        sum.add(-data[i - period]);
        result.push(sum.value());
    }
    result
}

/// Highest value of each window of `period` consecutive samples.
pub fn rolling_max(data: &[f64], period: usize) -> Vec<f64> {
    rolling_extreme(data, period, |candidate, incoming| candidate <= incoming)
}

/// Lowest value of each window of `period` consecutive samples.
pub fn rolling_min(data: &[f64], period: usize) -> Vec<f64> {
    rolling_extreme(data, period, |candidate, incoming| candidate >= incoming)
}

/// `dominated(candidate, incoming)` returns true when `candidate` can never be
/// the window extreme again once `incoming` has entered the window.
fn rolling_extreme<F>(data: &[f64], period: usize, dominated: F) -> Vec<f64>
where
    F: Fn(f64, f64) -> bool,
{
    if !has_window(data.len(), period) {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(window_count(data.len(), period));
    // Indices with values strictly ordered from front (extreme) to back.
    let mut deque: VecDeque<usize> = VecDeque::with_capacity(period);

    for (i, &value) in data.iter().enumerate() {
        while let Some(&back) = deque.back() {
            if dominated(data[back], value) {
                deque.pop_back();
            } else {
                break;
            }
        }
        deque.push_back(i);

        if let Some(&front) = deque.front() {
            if front + period <= i {
                deque.pop_front();
            }
        }

        if i + 1 >= period {
            if let Some(&front) = deque.front() {
                result.push(data[front]);
            }
        }
    }
    result
}

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(window: &[f64]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    window.iter().sum::<f64>() / window.len() as f64
}

/// Population standard deviation (divides by N) of each window.
///
/// Sums are taken over `x - median(data)` so the variance subtraction does
/// not cancel against the magnitude of the prices themselves.
pub fn rolling_std_dev(data: &[f64], period: usize) -> Vec<f64> {
    if !has_window(data.len(), period) {
        return Vec::new();
    }

    let mut scratch = data.to_vec();
    let mid = scratch.len() / 2;
    let (_, &mut shift, _) = scratch.select_nth_unstable_by(mid, f64::total_cmp);
    let n = period as f64;
    let highs = rolling_max(data, period);
    let lows = rolling_min(data, period);

    let mut sum = CompensatedSum::default();
    let mut sum_sq = CompensatedSum::default();
    let mut result = Vec::with_capacity(window_count(data.len(), period));

    for (i, &x) in data.iter().enumerate() {
        let d = x - shift;
        sum.add(d);
        sum_sq.add(d * d);
        if i >= period {
            let d = data[i - period] - shift;
            sum.add(-d);
            sum_sq.add(-(d * d));
        }
        if i + 1 < period {
            continue;
        }

        let w = i + 1 - period;
        if highs[w] == lows[w] {
            result.push(0.0);
            continue;
        }
        let s = sum.value();
        let variance = (sum_sq.value() - s * s / n) / n;
        result.push(variance.max(0.0).sqrt());
    }
    result
}

/// Prefix counts and sums over value ranks.
struct RankTree {
    counts: Vec<i64>,
    sums: Vec<CompensatedSum>,
}

impl RankTree {
    fn new(ranks: usize) -> Self {
        Self {
            counts: vec![0; ranks + 1],
            sums: vec![CompensatedSum::default(); ranks + 1],
        }
    }

    fn update(&mut self, rank: usize, count: i64, value: f64) {
        let mut i = rank + 1;
        while i < self.counts.len() {
            self.counts[i] += count;
            self.sums[i].add(value);
            i += i & i.wrapping_neg();
        }
    }

    /// Count and sum of every entry with rank `< rank`.
    fn prefix(&self, rank: usize) -> (i64, f64) {
        let mut count = 0;
        let mut sum = CompensatedSum::default();
        let mut i = rank;
        while i > 0 {
            count += self.counts[i];
            sum.merge(&self.sums[i]);
            i -= i & i.wrapping_neg();
        }
        (count, sum.value())
    }
}

/// Mean absolute deviation of each window around that window's mean.
///
/// With `m` the mean, `Σ|x - m|` splits into `m·below - Σbelow` plus
/// `Σabove - m·above`, and both counts and sums come from a Fenwick tree
/// keyed by the rank of each value in the sorted input.
pub fn rolling_mean_abs_deviation(data: &[f64], period: usize) -> Vec<f64> {
    if !has_window(data.len(), period) {
        return Vec::new();
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup_by(|a, b| a.total_cmp(b).is_eq());
    let rank_of = |x: f64| sorted.partition_point(|&v| v.total_cmp(&x).is_lt());

    let n = period as f64;
    let sums = rolling_sum(data, period);
    let highs = rolling_max(data, period);
    let lows = rolling_min(data, period);

    let mut tree = RankTree::new(sorted.len());
    let mut result = Vec::with_capacity(sums.len());

    for (i, &x) in data.iter().enumerate() {
        tree.update(rank_of(x), 1, x);
        if i >= period {
            let out = data[i - period];
            tree.update(rank_of(out), -1, -out);
        }
        if i + 1 < period {
            continue;
        }

        let w = i + 1 - period;
        if highs[w] == lows[w] {
            result.push(0.0);
            continue;
        }
        let total = sums[w];
        let center = total / n;
        let split = sorted.partition_point(|&v| v <= center);
        let (below_count, below_sum) = tree.prefix(split);
        let above_count = period as i64 - below_count;
        let above_sum = total - below_sum;

        let below_dev = (center * below_count as f64 - below_sum).max(0.0);
        let above_dev = (above_sum - center * above_count as f64).max(0.0);
        result.push((below_dev + above_dev) / n);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_max(data: &[f64], period: usize) -> Vec<f64> {
        data.windows(period)
            .map(|w| w.iter().cloned().fold(f64::MIN, f64::max))
            .collect()
    }

    fn naive_min(data: &[f64], period: usize) -> Vec<f64> {
        data.windows(period)
            .map(|w| w.iter().cloned().fold(f64::MAX, f64::min))
            .collect()
    }

    // ---- window bookkeeping ----------------------------------------------

    #[test]
    fn window_count_policy() {
        assert_eq!(window_count(0, 5), 0);
        assert_eq!(window_count(10, 0), 0);
        assert_eq!(window_count(2, 5), 0);
        assert_eq!(window_count(5, 5), 1);
        assert_eq!(window_count(10, 3), 8);
    }

    #[test]
    fn source_index_offsets_by_period() {
        assert_eq!(source_index(0, 3), 2);
        assert_eq!(source_index(4, 1), 4);
        assert_eq!(source_index(0, 0), 0);
    }

    // ---- rolling_sum -----------------------------------------------------

    #[test]
    fn rolling_sum_basic() {
        let sums = rolling_sum(&[1.0, 2.0, 3.0, 4.0, 5.0], 2);
        assert_eq!(sums, vec![3.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn rolling_sum_degenerate() {
        assert!(rolling_sum(&[], 3).is_empty());
        assert!(rolling_sum(&[1.0, 2.0], 0).is_empty());
        assert!(rolling_sum(&[1.0, 2.0], 3).is_empty());
    }

    // ---- rolling extremes ------------------------------------------------

    #[test]
    fn rolling_extremes_match_naive_scan() {
        let data = vec![
            5.0, 3.0, 8.0, 8.0, 1.0, 7.0, 2.0, 9.0, 4.0, 4.0, 6.0, 0.5, 3.3, 10.0, 2.2,
        ];
        for period in 1..=data.len() {
            assert_eq!(rolling_max(&data, period), naive_max(&data, period), "max p={period}");
            assert_eq!(rolling_min(&data, period), naive_min(&data, period), "min p={period}");
        }
    }

    #[test]
    fn rolling_extremes_degenerate() {
        assert!(rolling_max(&[], 2).is_empty());
        assert!(rolling_min(&[1.0], 0).is_empty());
        assert!(rolling_min(&[1.0], 2).is_empty());
    }

    // ---- compensated sums --------------------------------------------------

    #[test]
    fn rolling_sum_recovers_after_large_outlier() {
        let sums = rolling_sum(&[1e17, 1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(sums.len(), 4);
        assert_eq!(&sums[1..], &[3.0, 5.0, 7.0]);
    }

    #[test]
    fn compensated_sum_cancels_exactly() {
        let mut acc = CompensatedSum::default();
        for x in [0.1, 1e16, 0.2, -1e16, 0.3] {
            acc.add(x);
        }
        assert!((acc.value() - 0.6).abs() < 1e-15);
    }

    // ---- dispersion --------------------------------------------------------

    fn naive_std_dev(data: &[f64], period: usize) -> Vec<f64> {
        data.windows(period)
            .map(|w| {
                let m = mean(w);
                (w.iter().map(|x| (x - m).powi(2)).sum::<f64>() / period as f64).sqrt()
            })
            .collect()
    }

    fn naive_mean_abs_deviation(data: &[f64], period: usize) -> Vec<f64> {
        data.windows(period)
            .map(|w| {
                let m = mean(w);
                w.iter().map(|x| (x - m).abs()).sum::<f64>() / period as f64
            })
            .collect()
    }

    fn wavy(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 250.0 + (i as f64 * 0.37).sin() * 9.0 + (i % 4) as f64 * 0.5)
            .collect()
    }

    #[test]
    fn rolling_std_dev_matches_naive_scan() {
        let data = wavy(90);
        for period in [1, 2, 5, 20, 90] {
            let fast = rolling_std_dev(&data, period);
            let slow = naive_std_dev(&data, period);
            assert_eq!(fast.len(), slow.len());
            for (a, b) in fast.iter().zip(&slow) {
                assert!((a - b).abs() < 1e-7, "period {period}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn rolling_std_dev_known_value() {
        // Population std dev of [2,4,4,4,5,5,7,9] is 2.
        let sd = rolling_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 8);
        assert!((sd[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rolling_mean_abs_deviation_matches_naive_scan() {
        let mut data = wavy(90);
        // Repeated values exercise the rank bookkeeping.
        data[10] = data[3];
        data[40] = data[3];
        for period in [1, 2, 4, 17, 90] {
            let fast = rolling_mean_abs_deviation(&data, period);
            let slow = naive_mean_abs_deviation(&data, period);
            assert_eq!(fast.len(), slow.len());
            for (a, b) in fast.iter().zip(&slow) {
                assert!((a - b).abs() < 1e-9, "period {period}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn mean_abs_deviation_known_value() {
        // mean 2.5 => |dev| = 1.5, 0.5, 0.5, 1.5 => 1.0
        let mad = rolling_mean_abs_deviation(&[1.0, 2.0, 3.0, 4.0], 4);
        assert!((mad[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn flat_windows_have_zero_dispersion() {
        let mut data = vec![0.1; 30];
        data.extend([5.0, 0.1, 0.1, 0.1]);
        let sd = rolling_std_dev(&data, 10);
        let mad = rolling_mean_abs_deviation(&data, 10);
        assert_eq!(sd[0], 0.0);
        assert_eq!(mad[0], 0.0);
        assert!(sd[21] > 0.0 && mad[21] > 0.0);
    }

    #[test]
    fn dispersion_after_large_outlier() {
        let data = [1e17, 1.0, 3.0, 1.0, 3.0];
        let sd = rolling_std_dev(&data, 2);
        let mad = rolling_mean_abs_deviation(&data, 2);
        for w in 1..4 {
            assert!((sd[w] - 1.0).abs() < 1e-9, "sd[{w}] = {}", sd[w]);
            assert!((mad[w] - 1.0).abs() < 1e-9, "mad[{w}] = {}", mad[w]);
        }
    }

    #[test]
    fn dispersion_degenerate() {
        assert!(rolling_std_dev(&[], 3).is_empty());
        assert!(rolling_std_dev(&[1.0], 0).is_empty());
        assert!(rolling_mean_abs_deviation(&[1.0, 2.0], 3).is_empty());
        assert_eq!(mean(&[]), 0.0);
    }
}
