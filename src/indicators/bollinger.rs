// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Middle band = SMA(period), upper / lower = middle ± k·σ where σ is the
// population standard deviation of the same window. Band Width (BBW) is the
// normalised distance (upper - lower) / middle * 100.
//
// For every index upper >= middle >= lower, with equality only on a
// perfectly flat window.

use serde::{Deserialize, Serialize};

use super::sma::calculate_sma;
use super::stats;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Aligned band series. Element `i` corresponds to input index
/// `i + period - 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

impl BollingerBands {
    pub fn len(&self) -> usize {
        self.middle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middle.is_empty()
    }

    /// Band width at index `i`, or `None` when out of range or the middle
    /// band is zero.
    pub fn width(&self, i: usize) -> Option<f64> {
        let middle = *self.middle.get(i)?;
        let upper = *self.upper.get(i)?;
        let lower = *self.lower.get(i)?;
        if middle == 0.0 {
            return None;
        }
        Some((upper - lower) / middle * 100.0)
    }

    /// Position of `price` within the band at index `i` (0 at the lower
    /// band, 1 at the upper). `None` when out of range or the band is flat.
    pub fn percent_b(&self, i: usize, price: f64) -> Option<f64> {
        let upper = *self.upper.get(i)?;
        let lower = *self.lower.get(i)?;
        let range = upper - lower;
        if range == 0.0 {
            return None;
        }
        Some((price - lower) / range)
    }

    /// Latest `(upper, middle, lower)` triple.
    pub fn last(&self) -> Option<(f64, f64, f64)> {
        Some((*self.upper.last()?, *self.middle.last()?, *self.lower.last()?))
    }
}

/// Compute Bollinger Bands over `data`.
///
/// A negative `multiplier` is applied by magnitude so the band ordering
/// always holds. Runs in O(n) regardless of `period`.
///
/// # Edge cases
/// - `period == 0` or `data.len() < period` => empty bands
pub fn calculate_bollinger(data: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    if !stats::has_window(data.len(), period) {
        return BollingerBands::default();
    }

    let k = multiplier.abs();
    let middle = calculate_sma(data, period);
    let sigma = stats::rolling_std_dev(data, period);

    let (upper, lower): (Vec<f64>, Vec<f64>) = middle
        .iter()
        .zip(&sigma)
        .map(|(&m, &sd)| (m + k * sd, m - k * sd))
        .unzip();

    BollingerBands {
        upper,
        middle,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_basic() {
        let data: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&data, 20, 2.0);
        assert_eq!(bb.len(), 1);
        let (upper, middle, lower) = bb.last().unwrap();
        assert!(upper > middle);
        assert!(lower < middle);
        assert!((middle - 10.5).abs() < 1e-10);
        assert!(bb.width(0).unwrap() > 0.0);
    }

    #[test]
    fn bollinger_known_std_dev() {
        // Population std dev of [2,4,4,4,5,5,7,9] is 2, mean 5.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bb = calculate_bollinger(&data, 8, 2.0);
        assert!((bb.upper[0] - 9.0).abs() < 1e-10);
        assert!((bb.middle[0] - 5.0).abs() < 1e-10);
        assert!((bb.lower[0] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn bollinger_middle_matches_sma() {
        let data: Vec<f64> = (0..120).map(|i| 30.0 + (i as f64 * 0.4).sin() * 6.0).collect();
        let bb = calculate_bollinger(&data, 20, 2.0);
        let sma = calculate_sma(&data, 20);
        assert_eq!(bb.len(), sma.len());
        for (m, s) in bb.middle.iter().zip(&sma) {
            assert!((m - s).abs() < 1e-9);
        }
    }

    #[test]
    fn bollinger_band_ordering() {
        let data: Vec<f64> = (0..300)
            .map(|i| 100.0 + (i as f64 * 0.9).sin() * 12.0 - (i as f64 * 0.07).cos() * 4.0)
            .collect();
        for multiplier in [0.0, 1.0, 2.0, 2.5, -2.0] {
            let bb = calculate_bollinger(&data, 20, multiplier);
            for i in 0..bb.len() {
                assert!(bb.upper[i] >= bb.middle[i]);
                assert!(bb.middle[i] >= bb.lower[i]);
            }
        }
    }

    #[test]
    fn bollinger_flat() {
        let bb = calculate_bollinger(&[100.0; 20], 20, 2.0);
        let (upper, middle, lower) = bb.last().unwrap();
        assert_eq!(upper, middle);
        assert_eq!(lower, middle);
        assert!((bb.width(0).unwrap() - 0.0).abs() < 1e-10);
        assert!(bb.percent_b(0, 100.0).is_none());
    }

    #[test]
    fn bollinger_percent_b() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bb = calculate_bollinger(&data, 8, 2.0);
        assert!((bb.percent_b(0, 9.0).unwrap() - 1.0).abs() < 1e-10);
        assert!((bb.percent_b(0, 5.0).unwrap() - 0.5).abs() < 1e-10);
        assert!(bb.percent_b(1, 5.0).is_none());
    }

    #[test]
    fn bollinger_flat_after_varied_history() {
        let mut data: Vec<f64> = (0..30).map(|i| 0.1 * i as f64).collect();
        data.extend([0.7; 12]);
        let bb = calculate_bollinger(&data, 10, 2.0);
        let (upper, middle, lower) = bb.last().unwrap();
        assert_eq!(upper, middle);
        assert_eq!(lower, middle);
    }

    #[test]
    fn bollinger_recovers_after_large_outlier() {
        let data = [1e17, 4.0, 6.0, 4.0, 6.0];
        let bb = calculate_bollinger(&data, 2, 2.0);
        for i in 1..bb.len() {
            assert!((bb.middle[i] - 5.0).abs() < 1e-9);
            assert!((bb.upper[i] - 7.0).abs() < 1e-9);
            assert!((bb.lower[i] - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn accessors_tolerate_ragged_fields() {
        let bb = BollingerBands {
            upper: vec![12.0, 13.0],
            middle: vec![10.0, 11.0, 12.0],
            lower: vec![8.0],
        };
        assert!((bb.width(0).unwrap() - 40.0).abs() < 1e-10);
        assert!(bb.width(1).is_none());
        assert!(bb.width(2).is_none());
        assert!((bb.percent_b(0, 10.0).unwrap() - 0.5).abs() < 1e-10);
        assert!(bb.percent_b(1, 10.0).is_none());
    }

    #[test]
    fn bollinger_insufficient_data() {
        assert!(calculate_bollinger(&[1.0, 2.0, 3.0], 20, 2.0).is_empty());
        assert!(calculate_bollinger(&[1.0, 2.0, 3.0], 0, 2.0).is_empty());
    }
}
