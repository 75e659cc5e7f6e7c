// =============================================================================
// Shared types used across the Aurora indicator engine
// =============================================================================

use serde::{Deserialize, Serialize};

/// Three-way trading signal produced by the classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    /// +1.0 for Buy, -1.0 for Sell, 0.0 for Hold.
    pub fn direction(self) -> f64 {
        match self {
            Self::Buy => 1.0,
            Self::Sell => -1.0,
            Self::Hold => 0.0,
        }
    }
}

impl Default for Signal {
    fn default() -> Self {
        Self::Hold
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Hold => write!(f, "HOLD"),
        }
    }
}

/// A single OHLCV sample. Carries no timestamp; mapping back to time is the
/// data layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

/// Column-oriented OHLCV history, oldest first.
///
/// The indicator functions take plain slices; this struct only keeps the
/// parallel columns together for the snapshot pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OhlcvSeries {
    #[serde(default)]
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    #[serde(default)]
    pub volume: Vec<f64>,
}

impl OhlcvSeries {
    /// Number of closes in the series.
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// True when high, low and volume all have the same length as close.
    /// An empty `open` column is allowed since no indicator reads it.
    pub fn is_aligned(&self) -> bool {
        let n = self.close.len();
        self.high.len() == n
            && self.low.len() == n
            && self.volume.len() == n
            && (self.open.is_empty() || self.open.len() == n)
    }

    /// Length of the shortest of the high/low/close columns.
    pub fn hlc_len(&self) -> usize {
        self.high.len().min(self.low.len()).min(self.close.len())
    }
}

impl FromIterator<Bar> for OhlcvSeries {
    fn from_iter<I: IntoIterator<Item = Bar>>(iter: I) -> Self {
        let mut series = Self::default();
        for bar in iter {
            series.open.push(bar.open);
            series.high.push(bar.high);
            series.low.push(bar.low);
            series.close.push(bar.close);
            series.volume.push(bar.volume);
        }
        series
    }
}
