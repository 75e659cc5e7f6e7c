// =============================================================================
// Snapshot Analysis — every indicator and classifier over one history
// =============================================================================
//
// Pipeline:
//   1. Check column alignment (shortest common prefix on mismatch)
//   2. Compute every indicator over the full history
//   3. Read the latest (and previous, for crossovers) values
//   4. Run every classifier whose inputs are available
//   5. Combine the classifier outputs, weighted per `params.weights`
//
// Indicators without enough data leave their fields `None` and stay out of
// the consensus.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::IndicatorParams;
use crate::indicators::{
    calculate_bollinger, calculate_cci, calculate_ema, calculate_kdj, calculate_macd,
    calculate_rsi, calculate_sma, calculate_vwap, calculate_williams_r,
};
use crate::signals::{
    bollinger_signal, cci_signal, ema_cross_signal, kdj_signal, macd_signal, rsi_signal,
    williams_r_signal, ScoringResult, SignalInput, WeightedScorer,
};
use crate::types::{OhlcvSeries, Signal};

/// Latest indicator readings for a single history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValues {
    pub close: Option<f64>,
    pub sma: Option<f64>,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub k: Option<f64>,
    pub d: Option<f64>,
    pub j: Option<f64>,
    pub williams_r: Option<f64>,
    pub cci: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_middle: Option<f64>,
    pub bollinger_lower: Option<f64>,
    pub bollinger_width: Option<f64>,
    pub vwap: Option<f64>,
}

/// Output of [`analyze`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Number of bars actually used after alignment.
    pub bars: usize,
    pub values: IndicatorValues,
    /// Per-classifier decisions, in evaluation order.
    pub signals: Vec<(String, Signal)>,
    pub consensus: ScoringResult,
}

impl IndicatorSnapshot {
    /// Decision of the named classifier, if it ran.
    pub fn signal(&self, name: &str) -> Option<Signal> {
        self.signals
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| *s)
    }
}

fn last_two(series: &[f64]) -> Option<(f64, f64)> {
    match series {
        [.., prev, last] => Some((*prev, *last)),
        _ => None,
    }
}

/// Run every indicator over `series` and classify the latest readings.
pub fn analyze(series: &OhlcvSeries, params: &IndicatorParams) -> IndicatorSnapshot {
    // ── 1. Alignment ────────────────────────────────────────────────────
    // An empty volume column only disables VWAP.
    let has_volume = !series.volume.is_empty();
    let mut n = series.hlc_len();
    if has_volume {
        n = n.min(series.volume.len());
    }
    let mismatched = [series.high.len(), series.low.len(), series.close.len()]
        .iter()
        .any(|&len| len != n)
        || (has_volume && series.volume.len() != n);
    if mismatched {
        warn!(
            high = series.high.len(),
            low = series.low.len(),
            close = series.close.len(),
            volume = series.volume.len(),
            used = n,
            "OHLCV columns differ in length; using shortest common prefix"
        );
    }

    let high = &series.high[..n];
    let low = &series.low[..n];
    let close = &series.close[..n];
    let volume: &[f64] = if has_volume { &series.volume[..n] } else { &[] };

    // ── 2. Indicators ───────────────────────────────────────────────────
    let sma = calculate_sma(close, params.sma_period);
    let ema_fast = calculate_ema(close, params.ema_fast_period);
    let ema_slow = calculate_ema(close, params.ema_slow_period);
    let rsi = calculate_rsi(close, params.rsi_period);
    let macd = calculate_macd(close, params.macd_fast, params.macd_slow, params.macd_signal);
    let kdj = calculate_kdj(
        high,
        low,
        close,
        params.kdj_period,
        params.kdj_k_smoothing,
        params.kdj_d_smoothing,
    );
    let williams_r = calculate_williams_r(high, low, close, params.williams_r_period);
    let cci = calculate_cci(high, low, close, params.cci_period);
    let bands = calculate_bollinger(close, params.bollinger_period, params.bollinger_multiplier);
    let vwap = calculate_vwap(close, volume, params.vwap_period);

    // ── 3. Latest values ────────────────────────────────────────────────
    let (k, d, j) = match kdj.last() {
        Some((k, d, j)) => (Some(k), Some(d), Some(j)),
        None => (None, None, None),
    };
    let (bb_upper, bb_middle, bb_lower) = match bands.last() {
        Some((u, m, l)) => (Some(u), Some(m), Some(l)),
        None => (None, None, None),
    };

    let values = IndicatorValues {
        close: close.last().copied(),
        sma: sma.last().copied(),
        ema_fast: ema_fast.last().copied(),
        ema_slow: ema_slow.last().copied(),
        rsi: rsi.last().copied(),
        macd: macd.macd.last().copied(),
        macd_signal: macd.signal.last().copied(),
        macd_histogram: macd.histogram.last().copied(),
        k,
        d,
        j,
        williams_r: williams_r.last().copied(),
        cci: cci.last().copied(),
        bollinger_upper: bb_upper,
        bollinger_middle: bb_middle,
        bollinger_lower: bb_lower,
        bollinger_width: bands.len().checked_sub(1).and_then(|i| bands.width(i)),
        vwap: vwap.last().copied(),
    };

    // ── 4. Classifiers ──────────────────────────────────────────────────
    let w = &params.weights;
    let mut inputs: Vec<SignalInput> = Vec::new();

    if let Some(v) = values.rsi {
        inputs.push(SignalInput::new("rsi", w.rsi, rsi_signal(v)));
    }
    if let (Some((prev_macd, cur_macd)), Some((prev_sig, cur_sig))) =
        (last_two(&macd.macd), last_two(&macd.signal))
    {
        let signal = macd_signal(cur_macd, cur_sig, prev_macd, prev_sig);
        inputs.push(SignalInput::new("macd", w.macd, signal));
    }
    if let (Some(k), Some(d), Some(j)) = (values.k, values.d, values.j) {
        inputs.push(SignalInput::new("kdj", w.kdj, kdj_signal(k, d, j)));
    }
    if let Some(v) = values.williams_r {
        inputs.push(SignalInput::new("williams_r", w.williams_r, williams_r_signal(v)));
    }
    if let Some(v) = values.cci {
        inputs.push(SignalInput::new("cci", w.cci, cci_signal(v)));
    }
    if let (Some(price), Some(upper), Some(lower)) =
        (values.close, values.bollinger_upper, values.bollinger_lower)
    {
        let signal = bollinger_signal(price, upper, lower);
        inputs.push(SignalInput::new("bollinger", w.bollinger, signal));
    }
    // Both EMA series end at the last close, so their tails line up.
    if let (Some((prev_fast, fast)), Some((prev_slow, slow))) =
        (last_two(&ema_fast), last_two(&ema_slow))
    {
        let signal = ema_cross_signal(fast, slow, prev_fast, prev_slow);
        inputs.push(SignalInput::new("ema_cross", w.ema_cross, signal));
    }

    // ── 5. Consensus ────────────────────────────────────────────────────
    let signals: Vec<(String, Signal)> = inputs
        .iter()
        .map(|input| (input.name.clone(), input.signal))
        .collect();
    let consensus = WeightedScorer::new(params.entry_threshold).score(&inputs);

    debug!(
        bars = n,
        rsi = ?values.rsi,
        macd_histogram = ?values.macd_histogram,
        classifiers = signals.len(),
        score = consensus.total_score,
        decision = %consensus.decision,
        "indicator snapshot computed"
    );

    IndicatorSnapshot {
        bars: n,
        values,
        signals,
        consensus,
    }
}
