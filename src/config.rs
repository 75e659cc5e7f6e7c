// =============================================================================
// Indicator Parameters — typed, serde-backed parameter bundle
// =============================================================================
//
// Every indicator function takes its parameters explicitly. This struct only
// groups them for the snapshot pipeline and for hosts that keep strategy
// settings on disk. All fields carry `#[serde(default)]` so that a partial
// JSON file loads cleanly.
//
// Persistence uses an atomic tmp + rename pattern.
// =============================================================================

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::indicators::{bollinger, kdj, macd};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_sma_period() -> usize {
    20
}

fn default_ema_fast_period() -> usize {
    9
}

fn default_ema_slow_period() -> usize {
    21
}

fn default_rsi_period() -> usize {
    14
}

fn default_macd_fast() -> usize {
    macd::DEFAULT_FAST
}

fn default_macd_slow() -> usize {
    macd::DEFAULT_SLOW
}

fn default_macd_signal() -> usize {
    macd::DEFAULT_SIGNAL
}

fn default_kdj_period() -> usize {
    kdj::DEFAULT_PERIOD
}

fn default_kdj_k_smoothing() -> usize {
    kdj::DEFAULT_K_SMOOTHING
}

fn default_kdj_d_smoothing() -> usize {
    kdj::DEFAULT_D_SMOOTHING
}

fn default_williams_r_period() -> usize {
    14
}

fn default_cci_period() -> usize {
    20
}

fn default_bollinger_period() -> usize {
    bollinger::DEFAULT_PERIOD
}

fn default_bollinger_multiplier() -> f64 {
    bollinger::DEFAULT_MULTIPLIER
}

fn default_vwap_period() -> usize {
    20
}

fn default_entry_threshold() -> f64 {
    0.15
}

fn default_rsi_weight() -> f64 {
    0.20
}

fn default_macd_weight() -> f64 {
    0.20
}

fn default_kdj_weight() -> f64 {
    0.15
}

fn default_williams_r_weight() -> f64 {
    0.10
}

fn default_cci_weight() -> f64 {
    0.10
}

fn default_bollinger_weight() -> f64 {
    0.15
}

fn default_ema_cross_weight() -> f64 {
    0.10
}

// =============================================================================
// SignalWeights
// =============================================================================

/// Consensus weight of each classifier run by `analysis::analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalWeights {
    #[serde(default = "default_rsi_weight")]
    pub rsi: f64,

    #[serde(default = "default_macd_weight")]
    pub macd: f64,

    #[serde(default = "default_kdj_weight")]
    pub kdj: f64,

    #[serde(default = "default_williams_r_weight")]
    pub williams_r: f64,

    #[serde(default = "default_cci_weight")]
    pub cci: f64,

    #[serde(default = "default_bollinger_weight")]
    pub bollinger: f64,

    #[serde(default = "default_ema_cross_weight")]
    pub ema_cross: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            rsi: default_rsi_weight(),
            macd: default_macd_weight(),
            kdj: default_kdj_weight(),
            williams_r: default_williams_r_weight(),
            cci: default_cci_weight(),
            bollinger: default_bollinger_weight(),
            ema_cross: default_ema_cross_weight(),
        }
    }
}

impl SignalWeights {
    fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("rsi", self.rsi),
            ("macd", self.macd),
            ("kdj", self.kdj),
            ("williams_r", self.williams_r),
            ("cci", self.cci),
            ("bollinger", self.bollinger),
            ("ema_cross", self.ema_cross),
        ]
    }
}

// =============================================================================
// IndicatorParams
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    // --- Trend ---------------------------------------------------------------

    #[serde(default = "default_sma_period")]
    pub sma_period: usize,

    /// Fast leg of the EMA crossover.
    #[serde(default = "default_ema_fast_period")]
    pub ema_fast_period: usize,

    /// Slow leg of the EMA crossover.
    #[serde(default = "default_ema_slow_period")]
    pub ema_slow_period: usize,

    // --- Momentum ------------------------------------------------------------

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,

    #[serde(default = "default_kdj_period")]
    pub kdj_period: usize,

    #[serde(default = "default_kdj_k_smoothing")]
    pub kdj_k_smoothing: usize,

    #[serde(default = "default_kdj_d_smoothing")]
    pub kdj_d_smoothing: usize,

    #[serde(default = "default_williams_r_period")]
    pub williams_r_period: usize,

    #[serde(default = "default_cci_period")]
    pub cci_period: usize,

    // --- Volatility ----------------------------------------------------------

    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,

    /// Standard-deviation multiplier for the outer bands.
    #[serde(default = "default_bollinger_multiplier")]
    pub bollinger_multiplier: f64,

    // --- Volume --------------------------------------------------------------

    #[serde(default = "default_vwap_period")]
    pub vwap_period: usize,

    // --- Consensus -----------------------------------------------------------

    /// Minimum normalised consensus score needed to leave Hold.
    #[serde(default = "default_entry_threshold")]
    pub entry_threshold: f64,

    #[serde(default)]
    pub weights: SignalWeights,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_period: default_sma_period(),
            ema_fast_period: default_ema_fast_period(),
            ema_slow_period: default_ema_slow_period(),
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            kdj_period: default_kdj_period(),
            kdj_k_smoothing: default_kdj_k_smoothing(),
            kdj_d_smoothing: default_kdj_d_smoothing(),
            williams_r_period: default_williams_r_period(),
            cci_period: default_cci_period(),
            bollinger_period: default_bollinger_period(),
            bollinger_multiplier: default_bollinger_multiplier(),
            vwap_period: default_vwap_period(),
            entry_threshold: default_entry_threshold(),
            weights: SignalWeights::default(),
        }
    }
}

impl IndicatorParams {
    /// Load parameters from a JSON file at `path` and validate them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read indicator params from {}", path.display()))?;

        let params: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse indicator params from {}", path.display()))?;

        params
            .validate()
            .with_context(|| format!("invalid indicator params in {}", path.display()))?;

        info!(
            path = %path.display(),
            rsi_period = params.rsi_period,
            macd = ?(params.macd_fast, params.macd_slow, params.macd_signal),
            "indicator params loaded"
        );

        Ok(params)
    }

    /// Persist to `path` using an atomic write (write `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise indicator params to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp params to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp params to {}", path.display()))?;

        info!(path = %path.display(), "indicator params saved (atomic)");
        Ok(())
    }

    /// Reject parameter sets that could only ever produce empty output.
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("sma_period", self.sma_period),
            ("ema_fast_period", self.ema_fast_period),
            ("ema_slow_period", self.ema_slow_period),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("kdj_period", self.kdj_period),
            ("kdj_k_smoothing", self.kdj_k_smoothing),
            ("kdj_d_smoothing", self.kdj_d_smoothing),
            ("williams_r_period", self.williams_r_period),
            ("cci_period", self.cci_period),
            ("bollinger_period", self.bollinger_period),
            ("vwap_period", self.vwap_period),
        ];
        for (name, value) in periods {
            if value == 0 {
                bail!("{name} must be >= 1");
            }
        }

        if self.macd_fast >= self.macd_slow {
            bail!(
                "macd_fast ({}) must be shorter than macd_slow ({})",
                self.macd_fast,
                self.macd_slow
            );
        }
        if self.ema_fast_period >= self.ema_slow_period {
            bail!(
                "ema_fast_period ({}) must be shorter than ema_slow_period ({})",
                self.ema_fast_period,
                self.ema_slow_period
            );
        }
        if !self.bollinger_multiplier.is_finite() || self.bollinger_multiplier < 0.0 {
            bail!("bollinger_multiplier must be finite and non-negative");
        }
        if !(0.0..=1.0).contains(&self.entry_threshold) {
            bail!("entry_threshold must be within [0, 1]");
        }
        for (name, weight) in self.weights.entries() {
            if !weight.is_finite() || weight < 0.0 {
                bail!("weights.{name} must be finite and non-negative");
            }
        }
        Ok(())
    }
}
