// =============================================================================
// Signals Module
// =============================================================================
//
// - Threshold / crossover classifiers mapping indicator readings to a Signal
// - Weighted consensus over several classifier outputs

pub mod classifiers;
pub mod weighted_score;

pub use classifiers::{
    bollinger_signal, cci_signal, crossover_signal, ema_cross_signal, kdj_signal, macd_signal,
    rsi_signal, williams_r_signal,
};
pub use weighted_score::{ScoringResult, SignalContribution, SignalInput, WeightedScorer};
