// =============================================================================
// Aurora Indicators — technical-indicator computation engine
// =============================================================================
//
// Converts complete OHLCV histories into derived indicator series and
// three-way trading signals. Every function is pure: no shared state, no I/O,
// safe to call from any number of threads with independent inputs.
//
//   raw arrays -> indicators::* -> signals::* classifiers -> WeightedScorer
//
// `analysis::analyze` runs the whole pipeline in one call.
// =============================================================================

pub mod analysis;
pub mod config;
pub mod indicators;
pub mod signals;
pub mod types;

pub use analysis::{analyze, IndicatorSnapshot, IndicatorValues};
pub use config::{IndicatorParams, SignalWeights};
pub use types::{Bar, OhlcvSeries, Signal};
