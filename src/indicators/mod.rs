// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations over complete price histories
// (oldest first). Insufficient data is never an error: every series function
// returns an empty result and every `current_*` reader returns `None`.
//
//   trend       sma, ema
//   momentum    rsi, macd, kdj, williams_r, cci
//   volatility  bollinger
//   volume      vwap
//
// Simple windowed outputs are index-aligned: output `i` belongs to input
// `i + period - 1` (see `stats::source_index`).

pub mod stats;

pub mod ema;
pub mod sma;

pub mod cci;
pub mod kdj;
pub mod macd;
pub mod rsi;
pub mod williams_r;

pub mod bollinger;

pub mod vwap;

pub use bollinger::{calculate_bollinger, BollingerBands};
pub use cci::{calculate_cci, current_cci, typical_price};
pub use ema::{calculate_ema, current_ema};
pub use kdj::{calculate_kdj, calculate_kdj_default, calculate_rsv, KdjSeries};
pub use macd::{calculate_macd, calculate_macd_default, MacdSeries};
pub use rsi::{calculate_rsi, current_rsi, rsi_zone};
pub use sma::{calculate_sma, current_sma};
pub use stats::source_index;
pub use vwap::{calculate_vwap, current_vwap};
pub use williams_r::{calculate_williams_r, current_williams_r};
