// =============================================================================
// Signal Classifiers — threshold and crossover rules
// =============================================================================
//
// Stateless mappings from indicator readings to a `Signal`. Thresholds are
// fixed constants; "previous" readings are passed in explicitly so nothing is
// remembered between calls.

use crate::indicators::rsi;
use crate::types::Signal;

pub const RSI_OVERBOUGHT: f64 = rsi::OVERBOUGHT;
pub const RSI_OVERSOLD: f64 = rsi::OVERSOLD;

pub const KDJ_OVERBOUGHT: f64 = 80.0;
pub const KDJ_OVERSOLD: f64 = 20.0;

pub const WILLIAMS_R_OVERBOUGHT: f64 = -20.0;
pub const WILLIAMS_R_OVERSOLD: f64 = -80.0;

pub const CCI_OVERBOUGHT: f64 = 100.0;
pub const CCI_OVERSOLD: f64 = -100.0;

/// Sell when `rsi >= 70`, buy when `rsi <= 30`, hold otherwise.
pub fn rsi_signal(rsi: f64) -> Signal {
    if rsi >= RSI_OVERBOUGHT {
        Signal::Sell
    } else if rsi <= RSI_OVERSOLD {
        Signal::Buy
    } else {
        Signal::Hold
    }
}

/// Buy when one line crosses above the other between two consecutive
/// readings, sell when it crosses below, hold otherwise.
pub fn crossover_signal(line: f64, reference: f64, prev_line: f64, prev_reference: f64) -> Signal {
    if prev_line <= prev_reference && line > reference {
        Signal::Buy
    } else if prev_line >= prev_reference && line < reference {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// MACD line crossing its signal line.
pub fn macd_signal(macd: f64, signal: f64, prev_macd: f64, prev_signal: f64) -> Signal {
    crossover_signal(macd, signal, prev_macd, prev_signal)
}

/// Fast EMA crossing the slow EMA.
pub fn ema_cross_signal(fast: f64, slow: f64, prev_fast: f64, prev_slow: f64) -> Signal {
    crossover_signal(fast, slow, prev_fast, prev_slow)
}

/// Sell when both K and D are >= 80, buy when both are <= 20.
///
/// `j` is accepted for call-site symmetry with `KdjSeries::last` but does not
/// gate the decision.
pub fn kdj_signal(k: f64, d: f64, _j: f64) -> Signal {
    if k >= KDJ_OVERBOUGHT && d >= KDJ_OVERBOUGHT {
        Signal::Sell
    } else if k <= KDJ_OVERSOLD && d <= KDJ_OVERSOLD {
        Signal::Buy
    } else {
        Signal::Hold
    }
}

/// Sell when %R >= -20, buy when %R <= -80.
pub fn williams_r_signal(williams_r: f64) -> Signal {
    if williams_r >= WILLIAMS_R_OVERBOUGHT {
        Signal::Sell
    } else if williams_r <= WILLIAMS_R_OVERSOLD {
        Signal::Buy
    } else {
        Signal::Hold
    }
}

/// Sell when CCI >= 100, buy when CCI <= -100.
pub fn cci_signal(cci: f64) -> Signal {
    if cci >= CCI_OVERBOUGHT {
        Signal::Sell
    } else if cci <= CCI_OVERSOLD {
        Signal::Buy
    } else {
        Signal::Hold
    }
}

/// Sell at or above the upper band, buy at or below the lower band.
/// A flat band (upper == lower) always holds.
pub fn bollinger_signal(price: f64, upper: f64, lower: f64) -> Signal {
    if upper <= lower {
        return Signal::Hold;
    }
    if price >= upper {
        Signal::Sell
    } else if price <= lower {
        Signal::Buy
    } else {
        Signal::Hold
    }
}
