// =============================================================================
// Weighted Consensus Scorer — combines classifier outputs into one decision
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::types::Signal;

/// One classifier output fed into the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalInput {
    pub name: String,
    pub weight: f64,
    pub signal: Signal,
}

impl SignalInput {
    pub fn new(name: impl Into<String>, weight: f64, signal: Signal) -> Self {
        Self {
            name: name.into(),
            weight,
            signal,
        }
    }
}

/// The contribution of a single signal to the final score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalContribution {
    pub name: String,
    pub weight: f64,
    pub signal: Signal,
    pub contribution: f64,
}

/// Result of the weighted scoring pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Normalised score in [-1, 1].
    pub total_score: f64,
    pub decision: Signal,
    pub signal_contributions: Vec<SignalContribution>,
}

/// Weighted vote over classifier signals.
///
/// Each input contributes `weight * direction` (Buy +1, Sell -1, Hold 0). The
/// sum is divided by the total absolute weight, so the score stays in [-1, 1]
/// no matter how many inputs are present.
pub struct WeightedScorer {
    /// Minimum absolute score needed to leave Hold.
    pub entry_threshold: f64,
}

impl WeightedScorer {
    pub fn new(entry_threshold: f64) -> Self {
        Self { entry_threshold }
    }

    pub fn score(&self, signals: &[SignalInput]) -> ScoringResult {
        let mut contributions = Vec::with_capacity(signals.len());
        let mut raw_score = 0.0;
        let mut total_weight = 0.0;

        for input in signals {
            let weight = input.weight;
            let contribution = weight * input.signal.direction();

            contributions.push(SignalContribution {
                name: input.name.clone(),
                weight,
                signal: input.signal,
                contribution,
            });

            raw_score += contribution;
            total_weight += weight.abs();
        }

        let total_score = if total_weight > 0.0 {
            raw_score / total_weight
        } else {
            0.0
        };

        let decision = if total_score > self.entry_threshold {
            Signal::Buy
        } else if total_score < -self.entry_threshold {
            Signal::Sell
        } else {
            Signal::Hold
        };

        ScoringResult {
            total_score,
            decision,
            signal_contributions: contributions,
        }
    }
}

impl Default for WeightedScorer {
    fn default() -> Self {
        Self::new(0.15)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_holds() {
        let result = WeightedScorer::default().score(&[]);
        assert_eq!(result.decision, Signal::Hold);
        assert_eq!(result.total_score, 0.0);
        assert!(result.signal_contributions.is_empty());
    }

    #[test]
    fn unanimous_buy() {
        let inputs = vec![
            SignalInput::new("rsi", 0.2, Signal::Buy),
            SignalInput::new("macd", 0.7, Signal::Buy),
        ];
        let result = WeightedScorer::default().score(&inputs);
        assert!((result.total_score - 1.0).abs() < 1e-10);
        assert_eq!(result.decision, Signal::Buy);
    }

    #[test]
    fn opposing_equal_weights_cancel() {
        let inputs = vec![
            SignalInput::new("rsi", 0.4, Signal::Buy),
            SignalInput::new("macd", 0.4, Signal::Sell),
        ];
        let result = WeightedScorer::default().score(&inputs);
        assert!(result.total_score.abs() < 1e-10);
        assert_eq!(result.decision, Signal::Hold);
    }

    #[test]
    fn caller_weight_is_used_for_every_name() {
        // (5 - 1) / 6
        let inputs = vec![
            SignalInput::new("rsi", 5.0, Signal::Buy),
            SignalInput::new("custom", 1.0, Signal::Sell),
        ];
        let result = WeightedScorer::default().score(&inputs);
        assert!((result.total_score - 4.0 / 6.0).abs() < 1e-10);
        assert_eq!(result.decision, Signal::Buy);
        assert_eq!(result.signal_contributions[0].weight, 5.0);
        assert!((result.signal_contributions[0].contribution - 5.0).abs() < 1e-12);
        assert!((result.signal_contributions[1].contribution + 1.0).abs() < 1e-12);
    }

    #[test]
    fn hold_inputs_dilute_the_score() {
        let inputs = vec![
            SignalInput::new("cci", 3.0, Signal::Sell),
            SignalInput::new("kdj", 1.0, Signal::Hold),
        ];
        let result = WeightedScorer::default().score(&inputs);
        assert!((result.total_score + 0.75).abs() < 1e-10);
        assert_eq!(result.decision, Signal::Sell);
    }

    #[test]
    fn threshold_gates_weak_consensus() {
        // 0.20 buy vs 0.15 sell + 0.15 hold => 0.05 / 0.50 = 0.1.
        let inputs = vec![
            SignalInput::new("rsi", 0.20, Signal::Buy),
            SignalInput::new("kdj", 0.15, Signal::Sell),
            SignalInput::new("bollinger", 0.15, Signal::Hold),
        ];
        let result = WeightedScorer::default().score(&inputs);
        assert!((result.total_score - 0.1).abs() < 1e-10);
        assert_eq!(result.decision, Signal::Hold);

        let loose = WeightedScorer::new(0.05).score(&inputs);
        assert_eq!(loose.decision, Signal::Buy);
    }

    #[test]
    fn zero_weights_hold() {
        let inputs = vec![
            SignalInput::new("rsi", 0.0, Signal::Buy),
            SignalInput::new("macd", 0.0, Signal::Buy),
        ];
        let result = WeightedScorer::default().score(&inputs);
        assert_eq!(result.total_score, 0.0);
        assert_eq!(result.decision, Signal::Hold);
    }
}
