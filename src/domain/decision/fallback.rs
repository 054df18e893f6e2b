//! Crash-proof default decision used when analysis or scoring fails.

use super::scoring::{alternatives_excluding, ScoredDecision};
use super::{Algorithm, RandomSource};

pub const BINARY_FALLBACK_CONFIDENCE: f64 = 0.5;
pub const MULTI_CHOICE_FALLBACK_CONFIDENCE: f64 = 0.4;
pub const OPEN_ENDED_FALLBACK_CONFIDENCE: f64 = 0.6;

pub const FALLBACK_GUIDANCE: &str =
    "Take a short pause, write down what matters most to you, and choose one small step you can commit to today.";

pub const FALLBACK_REASONING: &str =
    "A simplified recommendation was produced because the full analysis was unavailable.";

/// Uniform pick among the options; never fails.
pub fn fallback_decision(options: &[String], rng: &dyn RandomSource) -> ScoredDecision {
    let (decision, alternatives, raw_confidence) = match options.len() {
        0 => (
            FALLBACK_GUIDANCE.to_string(),
            Vec::new(),
            OPEN_ENDED_FALLBACK_CONFIDENCE,
        ),
        len => {
            let chosen = rng.pick_index(len);
            let confidence = if len == 2 {
                BINARY_FALLBACK_CONFIDENCE
            } else {
                MULTI_CHOICE_FALLBACK_CONFIDENCE
            };
            (
                options[chosen].clone(),
                alternatives_excluding(options, chosen),
                confidence,
            )
        }
    };

    ScoredDecision {
        decision,
        alternatives,
        raw_confidence,
        algorithm: Algorithm::Fallback,
        score: None,
        option_scores: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{SeededRandom, SequenceRandom};

    fn opts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn open_ended_fallback_is_fixed() {
        let fallback = fallback_decision(&[], &SeededRandom::from_seed(1));

        assert_eq!(fallback.decision, FALLBACK_GUIDANCE);
        assert_eq!(fallback.raw_confidence, 0.6);
        assert!(fallback.alternatives.is_empty());
        assert_eq!(fallback.algorithm, Algorithm::Fallback);
    }

    #[test]
    fn binary_fallback_picks_uniformly() {
        let options = opts(&["No", "Yes"]);

        let low = fallback_decision(&options, &SequenceRandom::constant(0.2));
        let high = fallback_decision(&options, &SequenceRandom::constant(0.7));

        assert_eq!(low.decision, "No");
        assert_eq!(low.alternatives, opts(&["Yes"]));
        assert_eq!(high.decision, "Yes");
        assert_eq!(high.raw_confidence, 0.5);
    }

    #[test]
    fn multi_choice_fallback_has_lower_confidence() {
        let fallback = fallback_decision(&opts(&["A", "B", "C"]), &SequenceRandom::constant(0.99));

        assert_eq!(fallback.decision, "C");
        assert_eq!(fallback.alternatives, opts(&["A", "B"]));
        assert_eq!(fallback.raw_confidence, 0.4);
    }
}
