//! Bundle of analysed signals for one request.

use crate::domain::analysis::{PatternSignal, QuestionComplexity, SentimentScore, TemporalFactors};

/// Everything the scoring and narrative stages read.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionSignals {
    pub temporal: TemporalFactors,
    pub sentiment: SentimentScore,
    pub pattern: PatternSignal,
    pub complexity: QuestionComplexity,
    /// [0, 1]
    pub personal_alignment: f64,
    /// [0, 1]
    pub contextual_urgency: f64,
}

impl DecisionSignals {
    /// Combined clarity factor used by confidence refinement.
    pub fn clarity(&self) -> f64 {
        self.temporal.factor("clarity")
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::domain::analysis::TemporalProcessor;
    use crate::domain::foundation::Timestamp;

    /// 2024-04-09T09:00:00Z, a Tuesday morning in spring.
    pub const TUESDAY_MORNING_MS: i64 = 1_712_653_200_000;

    /// Neutral signals at a fixed Tuesday morning with zero temporal bias.
    pub fn neutral_signals(option_count: usize) -> DecisionSignals {
        let ts = Timestamp::from_millis(TUESDAY_MORNING_MS).unwrap();
        let mut temporal = TemporalProcessor::default().factors_at(&ts);
        temporal.decision_bias = 0.0;

        DecisionSignals {
            temporal,
            sentiment: SentimentScore::neutral(),
            pattern: PatternSignal::neutral(option_count),
            complexity: QuestionComplexity::Medium,
            personal_alignment: 0.5,
            contextual_urgency: 0.0,
        }
    }
}
