//! Decision result returned to callers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::analysis::{PatternSignal, QuestionComplexity, SentimentScore, TemporalFactors};
use crate::domain::foundation::{Confidence, SessionId, Timestamp};

/// Which scoring path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    OpenEnded,
    Binary,
    MultiChoice,
    Fallback,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenEnded => "open_ended",
            Self::Binary => "binary",
            Self::MultiChoice => "multi_choice",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The signals and intermediate scores behind a result.
///
/// Every field is optional so fallback results can report what was
/// available before the failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionFactors {
    pub temporal: Option<TemporalFactors>,
    pub sentiment: Option<SentimentScore>,
    pub pattern: Option<PatternSignal>,
    pub complexity: Option<QuestionComplexity>,
    pub personal_alignment: Option<f64>,
    pub contextual_urgency: Option<f64>,
    /// Binary score in [0, 1].
    pub score: Option<f64>,
    /// Multi-choice scores, parallel to the options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub option_scores: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResult {
    /// Chosen option, or guidance text for open-ended requests.
    pub decision: String,
    pub reasoning: String,
    pub confidence: Confidence,
    pub algorithm: Algorithm,
    pub factors: DecisionFactors,
    /// Options not chosen; never contains `decision`.
    pub alternatives: Vec<String>,
    pub follow_up_suggestions: Vec<String>,
    pub processing_duration_ms: u64,
    pub engine_version: String,
    pub session_id: SessionId,
    pub timestamp: Timestamp,
}

impl DecisionResult {
    pub fn is_fallback(&self) -> bool {
        self.algorithm == Algorithm::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DecisionResult {
        DecisionResult {
            decision: "Yes".to_string(),
            reasoning: "Because.".to_string(),
            confidence: Confidence::new(0.6),
            algorithm: Algorithm::Binary,
            factors: DecisionFactors::default(),
            alternatives: vec!["No".to_string()],
            follow_up_suggestions: vec![],
            processing_duration_ms: 3,
            engine_version: "0.1.0".to_string(),
            session_id: SessionId::new("s").unwrap(),
            timestamp: Timestamp::from_millis(0).unwrap(),
        }
    }

    #[test]
    fn algorithm_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Algorithm::MultiChoice).unwrap(), "\"multi_choice\"");
        assert_eq!(Algorithm::Fallback.as_str(), "fallback");
    }

    #[test]
    fn result_serializes_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["followUpSuggestions"], serde_json::json!([]));
        assert_eq!(json["processingDurationMs"], 3);
        assert_eq!(json["algorithm"], "binary");
        assert!(json["factors"].get("fallbackReason").is_none());
    }

    #[test]
    fn is_fallback_checks_algorithm() {
        let mut result = sample();
        assert!(!result.is_fallback());
        result.algorithm = Algorithm::Fallback;
        assert!(result.is_fallback());
    }
}
