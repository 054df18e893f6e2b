//! Pattern Matcher - recurring-question signal from the decision history.
//!
//! Questions are reduced to a lexical signature and a 32-bit rolling hash.
//! Distinct questions can share a hash; the resulting signal is a heuristic
//! and collisions are accepted rather than resolved.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::decision::DecisionRecord;
use crate::domain::foundation::{clamp_unit, Timestamp};

use super::{AnalysisError, Analyzer};

/// Age at which a match counts half as much.
const RECENCY_HALF_LIFE_DAYS: f64 = 7.0;

/// Summed recency that saturates the recommendation strength.
const STRENGTH_SATURATION: f64 = 5.0;

/// Rolling hash of a question's lexical signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionHash(u32);

impl QuestionHash {
    pub fn from_raw(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for QuestionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Lowercase, alphanumerics and single spaces only.
pub fn lexical_signature(question: &str) -> String {
    question
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// `h = h * 31 + byte` over the signature, wrapping at 32 bits.
pub fn question_hash(question: &str) -> QuestionHash {
    let hash = lexical_signature(question)
        .bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)));
    QuestionHash(hash)
}

/// History-derived signal for the current question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSignal {
    /// [0, 1], grows with match count and recency.
    pub recommendation_strength: f64,
    /// Parallel to the current options; each in [0, 1].
    pub option_bias: Vec<f64>,
    /// [0, 1], share of matches whose past decision is still on offer.
    pub historical_accuracy: f64,
    pub match_count: usize,
}

impl PatternSignal {
    /// No history: zero strength, zero bias, zero accuracy.
    pub fn neutral(option_count: usize) -> Self {
        Self {
            recommendation_strength: 0.0,
            option_bias: vec![0.0; option_count],
            historical_accuracy: 0.0,
            match_count: 0,
        }
    }
}

/// Input for one pattern lookup.
#[derive(Debug, Clone)]
pub struct PatternQuery {
    pub question: String,
    pub options: Vec<String>,
    /// Bounded history, oldest first.
    pub history: Vec<DecisionRecord>,
    /// Reference instant for recency weighting.
    pub now: Timestamp,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher;

impl PatternMatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn find_patterns(&self, query: &PatternQuery) -> PatternSignal {
        let hash = question_hash(&query.question);
        let matches: Vec<(&DecisionRecord, f64)> = query
            .history
            .iter()
            .filter(|record| record.question_hash == hash)
            .map(|record| (record, recency_weight(&query.now, &record.timestamp)))
            .collect();

        if matches.is_empty() {
            return PatternSignal::neutral(query.options.len());
        }

        let total_recency: f64 = matches.iter().map(|(_, w)| w).sum();
        let still_offered = matches
            .iter()
            .filter(|(record, _)| query.options.contains(&record.result.decision))
            .count();

        let option_bias = query
            .options
            .iter()
            .map(|option| {
                if total_recency <= 0.0 {
                    return 0.0;
                }
                let support: f64 = matches
                    .iter()
                    .filter(|(record, _)| &record.result.decision == option)
                    .map(|(record, w)| w * record.result.confidence.value())
                    .sum();
                clamp_unit(support / total_recency)
            })
            .collect();

        PatternSignal {
            recommendation_strength: clamp_unit(total_recency / STRENGTH_SATURATION),
            option_bias,
            historical_accuracy: still_offered as f64 / matches.len() as f64,
            match_count: matches.len(),
        }
    }
}

impl Analyzer<PatternQuery> for PatternMatcher {
    type Signal = PatternSignal;

    fn analyze(&self, input: &PatternQuery) -> Result<PatternSignal, AnalysisError> {
        Ok(self.find_patterns(input))
    }
}

/// `0.5^(age_days / 7)`; records from the future weigh 1.
fn recency_weight(now: &Timestamp, then: &Timestamp) -> f64 {
    let age_days = now.duration_since(then).num_milliseconds() as f64 / 86_400_000.0;
    if age_days <= 0.0 {
        return 1.0;
    }
    0.5f64.powf(age_days / RECENCY_HALF_LIFE_DAYS)
}
