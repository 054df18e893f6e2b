//! Scoring branches and confidence refinement.
//!
//! # Branches
//! - Zero options: templated guidance, fixed confidence, no scoring math
//! - Two options: weighted blend of the signals plus a small noise term
//! - Otherwise: per-option random base plus randomly scaled signal nudges

use crate::domain::analysis::{AnalysisError, TemporalFactors};
use crate::domain::foundation::{clamp_unit, Confidence};

use super::narrative::open_ended_guidance;
use super::{Algorithm, DecisionSignals, RandomSource};

/// Confidence reported for open-ended guidance.
pub const OPEN_ENDED_CONFIDENCE: f64 = 0.75;

const SENTIMENT_WEIGHT: f64 = 0.20;
const TEMPORAL_WEIGHT: f64 = 0.25;
const PATTERN_WEIGHT: f64 = 0.30;
const URGENCY_WEIGHT: f64 = 0.15;
const NOISE_WEIGHT: f64 = 0.10;

const MULTI_SENTIMENT_WEIGHT: f64 = 0.10;
const MULTI_TEMPORAL_WEIGHT: f64 = 0.10;
const MULTI_PATTERN_WEIGHT: f64 = 0.20;

const ACCURACY_BONUS: f64 = 0.10;
const ALIGNMENT_BONUS: f64 = 0.15;
const CLARITY_BONUS: f64 = 0.10;

const URGENCY_WORDS: &[&str] = &[
    "now",
    "today",
    "tonight",
    "tomorrow",
    "urgent",
    "urgently",
    "asap",
    "immediately",
    "deadline",
    "quickly",
    "soon",
];

/// Outcome of one scoring branch, before refinement.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDecision {
    pub decision: String,
    pub alternatives: Vec<String>,
    pub raw_confidence: f64,
    pub algorithm: Algorithm,
    pub score: Option<f64>,
    pub option_scores: Vec<f64>,
}

/// Urgency in [0, 1] from time-pressure words and the temporal stress factor.
pub fn contextual_urgency(question: &str, temporal: &TemporalFactors) -> f64 {
    let hits = question
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| {
            let token = token.to_lowercase();
            URGENCY_WORDS.contains(&token.as_str())
        })
        .count();
    let lexical = (hits as f64 * 0.25).min(1.0);

    clamp_unit(lexical * 0.7 + temporal.factor("stress") * 0.3)
}

pub fn score_open_ended(rng: &dyn RandomSource) -> ScoredDecision {
    ScoredDecision {
        decision: open_ended_guidance(rng),
        alternatives: Vec::new(),
        raw_confidence: OPEN_ENDED_CONFIDENCE,
        algorithm: Algorithm::OpenEnded,
        score: None,
        option_scores: Vec::new(),
    }
}

/// `options[1]` wins when the blended score exceeds 0.5.
pub fn score_binary(
    options: &[String],
    signals: &DecisionSignals,
    rng: &dyn RandomSource,
) -> Result<ScoredDecision, AnalysisError> {
    let [_, _] = options else {
        return Err(AnalysisError::stage_failed(
            "binary scoring",
            format!("expected 2 options, got {}", options.len()),
        ));
    };

    let noise = rng.uniform(-0.5, 0.5);
    let raw = 0.5
        + signals.sentiment.polarity * SENTIMENT_WEIGHT
        + signals.temporal.decision_bias * TEMPORAL_WEIGHT
        + signals.pattern.recommendation_strength * PATTERN_WEIGHT
        + signals.contextual_urgency * URGENCY_WEIGHT
        + noise * NOISE_WEIGHT;

    if !raw.is_finite() {
        return Err(AnalysisError::OutOfRange {
            stage: "binary scoring",
            value: raw,
        });
    }

    let score = raw.clamp(0.0, 1.0);
    let chosen = if score > 0.5 { 1 } else { 0 };

    Ok(ScoredDecision {
        decision: options[chosen].clone(),
        alternatives: alternatives_excluding(options, chosen),
        raw_confidence: (score - 0.5).abs() * 2.0,
        algorithm: Algorithm::Binary,
        score: Some(score),
        option_scores: Vec::new(),
    })
}

/// Highest score wins; the first option wins exact ties.
pub fn score_multi_choice(
    options: &[String],
    signals: &DecisionSignals,
    rng: &dyn RandomSource,
) -> Result<ScoredDecision, AnalysisError> {
    if options.is_empty() {
        return Err(AnalysisError::stage_failed("multi-choice scoring", "no options"));
    }

    let polarity = signals.sentiment.polarity;
    let bias = signals.temporal.decision_bias;
    let scores: Vec<f64> = (0..options.len())
        .map(|i| {
            let option_bias = signals.pattern.option_bias.get(i).copied().unwrap_or(0.0);
            let base = rng.next_f64();
            let adjusted = base
                + polarity * MULTI_SENTIMENT_WEIGHT * rng.next_f64()
                + bias * MULTI_TEMPORAL_WEIGHT * rng.next_f64()
                + option_bias * MULTI_PATTERN_WEIGHT * rng.next_f64();
            adjusted.max(0.0)
        })
        .collect();

    if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
        return Err(AnalysisError::OutOfRange {
            stage: "multi-choice scoring",
            value: *bad,
        });
    }

    let mut chosen = 0;
    for (i, score) in scores.iter().enumerate() {
        if *score > scores[chosen] {
            chosen = i;
        }
    }
    let max = scores[chosen];
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let raw_confidence = if max > 0.0 { (max - min) / max } else { 0.0 };

    Ok(ScoredDecision {
        decision: options[chosen].clone(),
        alternatives: alternatives_excluding(options, chosen),
        raw_confidence,
        algorithm: Algorithm::MultiChoice,
        score: None,
        option_scores: scores,
    })
}

/// Adds the accuracy, alignment and clarity bonuses, clamped to [0, 1].
pub fn refine_confidence(raw: f64, signals: &DecisionSignals) -> Confidence {
    let mut confidence = Confidence::new(raw);

    if signals.pattern.historical_accuracy > 0.8 {
        confidence = confidence.boosted(ACCURACY_BONUS);
    }
    if signals.personal_alignment > 0.7 {
        confidence = confidence.boosted(ALIGNMENT_BONUS);
    }
    if signals.clarity() > 0.6 {
        confidence = confidence.boosted(CLARITY_BONUS);
    }

    confidence
}

/// Every option except the chosen one, by index and by value.
pub fn alternatives_excluding(options: &[String], chosen: usize) -> Vec<String> {
    let chosen_value = &options[chosen];
    options
        .iter()
        .enumerate()
        .filter(|(i, option)| *i != chosen && *option != chosen_value)
        .map(|(_, option)| option.clone())
        .collect()
}
