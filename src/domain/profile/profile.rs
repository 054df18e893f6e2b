//! Per-session adaptive preference profile.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{QuestionComplexity, TimeOfDay};
use crate::domain::decision::{Algorithm, DecisionResult, DecisionSignals};
use crate::domain::foundation::{clamp_unit, Confidence, Timestamp};

/// Entries kept in a profile's context log.
pub const CONTEXT_LOG_LIMIT: usize = 50;

/// Time-of-day buckets that carry a preference weight.
pub const PREFERENCE_BUCKETS: [TimeOfDay; 3] =
    [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening];

/// Weight of each bucket in a fresh profile.
pub const UNIFORM_TIME_WEIGHT: f64 = 1.0 / 3.0;

/// Primary decision-making approach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStyle {
    /// Data-driven, careful
    Analytical,
    /// Gut-feel, quick
    Intuitive,
    /// Mix of approaches
    Balanced,
}

impl Default for DecisionStyle {
    fn default() -> Self {
        Self::Balanced
    }
}

impl fmt::Display for DecisionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Analytical => write!(f, "Analytical"),
            Self::Intuitive => write!(f, "Intuitive"),
            Self::Balanced => write!(f, "Balanced"),
        }
    }
}

/// Context captured from one decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextEntry {
    pub timestamp: Timestamp,
    pub time_of_day: TimeOfDay,
    pub complexity: QuestionComplexity,
    pub confidence: Confidence,
    pub algorithm: Algorithm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub decision_style: DecisionStyle,
    /// [0, 1]
    pub risk_tolerance: f64,
    pub preferred_complexity: QuestionComplexity,
    /// Weights over morning/afternoon/evening; sums to 1.
    pub time_preferences: BTreeMap<TimeOfDay, f64>,
    /// Trait name to [0, 1].
    pub personality_traits: BTreeMap<String, f64>,
    /// [0, 1]; no feedback signal updates it.
    pub historical_satisfaction: f64,
    /// [0, 1]; pace of the time-preference drift.
    pub adaptation_rate: f64,
    #[serde(default)]
    pub decision_count: u64,
    #[serde(default)]
    pub last_decision_at: Option<Timestamp>,
    #[serde(default)]
    pub recent_contexts: VecDeque<ContextEntry>,
}

impl UserProfile {
    /// Fresh profile: neutral risk, uniform time weights, mid-range traits.
    pub fn create_default() -> Self {
        let time_preferences = PREFERENCE_BUCKETS
            .iter()
            .map(|bucket| (*bucket, UNIFORM_TIME_WEIGHT))
            .collect();
        let personality_traits = ["openness", "conscientiousness", "decisiveness", "optimism"]
            .iter()
            .map(|name| (name.to_string(), 0.5))
            .collect();

        Self {
            decision_style: DecisionStyle::default(),
            risk_tolerance: 0.5,
            preferred_complexity: QuestionComplexity::Medium,
            time_preferences,
            personality_traits,
            historical_satisfaction: 0.5,
            adaptation_rate: 0.1,
            decision_count: 0,
            last_decision_at: None,
            recent_contexts: VecDeque::new(),
        }
    }

    /// Stored weight for a bucket; `None` for night and unknown buckets.
    pub fn time_preference(&self, time_of_day: TimeOfDay) -> Option<f64> {
        self.time_preferences.get(&time_of_day).copied()
    }

    /// Records the context of a completed decision.
    ///
    /// Drifts the observed time-of-day weight toward 1 by `adaptation_rate`
    /// and renormalizes. Satisfaction is left untouched.
    pub fn record_decision(&mut self, signals: &DecisionSignals, result: &DecisionResult) {
        self.decision_count += 1;
        self.last_decision_at = Some(result.timestamp);

        self.recent_contexts.push_back(ContextEntry {
            timestamp: result.timestamp,
            time_of_day: signals.temporal.time_of_day,
            complexity: signals.complexity,
            confidence: result.confidence,
            algorithm: result.algorithm,
        });
        while self.recent_contexts.len() > CONTEXT_LOG_LIMIT {
            self.recent_contexts.pop_front();
        }

        let observed = signals.temporal.time_of_day;
        if !self.time_preferences.contains_key(&observed) {
            return;
        }
        let rate = clamp_unit(self.adaptation_rate);
        for (bucket, weight) in self.time_preferences.iter_mut() {
            *weight *= 1.0 - rate;
            if *bucket == observed {
                *weight += rate;
            }
        }
        self.normalize_time_preferences();
    }

    fn normalize_time_preferences(&mut self) {
        let total: f64 = self.time_preferences.values().sum();
        if total <= 0.0 || !total.is_finite() {
            for weight in self.time_preferences.values_mut() {
                *weight = UNIFORM_TIME_WEIGHT;
            }
            return;
        }
        for weight in self.time_preferences.values_mut() {
            *weight /= total;
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::create_default()
    }
}
