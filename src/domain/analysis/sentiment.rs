//! Sentiment Analyzer - lexical polarity scoring.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{AnalysisError, Analyzer};

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "great", "excellent", "amazing", "wonderful", "happy", "love", "like",
        "enjoy", "exciting", "excited", "opportunity", "benefit", "success", "successful",
        "best", "better", "improve", "growth", "grow", "win", "gain", "positive", "hope",
        "hopeful", "confident", "new", "fun", "joy", "proud", "dream", "bright", "calm",
        "safe", "secure", "reward", "promotion", "healthy", "free", "perfect",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "bad", "worse", "worst", "terrible", "awful", "sad", "hate", "dislike", "fear",
        "afraid", "scared", "risk", "risky", "loss", "lose", "fail", "failure", "problem",
        "stress", "stressed", "worried", "worry", "anxious", "difficult", "hard", "wrong",
        "regret", "negative", "doubt", "unsure", "angry", "tired", "debt", "pain", "hurt",
        "quit", "stuck", "lonely", "danger", "expensive",
    ]
    .into_iter()
    .collect()
});

/// Coarse polarity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentCategory {
    Positive,
    Neutral,
    Negative,
}

impl SentimentCategory {
    /// Derives the category from the sign of a polarity.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Self::Positive
        } else if polarity < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Neutral => write!(f, "neutral"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// Polarity of a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentScore {
    /// -1.0 (entirely negative) to 1.0 (entirely positive)
    pub polarity: f64,
    pub category: SentimentCategory,
    pub positive_matches: u32,
    pub negative_matches: u32,
}

impl SentimentScore {
    /// Neutral zero score.
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            category: SentimentCategory::Neutral,
            positive_matches: 0,
            negative_matches: 0,
        }
    }
}

/// Scores text against a fixed positive/negative lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Computes `(pos - neg) / max(1, pos + neg)`.
    pub fn score(&self, text: &str) -> SentimentScore {
        if text.trim().is_empty() {
            return SentimentScore::neutral();
        }

        let (positive, negative) = tokenize(text).fold((0u32, 0u32), |(pos, neg), token| {
            if POSITIVE_WORDS.contains(token.as_str()) {
                (pos + 1, neg)
            } else if NEGATIVE_WORDS.contains(token.as_str()) {
                (pos, neg + 1)
            } else {
                (pos, neg)
            }
        });

        let total = (positive + negative).max(1);
        let polarity = ((f64::from(positive) - f64::from(negative)) / f64::from(total)).clamp(-1.0, 1.0);

        SentimentScore {
            polarity,
            category: SentimentCategory::from_polarity(polarity),
            positive_matches: positive,
            negative_matches: negative,
        }
    }
}

impl Analyzer<str> for SentimentAnalyzer {
    type Signal = SentimentScore;

    fn analyze(&self, input: &str) -> Result<SentimentScore, AnalysisError> {
        Ok(self.score(input))
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|t| !t.is_empty())
        .map(|t| t.trim_matches('\'').to_lowercase())
}
