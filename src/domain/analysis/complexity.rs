//! Question complexity assessment by word count.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AnalysisError, Analyzer};

/// Fewer words than this is a simple question.
pub const SIMPLE_WORD_LIMIT: usize = 5;

/// Fewer words than this (and not simple) is a medium question.
pub const MEDIUM_WORD_LIMIT: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionComplexity {
    Simple,
    Medium,
    Complex,
}

impl QuestionComplexity {
    pub fn from_word_count(words: usize) -> Self {
        if words < SIMPLE_WORD_LIMIT {
            Self::Simple
        } else if words < MEDIUM_WORD_LIMIT {
            Self::Medium
        } else {
            Self::Complex
        }
    }
}

impl Default for QuestionComplexity {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for QuestionComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Medium => write!(f, "medium"),
            Self::Complex => write!(f, "complex"),
        }
    }
}

/// Buckets a question by its whitespace-separated word count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexityAssessor;

impl ComplexityAssessor {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer<str> for ComplexityAssessor {
    type Signal = QuestionComplexity;

    fn analyze(&self, input: &str) -> Result<QuestionComplexity, AnalysisError> {
        Ok(QuestionComplexity::from_word_count(input.split_whitespace().count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_boundaries() {
        assert_eq!(QuestionComplexity::from_word_count(0), QuestionComplexity::Simple);
        assert_eq!(QuestionComplexity::from_word_count(4), QuestionComplexity::Simple);
        assert_eq!(QuestionComplexity::from_word_count(5), QuestionComplexity::Medium);
        assert_eq!(QuestionComplexity::from_word_count(14), QuestionComplexity::Medium);
        assert_eq!(QuestionComplexity::from_word_count(15), QuestionComplexity::Complex);
    }

    #[test]
    fn assessor_counts_whitespace_separated_words() {
        let assessor = ComplexityAssessor::new();
        assert_eq!(assessor.analyze("Pick one").unwrap(), QuestionComplexity::Simple);
        assert_eq!(
            assessor.analyze("Should I take the new job offer?").unwrap(),
            QuestionComplexity::Medium
        );
        assert_eq!(
            assessor
                .analyze("Should I move across the country for a job that pays more but keeps me far from my family?")
                .unwrap(),
            QuestionComplexity::Complex
        );
    }
}
