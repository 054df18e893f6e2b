//! Common capability shared by every analytical signal.

use thiserror::Error;

/// Errors raised by an analytical stage.
///
/// These never reach the caller of the engine; the orchestrator routes them
/// to the fallback path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("{stage} analysis failed: {reason}")]
    StageFailed { stage: &'static str, reason: String },

    #[error("{stage} produced an out-of-range value: {value}")]
    OutOfRange { stage: &'static str, value: f64 },
}

impl AnalysisError {
    /// Creates a stage failure error.
    pub fn stage_failed(stage: &'static str, reason: impl Into<String>) -> Self {
        AnalysisError::StageFailed {
            stage,
            reason: reason.into(),
        }
    }
}

/// A stateless strategy turning an input into one signal.
///
/// Implementations are pure: identical input yields identical output.
pub trait Analyzer<I: ?Sized>: Send + Sync {
    type Signal;

    fn analyze(&self, input: &I) -> Result<Self::Signal, AnalysisError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct WordCounter;

    impl Analyzer<str> for WordCounter {
        type Signal = usize;

        fn analyze(&self, input: &str) -> Result<usize, AnalysisError> {
            Ok(input.split_whitespace().count())
        }
    }

    #[test]
    fn analyzer_can_be_used_as_trait_object() {
        let analyzer: Box<dyn Analyzer<str, Signal = usize>> = Box::new(WordCounter);
        assert_eq!(analyzer.analyze("one two three").unwrap(), 3);
    }

    #[test]
    fn stage_failed_displays_stage_and_reason() {
        let err = AnalysisError::stage_failed("sentiment", "lexicon unavailable");
        assert_eq!(err.to_string(), "sentiment analysis failed: lexicon unavailable");
    }
}
