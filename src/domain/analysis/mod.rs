//! Analysis Module - Independent analytical signals.
//!
//! Each signal is a stateless strategy behind the [`Analyzer`] trait so the
//! engine can swap any of them for a stub.
//!
//! # Components
//!
//! - `SentimentAnalyzer` - lexical polarity of the question
//! - `TemporalProcessor` - clock-derived factors and the optimal-window lookahead
//! - `ComplexityAssessor` - word-count complexity bucket
//! - `PatternMatcher` - recurring-question signal from the bounded history

mod analyzer;
mod complexity;
mod pattern;
mod sentiment;
mod temporal;

use std::sync::Arc;

pub use analyzer::{AnalysisError, Analyzer};
pub use complexity::{ComplexityAssessor, QuestionComplexity, MEDIUM_WORD_LIMIT, SIMPLE_WORD_LIMIT};
pub use pattern::{
    lexical_signature, question_hash, PatternMatcher, PatternQuery, PatternSignal, QuestionHash,
};
pub use sentiment::{SentimentAnalyzer, SentimentCategory, SentimentScore};
pub use temporal::{
    DayForecast, DayOfWeek, MoonPhase, OptimalWindow, Season, TemporalFactors, TemporalProcessor,
    TimeOfDay, LOOKAHEAD_DAYS,
};

use crate::domain::foundation::Timestamp;

pub type SharedSentimentAnalyzer = Arc<dyn Analyzer<str, Signal = SentimentScore>>;
pub type SharedTemporalAnalyzer = Arc<dyn Analyzer<Timestamp, Signal = TemporalFactors>>;
pub type SharedComplexityAnalyzer = Arc<dyn Analyzer<str, Signal = QuestionComplexity>>;
pub type SharedPatternAnalyzer = Arc<dyn Analyzer<PatternQuery, Signal = PatternSignal>>;
