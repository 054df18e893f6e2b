//! Decision request as received from a caller.

use serde::{Deserialize, Serialize};

/// Situational context accompanying a question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionContext {
    /// Milliseconds since the Unix epoch; absent means "now".
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// Caller-supplied session; absent means a new one is generated.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// How a request will be scored, derived from its option count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionShape {
    /// No options: guidance text instead of a choice.
    OpenEnded,
    /// Exactly two options.
    Binary,
    /// One option, or more than two.
    MultiChoice,
}

/// A question plus optional discrete options plus context.
///
/// Validation is the caller's responsibility: an empty question or an odd
/// option list still yields a well-formed result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub context: DecisionContext,
}

impl DecisionRequest {
    pub fn new(question: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            question: question.into(),
            options,
            context: DecisionContext::default(),
        }
    }

    pub fn with_timestamp(mut self, millis: i64) -> Self {
        self.context.timestamp = Some(millis);
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.context.session_id = Some(session_id.into());
        self
    }

    pub fn shape(&self) -> OptionShape {
        match self.options.len() {
            0 => OptionShape::OpenEnded,
            2 => OptionShape::Binary,
            _ => OptionShape::MultiChoice,
        }
    }
}
