//! Recorded decision, the unit of the bounded history.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{question_hash, QuestionHash};
use crate::domain::foundation::{SessionId, Timestamp};

use super::DecisionResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    pub session_id: SessionId,
    pub question_hash: QuestionHash,
    pub timestamp: Timestamp,
    pub result: DecisionResult,
    pub engine_version: String,
}

impl DecisionRecord {
    /// Builds the record for a computed result.
    pub fn from_result(question: &str, result: &DecisionResult) -> Self {
        Self {
            session_id: result.session_id.clone(),
            question_hash: question_hash(question),
            timestamp: result.timestamp,
            result: result.clone(),
            engine_version: result.engine_version.clone(),
        }
    }
}
