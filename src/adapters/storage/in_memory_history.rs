//! In-Memory History Adapter
//!
//! Keeps the bounded decision history in process memory.
//! The default backend; also used by tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::decision::{DecisionHistory, DecisionRecord, HistoryLimits};
use crate::ports::{HistorySink, PersistenceError};

/// In-memory decision history
#[derive(Debug, Clone)]
pub struct InMemoryHistorySink {
    history: Arc<RwLock<DecisionHistory>>,
}

impl InMemoryHistorySink {
    pub fn new(limits: HistoryLimits) -> Self {
        Self {
            history: Arc::new(RwLock::new(DecisionHistory::new(limits))),
        }
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.history.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.history.read().await.is_empty()
    }
}

impl Default for InMemoryHistorySink {
    fn default() -> Self {
        Self::new(HistoryLimits::default())
    }
}

#[async_trait]
impl HistorySink for InMemoryHistorySink {
    async fn append(&self, record: &DecisionRecord) -> Result<(), PersistenceError> {
        let mut history = self.history.write().await;
        if history.push(record.clone()) {
            debug!(len = history.len(), "Decision history trimmed");
        }
        Ok(())
    }

    async fn read_recent(&self, limit: usize) -> Result<Vec<DecisionRecord>, PersistenceError> {
        Ok(self.history.read().await.recent(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{Algorithm, DecisionFactors, DecisionResult};
    use crate::domain::foundation::{Confidence, SessionId, Timestamp};

    fn test_record(n: i64) -> DecisionRecord {
        let result = DecisionResult {
            decision: format!("choice-{}", n),
            reasoning: String::new(),
            confidence: Confidence::new(0.5),
            algorithm: Algorithm::Binary,
            factors: DecisionFactors::default(),
            alternatives: vec![],
            follow_up_suggestions: vec![],
            processing_duration_ms: 0,
            engine_version: "test".to_string(),
            session_id: SessionId::new("s").unwrap(),
            timestamp: Timestamp::from_millis(n).unwrap(),
        };
        DecisionRecord::from_result("question", &result)
    }

    #[tokio::test]
    async fn test_memory_history_append_and_read() {
        let sink = InMemoryHistorySink::default();

        sink.append(&test_record(1)).await.unwrap();
        sink.append(&test_record(2)).await.unwrap();

        let records = sink.read_recent(10).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].result.decision, "choice-1");
        assert_eq!(records[1].result.decision, "choice-2");
    }

    #[tokio::test]
    async fn test_memory_history_read_recent_limits() {
        let sink = InMemoryHistorySink::default();
        for n in 0..5 {
            sink.append(&test_record(n)).await.unwrap();
        }

        let records = sink.read_recent(2).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].result.decision, "choice-4");
    }

    #[tokio::test]
    async fn test_memory_history_trims_when_over_cap() {
        let sink = InMemoryHistorySink::new(HistoryLimits::new(4, 2).unwrap());
        for n in 0..4 {
            sink.append(&test_record(n)).await.unwrap();
        }
        assert_eq!(sink.len().await, 4);

        sink.append(&test_record(4)).await.unwrap();

        let records = sink.read_recent(10).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].result.decision, "choice-3");
    }

    #[tokio::test]
    async fn test_memory_history_concurrent_appends_stay_bounded() {
        let sink = InMemoryHistorySink::new(HistoryLimits::new(10, 5).unwrap());

        let handles: Vec<_> = (0..50)
            .map(|n| {
                let sink = sink.clone();
                tokio::spawn(async move { sink.append(&test_record(n)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert!(sink.len().await <= 10);
        assert!(!sink.is_empty().await);
    }
}
