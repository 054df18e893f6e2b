//! History Sink Port - Interface for the bounded decision history.
//!
//! Implementations keep at most `cap` records. Once an append pushes the log
//! over its cap, the oldest records are dropped down to `trim_to` as part of
//! the same append, so readers never observe an over-cap log.

use async_trait::async_trait;

use crate::domain::decision::DecisionRecord;

/// Errors that can occur in persistence adapters
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Failed to serialize: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Port for appending to and reading the decision history
#[async_trait]
pub trait HistorySink: Send + Sync {
    /// Append a record, trimming the log if it goes over its cap
    ///
    /// # Errors
    /// Returns `PersistenceError` if the record cannot be stored
    async fn append(&self, record: &DecisionRecord) -> Result<(), PersistenceError>;

    /// Read up to `limit` of the most recent records, oldest first
    async fn read_recent(&self, limit: usize) -> Result<Vec<DecisionRecord>, PersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_error_io() {
        let err = PersistenceError::IoError("disk full".to_string());
        assert_eq!(err.to_string(), "IO error: disk full");
    }

    #[test]
    fn test_persistence_error_deserialization() {
        let err = PersistenceError::DeserializationFailed("bad yaml".to_string());
        assert!(err.to_string().contains("deserialize"));
    }
}
