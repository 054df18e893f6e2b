//! File-based History Adapter
//!
//! Stores the bounded decision history as a single YAML file.
//! Appends are read-modify-write under a mutex; the file is replaced
//! through a temporary file and a rename.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::decision::{DecisionHistory, DecisionRecord, HistoryLimits};
use crate::ports::{HistorySink, PersistenceError};

const HISTORY_FILE: &str = "history.yaml";

/// File-based decision history
#[derive(Debug)]
pub struct FileHistorySink {
    base_path: PathBuf,
    limits: HistoryLimits,
    write_lock: Mutex<()>,
}

impl FileHistorySink {
    /// Create a new file history rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let sink = FileHistorySink::new("./data", HistoryLimits::default());
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, limits: HistoryLimits) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            limits,
            write_lock: Mutex::new(()),
        }
    }

    fn history_file_path(&self) -> PathBuf {
        self.base_path.join(HISTORY_FILE)
    }

    async fn load(&self) -> Result<DecisionHistory, PersistenceError> {
        let file_path = self.history_file_path();
        if !file_path.exists() {
            return Ok(DecisionHistory::new(self.limits));
        }

        let yaml = fs::read_to_string(&file_path)
            .await
            .map_err(|e| PersistenceError::IoError(e.to_string()))?;
        let records: Vec<DecisionRecord> = serde_yaml::from_str(&yaml)
            .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;

        Ok(DecisionHistory::from_records(self.limits, records))
    }

    async fn store(&self, history: &DecisionHistory) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| PersistenceError::IoError(e.to_string()))?;

        let records: Vec<&DecisionRecord> = history.iter().collect();
        let yaml = serde_yaml::to_string(&records)
            .map_err(|e| PersistenceError::SerializationFailed(e.to_string()))?;

        let file_path = self.history_file_path();
        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, yaml)
            .await
            .map_err(|e| PersistenceError::IoError(e.to_string()))?;
        fs::rename(&temp_path, &file_path)
            .await
            .map_err(|e| PersistenceError::IoError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl HistorySink for FileHistorySink {
    async fn append(&self, record: &DecisionRecord) -> Result<(), PersistenceError> {
        let _guard = self.write_lock.lock().await;

        let mut history = self.load().await?;
        if history.push(record.clone()) {
            debug!(len = history.len(), path = %self.history_file_path().display(), "Decision history trimmed");
        }
        self.store(&history).await
    }

    async fn read_recent(&self, limit: usize) -> Result<Vec<DecisionRecord>, PersistenceError> {
        let _guard = self.write_lock.lock().await;
        Ok(self.load().await?.recent(limit))
    }
}
