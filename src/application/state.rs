//! Shared persistence state injected into the engine.

use std::sync::Arc;

use crate::adapters::{
    FileHistorySink, FileProfileRepository, InMemoryHistorySink, InMemoryProfileRepository,
};
use crate::config::{StorageBackend, StorageConfig};
use crate::domain::decision::HistoryLimits;
use crate::ports::{HistorySink, ProfileRepository};

/// The bounded history and the session to profile map.
#[derive(Clone)]
pub struct EngineState {
    pub history: Arc<dyn HistorySink>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl EngineState {
    pub fn new(history: Arc<dyn HistorySink>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { history, profiles }
    }

    pub fn in_memory(limits: HistoryLimits) -> Self {
        Self::new(
            Arc::new(InMemoryHistorySink::new(limits)),
            Arc::new(InMemoryProfileRepository::new()),
        )
    }

    /// Picks the adapters named by the storage section.
    pub fn from_config(storage: &StorageConfig, limits: HistoryLimits) -> Self {
        match storage.backend {
            StorageBackend::Memory => Self::in_memory(limits),
            StorageBackend::Filesystem => Self::new(
                Arc::new(FileHistorySink::new(&storage.data_dir, limits)),
                Arc::new(FileProfileRepository::new(&storage.data_dir)),
            ),
        }
    }
}
