//! UserProfileStore - lazy per-session profiles over the ProfileRepository port.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::analysis::{QuestionComplexity, TemporalFactors};
use crate::domain::decision::{DecisionResult, DecisionSignals};
use crate::domain::foundation::SessionId;
use crate::domain::profile::{calculate_personal_alignment, UserProfile};
use crate::ports::{PersistenceError, ProfileRepository};

/// Per-session profiles over a repository.
///
/// Updates within one session are serialized by a per-session lock held in
/// this store, so concurrent decisions never lose a count or context entry.
/// The lock is process-local: two stores over the same files still race.
pub struct UserProfileStore {
    repository: Arc<dyn ProfileRepository>,
    session_locks: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl UserProfileStore {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self {
            repository,
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    async fn session_lock(&self, session_id: &SessionId) -> Arc<Mutex<()>> {
        let mut locks = self.session_locks.lock().await;
        locks
            .entry(session_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Returns the stored profile, creating and storing the default on first use.
    pub async fn get_profile(&self, session_id: &SessionId) -> Result<UserProfile, PersistenceError> {
        if let Some(profile) = self.repository.get(session_id).await? {
            return Ok(profile);
        }

        debug!(session_id = %session_id, "Creating default profile");
        let profile = self.create_default();
        self.repository.put(session_id, &profile).await?;
        Ok(profile)
    }

    pub fn create_default(&self) -> UserProfile {
        UserProfile::create_default()
    }

    /// Records a completed decision against the session's profile.
    pub async fn update(
        &self,
        session_id: &SessionId,
        signals: &DecisionSignals,
        result: &DecisionResult,
    ) -> Result<(), PersistenceError> {
        let lock = self.session_lock(session_id).await;
        let _guard = lock.lock().await;

        let mut profile = self.get_profile(session_id).await?;
        profile.record_decision(signals, result);
        self.repository.put(session_id, &profile).await
    }

    pub fn calculate_personal_alignment(
        &self,
        temporal: &TemporalFactors,
        complexity: QuestionComplexity,
        profile: &UserProfile,
    ) -> f64 {
        calculate_personal_alignment(temporal, complexity, profile)
    }
}
