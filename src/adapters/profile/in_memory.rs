//! In-memory profile repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::domain::profile::UserProfile;
use crate::ports::{PersistenceError, ProfileRepository};

/// Session to profile map held in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<SessionId, UserProfile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles
    pub async fn profile_count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn get(&self, session_id: &SessionId) -> Result<Option<UserProfile>, PersistenceError> {
        Ok(self.profiles.read().await.get(session_id).cloned())
    }

    async fn put(&self, session_id: &SessionId, profile: &UserProfile) -> Result<(), PersistenceError> {
        self.profiles
            .write()
            .await
            .insert(session_id.clone(), profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = InMemoryProfileRepository::new();
        let session = SessionId::new("nobody").unwrap();

        assert!(repo.get(&session).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let repo = InMemoryProfileRepository::new();
        let session = SessionId::new("s-1").unwrap();
        let mut profile = UserProfile::create_default();
        profile.risk_tolerance = 0.8;

        repo.put(&session, &profile).await.unwrap();

        assert_eq!(repo.get(&session).await.unwrap(), Some(profile));
        assert_eq!(repo.profile_count().await, 1);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let repo = InMemoryProfileRepository::new();
        let session = SessionId::new("s-1").unwrap();
        let mut profile = UserProfile::create_default();
        repo.put(&session, &profile).await.unwrap();

        profile.decision_count = 3;
        repo.put(&session, &profile).await.unwrap();

        assert_eq!(repo.get(&session).await.unwrap().unwrap().decision_count, 3);
        assert_eq!(repo.profile_count().await, 1);
    }
}
