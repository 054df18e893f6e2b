//! ProfileRepository port for per-session profile persistence

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::profile::UserProfile;

use super::PersistenceError;

/// Repository for session preference profiles
///
/// Profiles are never evicted; `put` overwrites any stored profile.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find the profile for a session
    async fn get(&self, session_id: &SessionId) -> Result<Option<UserProfile>, PersistenceError>;

    /// Store the profile for a session
    async fn put(&self, session_id: &SessionId, profile: &UserProfile) -> Result<(), PersistenceError>;
}
