//! Filesystem profile repository
//!
//! One YAML file per session: {base_dir}/profiles/{session}.yaml

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::SessionId;
use crate::domain::profile::UserProfile;
use crate::ports::{PersistenceError, ProfileRepository};

/// Filesystem-based profile repository
pub struct FileProfileRepository {
    base_dir: PathBuf,
}

impl FileProfileRepository {
    /// Create new filesystem repository with base directory
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn profiles_dir(&self) -> PathBuf {
        self.base_dir.join("profiles")
    }

    fn file_path(&self, session_id: &SessionId) -> PathBuf {
        self.profiles_dir()
            .join(format!("{}.yaml", sanitize_file_stem(session_id.as_str())))
    }
}

/// Percent-encodes everything outside `[A-Za-z0-9-_.~]`, so distinct ids
/// never share a file and no id can leave the profiles directory.
fn sanitize_file_stem(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[async_trait]
impl ProfileRepository for FileProfileRepository {
    async fn get(&self, session_id: &SessionId) -> Result<Option<UserProfile>, PersistenceError> {
        let file_path = self.file_path(session_id);
        if !file_path.exists() {
            return Ok(None);
        }

        let yaml = fs::read_to_string(&file_path)
            .await
            .map_err(|e| PersistenceError::IoError(format!("Failed to read profile: {}", e)))?;
        let profile = serde_yaml::from_str(&yaml)
            .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;

        Ok(Some(profile))
    }

    async fn put(&self, session_id: &SessionId, profile: &UserProfile) -> Result<(), PersistenceError> {
        fs::create_dir_all(self.profiles_dir())
            .await
            .map_err(|e| PersistenceError::IoError(format!("Failed to create directory: {}", e)))?;

        let yaml = serde_yaml::to_string(profile)
            .map_err(|e| PersistenceError::SerializationFailed(e.to_string()))?;

        // Write through a temporary file, then rename into place
        let file_path = self.file_path(session_id);
        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, yaml).await.map_err(|e| {
            PersistenceError::IoError(format!("Failed to write temporary file: {}", e))
        })?;
        fs::rename(&temp_path, &file_path)
            .await
            .map_err(|e| PersistenceError::IoError(format!("Failed to rename file: {}", e)))?;

        Ok(())
    }
}
