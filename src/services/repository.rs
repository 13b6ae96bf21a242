use crate::models::SkillProfile;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Immutable profile list handed to the matcher for one request
pub type ProfileSnapshot = Arc<[SkillProfile]>;

/// Errors that can occur when loading profiles
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Failed to read profile seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse profile seed file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of candidate profiles
///
/// Implementations return snapshots; callers never mutate them.
pub trait ProfileRepository: Send + Sync {
    /// All profiles currently available
    fn list(&self) -> ProfileSnapshot;

    /// Look up a single profile by id
    fn get(&self, id: &str) -> Option<SkillProfile> {
        self.list().iter().find(|p| p.id == id).cloned()
    }
}

/// Profiles held in memory, e.g. loaded from a JSON seed file
#[derive(Debug, Clone)]
pub struct InMemoryProfileRepository {
    profiles: ProfileSnapshot,
}

impl InMemoryProfileRepository {
    pub fn new(profiles: Vec<SkillProfile>) -> Self {
        Self {
            profiles: profiles.into(),
        }
    }

    /// Load a JSON array of profiles
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let profiles: Vec<SkillProfile> = serde_json::from_str(&raw)?;

        tracing::debug!(
            "Loaded {} profiles from {}",
            profiles.len(),
            path.as_ref().display()
        );

        Ok(Self::new(profiles))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn list(&self) -> ProfileSnapshot {
        Arc::clone(&self.profiles)
    }
}
