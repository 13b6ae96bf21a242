use crate::services::cache::SnapshotCache;
use crate::services::profile_store::{ProfileStoreClient, ProfileStoreError};
use crate::services::repository::{InMemoryProfileRepository, ProfileRepository, ProfileSnapshot};
use std::sync::Arc;

/// Where the service reads candidate profiles from
pub enum ProfileSource {
    /// Fixed profiles, e.g. the seed file
    Static(InMemoryProfileRepository),
    /// Hosted profile store behind a snapshot cache
    Remote {
        store: ProfileStoreClient,
        cache: SnapshotCache,
    },
}

impl ProfileSource {
    /// Current immutable snapshot of all profiles
    pub async fn snapshot(&self) -> Result<ProfileSnapshot, Arc<ProfileStoreError>> {
        match self {
            ProfileSource::Static(repository) => Ok(repository.list()),
            ProfileSource::Remote { store, cache } => {
                cache
                    .get_or_fetch(async {
                        let profiles = store.list_profiles().await?;
                        tracing::info!("Refreshed profile snapshot ({} profiles)", profiles.len());
                        Ok::<ProfileSnapshot, ProfileStoreError>(profiles.into())
                    })
                    .await
            }
        }
    }

    /// Drop any cached snapshot; a no-op for static sources
    pub async fn refresh(&self) {
        if let ProfileSource::Remote { cache, .. } = self {
            cache.invalidate().await;
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ProfileSource::Remote { .. })
    }
}
