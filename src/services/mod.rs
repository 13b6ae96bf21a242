// Service exports
pub mod cache;
pub mod profile_store;
pub mod repository;
pub mod source;

pub use cache::SnapshotCache;
pub use profile_store::{ProfileStoreClient, ProfileStoreError};
pub use repository::{InMemoryProfileRepository, ProfileRepository, ProfileSnapshot, RepositoryError};
pub use source::ProfileSource;
