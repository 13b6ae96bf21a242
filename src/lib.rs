//! SkillSwap Match - compatibility scoring and profile filtering for the
//! SkillSwap learning platform
//!
//! The core is a pure scorer and filter pipeline over skill profiles. The
//! service layer feeds it immutable profile snapshots and serves the ranked
//! results as JSON.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchResult, SkillCategories, filter_and_rank, score_candidate};
pub use crate::models::{SkillProfile, MatchRequest, FilterCriteria, ScoredCandidate, ScoringWeights, SortBy};
