// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{SkillProfile, MatchRequest, FilterCriteria, SortBy, ScoredCandidate, ScoreBreakdown, ScoringWeights};
pub use requests::{FindMatchesRequest, SearchProfilesRequest};
pub use responses::{FindMatchesResponse, HealthResponse, CategoriesResponse, ErrorResponse};
