use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{FilterCriteria, MatchRequest};

/// Request to rank candidates for a requester
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    /// Resolve the requester from the profile snapshot by id
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
    /// Inline requester profile, used when `userId` is absent
    #[serde(default)]
    pub requester: Option<MatchRequest>,
    #[validate(nested)]
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to filter profiles without scoring
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchProfilesRequest {
    #[validate(nested)]
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}
