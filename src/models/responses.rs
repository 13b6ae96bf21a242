use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::models::domain::ScoredCandidate;

/// Response for the find matches and search endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<ScoredCandidate>,
    /// Survivors of the filter stages before the limit was applied
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub profiles: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Skill category table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: BTreeMap<String, Vec<String>>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
