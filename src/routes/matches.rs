use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::Matcher;
use crate::models::{
    CategoriesResponse, ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse,
    SearchProfilesRequest,
};
use crate::services::{ProfileSnapshot, ProfileSource};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<ProfileSource>,
    pub matcher: Matcher,
    pub default_limit: u16,
    pub max_limit: u16,
}

impl AppState {
    fn limit(&self, requested: Option<u16>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit) as usize
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/profiles/search", web::post().to(search_profiles))
        .route("/profiles/refresh", web::post().to(refresh_profiles))
        .route("/skills/categories", web::get().to(list_categories));
}

fn error_response(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

async fn load_snapshot(state: &AppState) -> Result<ProfileSnapshot, HttpResponse> {
    state.profiles.snapshot().await.map_err(|e| {
        tracing::error!("Failed to load profiles: {}", e);
        error_response(
            StatusCode::BAD_GATEWAY,
            "Failed to load profiles",
            e.to_string(),
        )
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (status, profiles) = match state.profiles.snapshot().await {
        Ok(snapshot) => ("healthy", snapshot.len()),
        Err(e) => {
            tracing::warn!("Health check could not load profiles: {}", e);
            ("degraded", 0)
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        profiles,
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "criteria": { "searchText": "react", "minRating": 4.5 },
///   "limit": 20
/// }
/// ```
/// An inline `requester` profile may be sent instead of `userId`.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: field_errors={:?}", errors);
        return error_response(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let snapshot = match load_snapshot(&state).await {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };

    let req = req.into_inner();
    let requester = match (req.user_id, req.requester) {
        (Some(user_id), _) => match snapshot.iter().find(|p| p.id == user_id) {
            Some(profile) => profile.clone(),
            None => {
                return error_response(
                    StatusCode::NOT_FOUND,
                    "Requester not found",
                    format!("No profile with id {}", user_id),
                );
            }
        },
        (None, Some(requester)) => requester,
        (None, None) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Missing requester",
                "Either userId or requester is required".to_string(),
            );
        }
    };

    let limit = state.limit(req.limit);

    tracing::info!("Finding matches for user: {}, limit: {}", requester.id, limit);

    let result = state
        .matcher
        .find_matches(&requester, &snapshot, &req.criteria, limit);

    tracing::info!(
        "Returning {} matches for user {} (from {} candidates)",
        result.matches.len(),
        requester.id,
        result.total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches: result.matches,
        total_results: result.total_results,
        total_candidates: result.total_candidates,
    })
}

/// Search profiles without scoring
///
/// POST /api/v1/profiles/search
async fn search_profiles(
    state: web::Data<AppState>,
    req: web::Json<SearchProfilesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let snapshot = match load_snapshot(&state).await {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };

    let limit = state.limit(req.limit);
    let result = state.matcher.search(&snapshot, &req.criteria, limit);

    tracing::debug!(
        "Search returned {} of {} profiles",
        result.total_results,
        result.total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches: result.matches,
        total_results: result.total_results,
        total_candidates: result.total_candidates,
    })
}

/// Drop the cached profile snapshot
///
/// POST /api/v1/profiles/refresh
async fn refresh_profiles(state: web::Data<AppState>) -> impl Responder {
    state.profiles.refresh().await;

    HttpResponse::Ok().json(serde_json::json!({
        "refreshed": state.profiles.is_remote(),
    }))
}

/// Skill category table used by the category filter
///
/// GET /api/v1/skills/categories
async fn list_categories(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(CategoriesResponse {
        categories: state.matcher.categories().to_table(),
    })
}
