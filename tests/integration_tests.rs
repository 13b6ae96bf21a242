// Integration tests for SkillSwap Match

use actix_web::{http::StatusCode, test, web, App};
use serde_json::json;
use skillswap_match::core::Matcher;
use skillswap_match::models::{CategoriesResponse, FilterCriteria, FindMatchesResponse, HealthResponse, SortBy};
use skillswap_match::routes::{self, AppState};
use skillswap_match::services::{
    InMemoryProfileRepository, ProfileRepository, ProfileSource, ProfileStoreClient, ProfileStoreError,
    SnapshotCache,
};
use std::sync::Arc;

const SEED_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/profiles.json");

fn seed_repository() -> InMemoryProfileRepository {
    InMemoryProfileRepository::from_json_file(SEED_PATH).expect("seed file should load")
}

fn create_state() -> AppState {
    AppState {
        profiles: Arc::new(ProfileSource::Static(seed_repository())),
        matcher: Matcher::with_default_weights(),
        default_limit: 20,
        max_limit: 100,
    }
}

fn ids(response: &FindMatchesResponse) -> Vec<&str> {
    response.matches.iter().map(|m| m.profile.id.as_str()).collect()
}

fn store_client(base_url: String) -> ProfileStoreClient {
    paged_store_client(base_url, 500)
}

fn paged_store_client(base_url: String, page_size: usize) -> ProfileStoreClient {
    ProfileStoreClient::new(
        base_url,
        "test_key".to_string(),
        "test_project".to_string(),
        "db".to_string(),
        "profiles".to_string(),
        page_size,
    )
    .unwrap()
}

fn full_page(total: Option<usize>) -> String {
    let mut body = json!({
        "documents": [
            { "id": "u1", "displayName": "Asha" },
            { "id": "u2", "displayName": "Ben" }
        ]
    });
    if let Some(total) = total {
        body["total"] = json!(total);
    }
    body.to_string()
}

const DOCUMENTS_PATH: &str = "/databases/db/collections/profiles/documents";

#[::core::prelude::v1::test]
fn test_integration_seed_matching() {
    let repository = seed_repository();
    let requester = repository.get("u-1004").unwrap();
    let matcher = Matcher::with_default_weights();

    let result = matcher.find_matches(&requester, &repository.list(), &FilterCriteria::default(), 3);

    let ranked: Vec<_> = result.matches.iter().map(|m| m.profile.id.as_str()).collect();
    assert_eq!(ranked, vec!["u-1001", "u-1003", "u-1002"]);
    assert_eq!(result.matches[0].score, 80);
    assert_eq!(result.matches[0].breakdown.they_teach, vec!["React"]);
    assert_eq!(result.matches[1].breakdown.they_learn, vec!["Spanish"]);
    assert_eq!(result.total_results, 7);
    assert_eq!(result.total_candidates, 8);
}

#[::core::prelude::v1::test]
fn test_location_bonus_needs_exact_text() {
    let repository = seed_repository();
    let sara = repository.get("u-1002").unwrap();
    let daniel = repository.get("u-1007").unwrap();

    // "Mumbai, MH" and "Mumbai, India" are different strings
    let matcher = Matcher::with_default_weights();
    assert_eq!(matcher.score_candidate(&sara, &daniel), 0);
}

#[::core::prelude::v1::test]
fn test_search_by_location_and_sort_by_rating() {
    let repository = seed_repository();
    let criteria = FilterCriteria {
        location: Some("mumbai".to_string()),
        sort_by: SortBy::Rating,
        ..FilterCriteria::default()
    };

    let result = Matcher::with_default_weights().search(&repository.list(), &criteria, 10);

    let ranked: Vec<_> = result.matches.iter().map(|m| m.profile.id.as_str()).collect();
    assert_eq!(ranked, vec!["u-1002", "u-1007"]);
}

#[actix_web::test]
async fn test_health_route() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: HealthResponse = test::read_body_json(resp).await;
    assert_eq!(body.status, "healthy");
    assert_eq!(body.profiles, 8);
}

#[actix_web::test]
async fn test_find_matches_route() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "userId": "u-1004", "limit": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: FindMatchesResponse = test::read_body_json(resp).await;
    assert_eq!(ids(&body), vec!["u-1001", "u-1003"]);
    assert_eq!(body.matches[0].match_percent, 80);
    assert_eq!(body.total_results, 7);
}

#[actix_web::test]
async fn test_find_matches_with_inline_requester() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({
            "requester": {
                "id": "guest",
                "displayName": "Guest",
                "offeredSkills": ["Python"],
                "wantedSkills": ["Guitar"]
            },
            "criteria": { "category": "Music" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: FindMatchesResponse = test::read_body_json(resp).await;
    // Kabir teaches guitar; Aarav wants guitar but offers nothing Guest wants
    assert_eq!(ids(&body), vec!["u-1005", "u-1001", "u-1008"]);
    assert_eq!(body.matches[0].score, 70);
}

#[actix_web::test]
async fn test_find_matches_errors() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let unknown = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "userId": "nobody" }))
        .to_request();
    assert_eq!(test::call_service(&app, unknown).await.status(), StatusCode::NOT_FOUND);

    let missing = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "criteria": {} }))
        .to_request();
    assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::BAD_REQUEST);

    let bad_limit = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "userId": "u-1004", "limit": 0 }))
        .to_request();
    assert_eq!(test::call_service(&app, bad_limit).await.status(), StatusCode::BAD_REQUEST);

    let bad_rating = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "userId": "u-1004", "criteria": { "minRating": 7.5 } }))
        .to_request();
    assert_eq!(test::call_service(&app, bad_rating).await.status(), StatusCode::BAD_REQUEST);

    let malformed = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    assert_eq!(test::call_service(&app, malformed).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_search_profiles_route() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/profiles/search")
        .set_json(json!({ "criteria": { "minRating": 4.5 } }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: FindMatchesResponse = test::read_body_json(resp).await;
    assert_eq!(ids(&body), vec!["u-1001", "u-1002", "u-1004", "u-1007"]);
    assert!(body.matches.iter().all(|m| m.score == 0));
}

#[actix_web::test]
async fn test_categories_route() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/skills/categories").to_request();
    let body: CategoriesResponse = test::call_and_read_body_json(&app, req).await;

    assert!(body.categories["Programming"].contains(&"React".to_string()));
}

#[tokio::test]
async fn test_store_client_lists_profiles() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", DOCUMENTS_PATH)
        .match_query(mockito::Matcher::Any)
        .match_header("x-appwrite-key", "test_key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "total": 3,
                "documents": [
                    { "id": "u1", "displayName": "Asha", "offeredSkills": ["Python"] },
                    { "$id": "doc2", "data": { "id": "u2", "displayName": "Ben" } },
                    { "displayName": "Broken, no id" }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = store_client(server.url());
    let profiles = client.list_profiles().await.unwrap();

    mock.assert_async().await;
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[1].display_name, "Ben");
}

#[tokio::test]
async fn test_store_client_errors() {
    let mut server = mockito::Server::new_async().await;
    let _unauthorized = server
        .mock("GET", DOCUMENTS_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let client = store_client(server.url());

    assert!(matches!(client.list_profiles().await, Err(ProfileStoreError::Unauthorized)));
}

#[tokio::test]
async fn test_store_client_get_profile_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _empty = server
        .mock("GET", DOCUMENTS_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"total": 0, "documents": []}"#)
        .create_async()
        .await;

    let client = store_client(server.url());

    assert!(matches!(client.get_profile("ghost").await, Err(ProfileStoreError::NotFound(_))));
}

#[tokio::test]
async fn test_remote_source_caches_snapshot() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", DOCUMENTS_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"total": 1, "documents": [{"id": "u1", "displayName": "Asha"}]}"#)
        .expect(2)
        .create_async()
        .await;

    let source = ProfileSource::Remote {
        store: store_client(server.url()),
        cache: SnapshotCache::new(300),
    };

    assert_eq!(source.snapshot().await.unwrap().len(), 1);
    assert_eq!(source.snapshot().await.unwrap().len(), 1);

    source.refresh().await;
    assert_eq!(source.snapshot().await.unwrap().len(), 1);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_store_paging_stops_at_total() {
    let mut server = mockito::Server::new_async().await;
    // Store ignores offset and always returns a full page
    let mock = server
        .mock("GET", DOCUMENTS_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(full_page(Some(4)))
        .expect(2)
        .create_async()
        .await;

    let client = paged_store_client(server.url(), 2);
    let profiles = client.list_profiles().await.unwrap();

    mock.assert_async().await;
    assert_eq!(profiles.len(), 4);
}

#[tokio::test]
async fn test_store_paging_stops_at_page_limit() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", DOCUMENTS_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(full_page(None))
        .expect(3)
        .create_async()
        .await;

    let client = paged_store_client(server.url(), 2).with_max_pages(3);
    let profiles = client.list_profiles().await.unwrap();

    mock.assert_async().await;
    assert_eq!(profiles.len(), 6);
}

#[actix_web::test]
async fn test_refresh_route_static_source() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post().uri("/api/v1/profiles/refresh").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["refreshed"], json!(false));
}

#[actix_web::test]
async fn test_refresh_route_refetches_store() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", DOCUMENTS_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"total": 1, "documents": [{"id": "u1", "displayName": "Asha"}]}"#)
        .expect(2)
        .create_async()
        .await;

    let state = AppState {
        profiles: Arc::new(ProfileSource::Remote {
            store: store_client(server.url()),
            cache: SnapshotCache::new(300),
        }),
        ..create_state()
    };
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    for _ in 0..2 {
        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.profiles, 1);
    }

    let req = test::TestRequest::post().uri("/api/v1/profiles/refresh").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["refreshed"], json!(true));

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.profiles, 1);

    mock.assert_async().await;
}
