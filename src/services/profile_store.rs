use crate::models::SkillProfile;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on pages fetched for one snapshot
const DEFAULT_MAX_PAGES: usize = 200;

/// Errors that can occur when reading from the hosted profile store
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Read-only client for the hosted profile document store
///
/// Profiles live in one collection; each document is a `SkillProfile`,
/// either at the top level or under a `data` envelope.
pub struct ProfileStoreClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    collection: String,
    page_size: usize,
    max_pages: usize,
    client: Client,
}

/// One page of documents and the collection size the store reported
struct DocumentPage {
    documents: Vec<Value>,
    total: Option<usize>,
}

impl ProfileStoreClient {
    /// Create a new profile store client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collection: String,
        page_size: usize,
    ) -> Result<Self, ProfileStoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            collection,
            page_size: page_size.max(1),
            max_pages: DEFAULT_MAX_PAGES,
            client,
        })
    }

    /// Limit how many pages one `list_profiles` call may fetch
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collection
        )
    }

    async fn query_documents(&self, queries: &[String]) -> Result<DocumentPage, ProfileStoreError> {
        let queries_json = serde_json::to_string(queries)
            .map_err(|e| ProfileStoreError::InvalidResponse(e.to_string()))?;
        let url = format!("{}?query={}", self.documents_url(), urlencoding::encode(&queries_json));

        tracing::debug!("Querying profile store: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ProfileStoreError::Unauthorized);
            }
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::error!("Profile store query failed: {} - {}", status, body);
                return Err(ProfileStoreError::ApiError(format!(
                    "Failed to query profiles: {}",
                    status
                )));
            }
        }

        let mut json: Value = response.json().await?;

        let total = json.get("total").and_then(Value::as_u64).map(|t| t as usize);

        match json.get_mut("documents").map(Value::take) {
            Some(Value::Array(documents)) => Ok(DocumentPage { documents, total }),
            _ => Err(ProfileStoreError::InvalidResponse("Missing documents array".into())),
        }
    }

    /// Fetch every profile in the collection, one page at a time
    ///
    /// Paging stops at a short page, at the reported `total`, or after
    /// `max_pages` pages. Documents that do not parse as profiles are skipped.
    pub async fn list_profiles(&self) -> Result<Vec<SkillProfile>, ProfileStoreError> {
        let mut profiles = Vec::new();
        let mut offset = 0usize;

        for page in 1..=self.max_pages {
            let queries = vec![
                format!("limit({})", self.page_size),
                format!("offset({})", offset),
            ];
            let DocumentPage { documents, total } = self.query_documents(&queries).await?;
            let fetched = documents.len();

            profiles.extend(documents.into_iter().filter_map(parse_profile));
            offset += fetched;

            if fetched < self.page_size || total.map_or(false, |total| offset >= total) {
                break;
            }
            if page == self.max_pages {
                tracing::warn!(
                    "Stopped paging profile store after {} pages ({} documents)",
                    page,
                    offset
                );
            }
        }

        tracing::debug!("Fetched {} profiles from profile store", profiles.len());

        Ok(profiles)
    }

    /// Fetch a single profile by id
    pub async fn get_profile(&self, id: &str) -> Result<SkillProfile, ProfileStoreError> {
        let queries = vec![equal_query("id", id), "limit(1)".to_string()];
        let page = self.query_documents(&queries).await?;

        let doc = page
            .documents
            .into_iter()
            .next()
            .ok_or_else(|| ProfileStoreError::NotFound(format!("Profile not found: {}", id)))?;

        let data = unwrap_envelope(doc);
        serde_json::from_value(data)
            .map_err(|e| ProfileStoreError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }
}

/// `equal(attribute, value)` with both operands as JSON strings
fn equal_query(attribute: &str, value: &str) -> String {
    format!("equal({}, {})", Value::from(attribute), Value::from(value))
}

fn unwrap_envelope(mut doc: Value) -> Value {
    match doc.get_mut("data") {
        Some(data) if data.is_object() => data.take(),
        _ => doc,
    }
}

fn parse_profile(doc: Value) -> Option<SkillProfile> {
    match serde_json::from_value(unwrap_envelope(doc)) {
        Ok(profile) => Some(profile),
        Err(e) => {
            tracing::warn!("Skipping malformed profile document: {}", e);
            None
        }
    }
}
