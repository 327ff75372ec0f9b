//! News API endpoints
//!
//! Provides REST API endpoints for news articles:
//! - GET /api/news - List all articles, newest first (public)
//! - GET /api/news/:id - Get an article by ID (public)
//! - POST /api/news - Publish an article (admin)
//! - PUT /api/news/:id - Update an article (admin)
//! - DELETE /api/news/:id - Delete an article (admin)

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::guard::{self, Capability, GuardError};
use crate::auth::jwt::JwtService;
use crate::db::models::{CreateNews, News, UpdateNews};
use crate::db::repositories::{NewsRepository, NewsRepositoryError};

/// News API state containing the news repository and JWT service
#[derive(Clone)]
pub struct NewsApiState {
    pub news_repo: NewsRepository,
    pub jwt_service: JwtService,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// News API error types
#[derive(Debug, thiserror::Error)]
pub enum NewsApiError {
    #[error("News not found")]
    NotFound,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<NewsRepositoryError> for NewsApiError {
    fn from(err: NewsRepositoryError) -> Self {
        NewsApiError::InternalError(err.to_string())
    }
}

impl IntoResponse for NewsApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            NewsApiError::NotFound => (StatusCode::NOT_FOUND, "NEWS_NOT_FOUND"),
            NewsApiError::MissingFields(_) => (StatusCode::BAD_REQUEST, "MISSING_FIELDS"),
            NewsApiError::Guard(_) => {
                let NewsApiError::Guard(guard_err) = self else {
                    unreachable!()
                };
                return guard_err.into_response();
            }
            NewsApiError::InternalError(detail) => {
                // Store failures are logged, never surfaced to the client
                tracing::error!("News API internal error: {}", detail);
                let body = ApiError::new("Internal server error", "INTERNAL_ERROR");
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
            }
        };

        let body = ApiError::new(self.to_string(), code);

        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request for publishing or updating an article
///
/// Title and description are required on both paths; they are optional at
/// the serde level so missing ones can be reported by name.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewsPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Collect a required text field, recording its name when missing or blank
fn require_text(
    value: Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

/// Validate an article payload; title and description must be present
fn validate_payload(payload: NewsPayload) -> Result<CreateNews, NewsApiError> {
    let mut missing = Vec::new();

    let title = require_text(payload.title, "title", &mut missing);
    let description = require_text(payload.description, "description", &mut missing);

    if !missing.is_empty() {
        return Err(NewsApiError::MissingFields(missing));
    }

    Ok(CreateNews {
        title,
        description,
        image: payload.image,
    })
}

// ============================================================================
// Router
// ============================================================================

/// Create the news API router
pub fn news_api_router(state: NewsApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/news", get(list_news_handler))
        .route("/api/news", post(create_news_handler))
        .route("/api/news/{id}", get(get_news_handler))
        .route("/api/news/{id}", put(update_news_handler))
        .route("/api/news/{id}", delete(delete_news_handler))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/news
/// List all articles, newest first
async fn list_news_handler(
    State(state): State<Arc<NewsApiState>>,
) -> Result<Json<Vec<News>>, NewsApiError> {
    let items = state.news_repo.list_all().await?;

    Ok(Json(items))
}

/// GET /api/news/:id
/// Get a single article by ID
async fn get_news_handler(
    State(state): State<Arc<NewsApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<News>, NewsApiError> {
    let item = state
        .news_repo
        .find_by_id(id)
        .await?
        .ok_or(NewsApiError::NotFound)?;

    Ok(Json(item))
}

/// POST /api/news
/// Publish an article (admin only)
async fn create_news_handler(
    State(state): State<Arc<NewsApiState>>,
    headers: HeaderMap,
    Json(payload): Json<NewsPayload>,
) -> Result<(StatusCode, Json<News>), NewsApiError> {
    guard::require(&state.jwt_service, &headers, Capability::Admin)?;

    let create_dto = validate_payload(payload)?;

    tracing::info!("Publishing article '{}'", create_dto.title);

    let item = state.news_repo.create(&create_dto).await?;

    tracing::info!("Article published: {}", item.id);

    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/news/:id
/// Update an article (admin only); refreshes the publication date
async fn update_news_handler(
    State(state): State<Arc<NewsApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewsPayload>,
) -> Result<Json<News>, NewsApiError> {
    guard::require(&state.jwt_service, &headers, Capability::Admin)?;

    let validated = validate_payload(payload)?;

    tracing::info!("Updating article {}", id);

    let updates = UpdateNews {
        title: Some(validated.title),
        description: Some(validated.description),
        image: validated.image,
    };

    let item = state
        .news_repo
        .update(id, &updates)
        .await?
        .ok_or(NewsApiError::NotFound)?;

    Ok(Json(item))
}

/// DELETE /api/news/:id
/// Delete an article (admin only); 204 with empty body on success
async fn delete_news_handler(
    State(state): State<Arc<NewsApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, NewsApiError> {
    guard::require(&state.jwt_service, &headers, Capability::Admin)?;

    tracing::info!("Deleting article {}", id);

    let deleted = state.news_repo.delete(id).await?;

    if !deleted {
        return Err(NewsApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_payload_accepts_full_payload() {
        let payload = NewsPayload {
            title: Some("Launch".to_string()),
            description: Some("We shipped".to_string()),
            image: Some("http://img".to_string()),
        };

        let create = validate_payload(payload).unwrap();

        assert_eq!(create.title, "Launch");
        assert_eq!(create.description, "We shipped");
        assert_eq!(create.image.as_deref(), Some("http://img"));
    }

    #[test]
    fn test_validate_payload_image_is_optional() {
        let payload = NewsPayload {
            title: Some("Launch".to_string()),
            description: Some("We shipped".to_string()),
            image: None,
        };

        let create = validate_payload(payload).unwrap();
        assert!(create.image.is_none());
    }

    #[test]
    fn test_validate_payload_lists_missing_fields() {
        let payload = NewsPayload {
            title: None,
            description: None,
            image: None,
        };

        let err = validate_payload(payload).unwrap_err();

        match err {
            NewsApiError::MissingFields(missing) => {
                assert_eq!(missing, vec!["title", "description"]);
            }
            other => panic!("Expected MissingFields, got: {:?}", other),
        }
    }

    #[test]
    fn test_validate_payload_blank_title_counts_as_missing() {
        let payload = NewsPayload {
            title: Some("".to_string()),
            description: Some("Body".to_string()),
            image: None,
        };

        let err = validate_payload(payload).unwrap_err();

        assert!(matches!(err, NewsApiError::MissingFields(ref m) if m == &vec!["title"]));
    }

    // ========================================================================
    // Request DTO Tests
    // ========================================================================

    #[test]
    fn test_news_payload_deserialization() {
        let json = r#"{"title": "Launch", "description": "We shipped"}"#;

        let payload: NewsPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.title.as_deref(), Some("Launch"));
        assert!(payload.image.is_none());
    }

    #[test]
    fn test_news_payload_rejects_unknown_fields() {
        let json = r#"{"title": "Launch", "description": "We shipped", "pinned": true}"#;

        let result: Result<NewsPayload, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    // ========================================================================
    // Error Mapping Tests
    // ========================================================================

    #[test]
    fn test_news_api_error_statuses() {
        assert_eq!(
            NewsApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            NewsApiError::MissingFields(vec!["title"])
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            NewsApiError::Guard(GuardError::TokenExpired)
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            NewsApiError::Guard(GuardError::Forbidden)
                .into_response()
                .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            NewsApiError::InternalError("pool exhausted".to_string())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_news_api_error_display() {
        assert_eq!(NewsApiError::NotFound.to_string(), "News not found");
        assert_eq!(
            NewsApiError::MissingFields(vec!["description"]).to_string(),
            "Missing required fields: description"
        );
    }
}
