//! Game catalog API endpoints
//!
//! Provides REST API endpoints for the games collection:
//! - GET /api/games - List all games (public)
//! - GET /api/games/:id - Get a game by ID (public)
//! - POST /api/games - Add a game (admin)
//! - PUT /api/games/:id - Update a game (admin)
//! - DELETE /api/games/:id - Delete a game (admin)

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
use crate::db::models::{CreateGame, Game, UpdateGame};
use crate::db::repositories::{GameRepository, GameRepositoryError};

/// Game API state containing the game repository and JWT service
#[derive(Clone)]
pub struct GameApiState {
    pub game_repo: GameRepository,
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

/// Game API error types
#[derive(Debug, thiserror::Error)]
pub enum GameApiError {
    #[error("Game not found")]
    NotFound,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<GameRepositoryError> for GameApiError {
    fn from(err: GameRepositoryError) -> Self {
        GameApiError::InternalError(err.to_string())
    }
}

impl IntoResponse for GameApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            GameApiError::NotFound => (StatusCode::NOT_FOUND, "GAME_NOT_FOUND"),
            GameApiError::MissingFields(_) => (StatusCode::BAD_REQUEST, "MISSING_FIELDS"),
            GameApiError::Guard(_) => {
                let GameApiError::Guard(guard_err) = self else {
                    unreachable!()
                };
                return guard_err.into_response();
            }
            GameApiError::InternalError(detail) => {
                // Store failures are logged, never surfaced to the client
                tracing::error!("Game API internal error: {}", detail);
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

/// Request for adding a game
///
/// Required fields are optional at the serde level so that missing ones can
/// be reported by name; unknown fields are rejected outright.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateGameRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
    pub rating: Option<f64>,
    #[serde(rename = "type")]
    pub game_type: Option<String>,
    pub download_link: Option<String>,
}

/// Request for updating a game; only supplied fields change
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct UpdateGameRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
    pub rating: Option<f64>,
    #[serde(rename = "type")]
    pub game_type: Option<String>,
    pub download_link: Option<String>,
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

/// Validate a creation request, listing every missing required field
fn validate_create(request: CreateGameRequest) -> Result<CreateGame, GameApiError> {
    let mut missing = Vec::new();

    let title = require_text(request.title, "title", &mut missing);
    let description = require_text(request.description, "description", &mut missing);
    let genre = require_text(request.genre, "genre", &mut missing);
    let game_type = require_text(request.game_type, "type", &mut missing);
    let download_link = require_text(request.download_link, "download_link", &mut missing);
    let rating = match request.rating {
        Some(r) => r,
        None => {
            missing.push("rating");
            0.0
        }
    };

    if !missing.is_empty() {
        return Err(GameApiError::MissingFields(missing));
    }

    Ok(CreateGame {
        title,
        description,
        genre,
        image: request.image,
        video: request.video,
        rating,
        game_type,
        download_link,
    })
}

// ============================================================================
// Router
// ============================================================================

/// Create the game API router
pub fn game_api_router(state: GameApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/games", get(list_games_handler))
        .route("/api/games", post(create_game_handler))
        .route("/api/games/{id}", get(get_game_handler))
        .route("/api/games/{id}", put(update_game_handler))
        .route("/api/games/{id}", delete(delete_game_handler))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/games
/// List all games
async fn list_games_handler(
    State(state): State<Arc<GameApiState>>,
) -> Result<Json<Vec<Game>>, GameApiError> {
    let games = state.game_repo.list_all().await?;

    Ok(Json(games))
}

/// GET /api/games/:id
/// Get a single game by ID
async fn get_game_handler(
    State(state): State<Arc<GameApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Game>, GameApiError> {
    let game = state
        .game_repo
        .find_by_id(id)
        .await?
        .ok_or(GameApiError::NotFound)?;

    Ok(Json(game))
}

/// POST /api/games
/// Add a game (admin only)
async fn create_game_handler(
    State(state): State<Arc<GameApiState>>,
    headers: HeaderMap,
    Json(request): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<Game>), GameApiError> {
    guard::require(&state.jwt_service, &headers, Capability::Admin)?;

    let create_dto = validate_create(request)?;

    tracing::info!("Adding game '{}'", create_dto.title);

    let game = state.game_repo.create(&create_dto).await?;

    tracing::info!("Game added: {}", game.id);

    Ok((StatusCode::CREATED, Json(game)))
}

/// PUT /api/games/:id
/// Update a game (admin only); only supplied fields change
async fn update_game_handler(
    State(state): State<Arc<GameApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateGameRequest>,
) -> Result<Json<Game>, GameApiError> {
    guard::require(&state.jwt_service, &headers, Capability::Admin)?;

    tracing::info!("Updating game {}", id);

    let updates = UpdateGame {
        title: request.title,
        description: request.description,
        genre: request.genre,
        image: request.image,
        video: request.video,
        rating: request.rating,
        game_type: request.game_type,
        download_link: request.download_link,
    };

    let game = state
        .game_repo
        .update(id, &updates)
        .await?
        .ok_or(GameApiError::NotFound)?;

    Ok(Json(game))
}

/// DELETE /api/games/:id
/// Delete a game (admin only); 204 with empty body on success
async fn delete_game_handler(
    State(state): State<Arc<GameApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, GameApiError> {
    guard::require(&state.jwt_service, &headers, Capability::Admin)?;

    tracing::info!("Deleting game {}", id);

    let deleted = state.game_repo.delete(id).await?;

    if !deleted {
        return Err(GameApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
