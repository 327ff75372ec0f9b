//! Auth API endpoints
//!
//! Provides REST API endpoints for authentication:
//! - POST /api/auth/register - Register a new user
//! - POST /api/auth/login - Login and get a token
//! - GET /api/auth/me - Get current user info

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::guard::extract_bearer_token;
use crate::auth::{AuthError, AuthService, LoginRequest, LoginResponse, RegisterRequest};
use crate::db::models::UserResponse;

/// Auth API state containing the auth service
#[derive(Clone)]
pub struct AuthApiState {
    pub auth_service: AuthService,
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

/// Convert AuthError to API response
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::InvalidCredentials => (StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS"),
            AuthError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            AuthError::EmailAlreadyExists => (StatusCode::BAD_REQUEST, "EMAIL_EXISTS"),
            AuthError::UsernameAlreadyExists => (StatusCode::BAD_REQUEST, "USERNAME_EXISTS"),
            AuthError::MissingFields(_) => (StatusCode::BAD_REQUEST, "MISSING_FIELDS"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            AuthError::InternalError(detail) => {
                // Store failures are logged, never surfaced to the client
                tracing::error!("Auth internal error: {}", detail);
                let body = ApiError::new("Internal server error", "INTERNAL_ERROR");
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
            }
        };

        let body = ApiError::new(self.to_string(), code);

        (status, Json(body)).into_response()
    }
}

/// Response for successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
}

/// Create the auth API router
pub fn auth_api_router(state: AuthApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/me", get(me_handler))
        .with_state(state)
}

/// POST /api/auth/register
/// Register a new user
async fn register_handler(
    State(state): State<Arc<AuthApiState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    tracing::info!("Registration attempt for email: {:?}", request.email);

    let user = state.auth_service.register(request).await?;

    tracing::info!("User registered successfully: {}", user.email);

    Ok((StatusCode::CREATED, Json(RegisterResponse { user })))
}

/// POST /api/auth/login
/// Login and get a signed token
async fn login_handler(
    State(state): State<Arc<AuthApiState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    tracing::info!("Login attempt for email: {:?}", request.email);

    let response = state.auth_service.login(request).await?;

    tracing::info!("User logged in successfully: {}", response.user.username);

    Ok(Json(response))
}

/// GET /api/auth/me
/// Get current user info from the bearer token
async fn me_handler(
    State(state): State<Arc<AuthApiState>>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, AuthError> {
    let token = extract_bearer_token(&headers).map_err(|_| AuthError::InvalidToken)?;

    let user = state.auth_service.current_user(&token).await?;

    Ok(Json(user))
}
