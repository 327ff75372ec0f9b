//! Request access guard
//!
//! Two-stage gate applied before controller logic:
//! 1. Authentication: extract and verify the `Authorization: Bearer` token,
//!    yielding the caller's identity and role.
//! 2. Authorization: check the route's declared capability against the role.
//!
//! Every route declares one [`Capability`]; handlers call [`require`] before
//! touching the store.

use axum::{
    Json,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::jwt::{JwtError, JwtService};
use crate::db::models::Role;

/// Capability required by a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// No token required
    Public,
    /// Any valid token
    Authenticated,
    /// Valid token with the admin role
    Admin,
}

/// Identity attached to a request after authentication
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Guard failures
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("No token provided")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Admin only access")]
    Forbidden,
}

/// Guard error response body
#[derive(Debug, Serialize)]
struct GuardErrorBody {
    error: String,
    code: &'static str,
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            GuardError::MissingToken => (StatusCode::UNAUTHORIZED, "NO_TOKEN"),
            GuardError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            GuardError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            GuardError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        };

        let body = GuardErrorBody {
            error: self.to_string(),
            code,
        };

        (status, Json(body)).into_response()
    }
}

/// Check a request against the route's declared capability
///
/// Returns the authenticated identity when one was required, None for
/// public routes (the header is not inspected at all in that case).
pub fn require(
    jwt_service: &JwtService,
    headers: &HeaderMap,
    capability: Capability,
) -> Result<Option<CurrentUser>, GuardError> {
    match capability {
        Capability::Public => Ok(None),
        Capability::Authenticated => authenticate(jwt_service, headers).map(Some),
        Capability::Admin => {
            let user = authenticate(jwt_service, headers)?;
            if !user.is_admin() {
                return Err(GuardError::Forbidden);
            }
            Ok(Some(user))
        }
    }
}

/// Authentication stage: verify the bearer token and decode the identity
pub fn authenticate(
    jwt_service: &JwtService,
    headers: &HeaderMap,
) -> Result<CurrentUser, GuardError> {
    let token = extract_bearer_token(headers)?;

    let claims = jwt_service.verify(&token).map_err(|e| match e {
        JwtError::Expired => GuardError::TokenExpired,
        _ => GuardError::InvalidToken,
    })?;

    let user_id = claims.user_id().map_err(|_| GuardError::InvalidToken)?;

    Ok(CurrentUser {
        user_id,
        role: claims.role,
    })
}

/// Extract Bearer token from Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, GuardError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(GuardError::MissingToken)?;

    if !auth_header.starts_with("Bearer ") {
        return Err(GuardError::InvalidToken);
    }

    let token = auth_header.trim_start_matches("Bearer ").to_string();

    if token.is_empty() {
        return Err(GuardError::InvalidToken);
    }

    Ok(token)
}
