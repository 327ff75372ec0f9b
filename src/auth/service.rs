//! Authentication service
//!
//! Business logic for user registration and login. Coordinates between the
//! user repository and the JWT service. There is no session state: a login
//! yields a self-contained token and nothing else is recorded.

use crate::auth::jwt::{JwtError, JwtService};
use crate::db::models::{Role, UserResponse};
use crate::db::repositories::{UserRepository, UserRepositoryError};

/// Authentication service error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Username already exists")]
    UsernameAlreadyExists,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<UserRepositoryError> for AuthError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::NotFound => AuthError::UserNotFound,
            UserRepositoryError::EmailAlreadyExists => AuthError::EmailAlreadyExists,
            UserRepositoryError::UsernameAlreadyExists => AuthError::UsernameAlreadyExists,
            _ => AuthError::InternalError(err.to_string()),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::TokenExpired,
            JwtError::InvalidToken => AuthError::InvalidToken,
            _ => AuthError::InternalError(err.to_string()),
        }
    }
}

/// Registration request data
///
/// Fields are optional at the serde level so that missing ones can be
/// reported by name instead of failing deserialization.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Login request data
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// The slice of account data returned alongside a fresh token
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionUser {
    pub username: String,
    pub role: Role,
}

/// Login response: the signed token plus the identity it asserts
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: i64,
    pub user: SessionUser,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_service: JwtService,
}

/// Collect a required field, recording its name when missing or blank
fn required_field(
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

impl AuthService {
    /// Create a new authentication service
    pub fn new(user_repo: UserRepository, jwt_service: JwtService) -> Self {
        Self {
            user_repo,
            jwt_service,
        }
    }

    /// Register a new user
    ///
    /// The role defaults to `user`; the request may ask for `admin`.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse, AuthError> {
        let mut missing = Vec::new();
        let username = required_field(request.username, "username", &mut missing);
        let email = required_field(request.email, "email", &mut missing);
        let password = required_field(request.password, "password", &mut missing);

        if !missing.is_empty() {
            return Err(AuthError::MissingFields(missing));
        }

        let role = request.role.unwrap_or_default();

        let user = self
            .user_repo
            .create(&username, &email, &password, role)
            .await?;

        Ok(user.into())
    }

    /// Login an existing user, issuing a fresh token
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let mut missing = Vec::new();
        let email = required_field(request.email, "email", &mut missing);
        let password = required_field(request.password, "password", &mut missing);

        if !missing.is_empty() {
            return Err(AuthError::MissingFields(missing));
        }

        let user = self
            .user_repo
            .authenticate(&email, &password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let (token, expires_at) = self.jwt_service.issue(user.id, user.role)?;

        Ok(LoginResponse {
            token,
            expires_at,
            user: SessionUser {
                username: user.username,
                role: user.role,
            },
        })
    }

    /// Get current user from a token
    pub async fn current_user(&self, token: &str) -> Result<UserResponse, AuthError> {
        let claims = self.jwt_service.verify(token)?;

        let user_id = claims.user_id()?;
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Required Field Tests
    // ========================================================================

    #[test]
    fn test_required_field_present() {
        let mut missing = Vec::new();
        let value = required_field(Some("hello".to_string()), "field", &mut missing);

        assert_eq!(value, "hello");
        assert!(missing.is_empty());
    }

    #[test]
    fn test_required_field_trims_whitespace() {
        let mut missing = Vec::new();
        let value = required_field(Some("  padded  ".to_string()), "field", &mut missing);

        assert_eq!(value, "padded");
        assert!(missing.is_empty());
    }

    #[test]
    fn test_required_field_missing() {
        let mut missing = Vec::new();
        required_field(None, "email", &mut missing);

        assert_eq!(missing, vec!["email"]);
    }

    #[test]
    fn test_required_field_blank_counts_as_missing() {
        let mut missing = Vec::new();
        required_field(Some("   ".to_string()), "password", &mut missing);

        assert_eq!(missing, vec!["password"]);
    }

    #[test]
    fn test_missing_fields_error_lists_names() {
        let err = AuthError::MissingFields(vec!["username", "password"]);

        assert_eq!(
            err.to_string(),
            "Missing required fields: username, password"
        );
    }

    // ========================================================================
    // Error Conversion Tests
    // ========================================================================

    #[test]
    fn test_auth_error_from_user_repository_error() {
        let err: AuthError = UserRepositoryError::EmailAlreadyExists.into();
        assert!(matches!(err, AuthError::EmailAlreadyExists));

        let err: AuthError = UserRepositoryError::UsernameAlreadyExists.into();
        assert!(matches!(err, AuthError::UsernameAlreadyExists));

        let err: AuthError = UserRepositoryError::NotFound.into();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[test]
    fn test_auth_error_from_jwt_error() {
        let err: AuthError = JwtError::Expired.into();
        assert!(matches!(err, AuthError::TokenExpired));

        let err: AuthError = JwtError::InvalidToken.into();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    // ========================================================================
    // Request/Response Serialization Tests
    // ========================================================================

    #[test]
    fn test_register_request_deserialization() {
        let json = r#"{
            "username": "player_one",
            "email": "player@example.com",
            "password": "Password123"
        }"#;

        let request: RegisterRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.username.as_deref(), Some("player_one"));
        assert_eq!(request.email.as_deref(), Some("player@example.com"));
        assert!(request.role.is_none());
    }

    #[test]
    fn test_register_request_with_role() {
        let json = r#"{
            "username": "ops",
            "email": "ops@example.com",
            "password": "Password123",
            "role": "admin"
        }"#;

        let request: RegisterRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.role, Some(Role::Admin));
    }

    #[test]
    fn test_register_request_rejects_unknown_fields() {
        let json = r#"{
            "username": "player_one",
            "email": "player@example.com",
            "password": "Password123",
            "is_superuser": true
        }"#;

        let result: Result<RegisterRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_login_request_deserialization() {
        let json = r#"{
            "email": "player@example.com",
            "password": "Password123"
        }"#;

        let request: LoginRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.email.as_deref(), Some("player@example.com"));
        assert_eq!(request.password.as_deref(), Some("Password123"));
    }

    #[test]
    fn test_login_response_serialization() {
        let response = LoginResponse {
            token: "signed.token.here".to_string(),
            expires_at: 1234567890,
            user: SessionUser {
                username: "player_one".to_string(),
                role: Role::User,
            },
        };

        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("signed.token.here"));
        assert!(json.contains(r#""username":"player_one""#));
        assert!(json.contains(r#""role":"user""#));
    }
}
