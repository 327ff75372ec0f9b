//! Database models for gamevault
//!
//! This module defines the entity structs that map to PostgreSQL tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================================================
// User Model
// ============================================================================

/// Account role controlling access to mutating catalog operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// User without sensitive data (for API responses)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Game Model
// ============================================================================

/// Game entity in the catalog
///
/// `game_type` is serialized as `type` on the wire ("Single Player",
/// "Multiplayer", ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Game {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre: String,
    pub image: Option<String>,
    pub video: Option<String>,
    pub rating: f64,
    #[serde(rename = "type")]
    pub game_type: String,
    pub download_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Game data for creation (id and timestamps are store-assigned)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGame {
    pub title: String,
    pub description: String,
    pub genre: String,
    pub image: Option<String>,
    pub video: Option<String>,
    pub rating: f64,
    pub game_type: String,
    pub download_link: String,
}

/// Game data for partial updates; only supplied fields change
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateGame {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
    pub rating: Option<f64>,
    pub game_type: Option<String>,
    pub download_link: Option<String>,
}

// ============================================================================
// News Model
// ============================================================================

/// News article entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    /// Publication date; defaults to creation time, refreshed on update
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// News data for creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNews {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

/// News data for updates; unset fields keep their current value
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}
