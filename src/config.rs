//! Application configuration from environment variables.
//!
//! Configuration is loaded once at startup with `Config::from_env()` (after
//! `dotenvy::dotenv()`) and handed by injection to the services that need
//! it; nothing reads the environment after boot.

use crate::auth::jwt::{JwtConfig, JwtError};
use crate::db::pool::{DbConfig, DbError};

/// Default listen address when BIND_ADDR is not set
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Jwt(#[from] JwtError),
}

/// Application configuration assembled at process startup
#[derive(Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Database connection settings
    pub db: DbConfig,
    /// Token signing settings
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Requires DATABASE_URL and JWT_SECRET; BIND_ADDR, JWT_EXPIRATION_HOURS
    /// and JWT_ISSUER are optional overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            bind_addr,
            db: DbConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
        })
    }
}
