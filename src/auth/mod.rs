//! Authentication module for gamevault
//!
//! This module provides authentication functionality including:
//! - JWT token issuance and verification
//! - User registration and login
//! - The request access guard (capability checks per route)
//! - REST API endpoints for auth operations

pub mod api;
pub mod guard;
pub mod jwt;
pub mod service;

pub use api::{AuthApiState, auth_api_router};
pub use guard::{Capability, CurrentUser, GuardError};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use service::{
    AuthError, AuthService, LoginRequest, LoginResponse, RegisterRequest, SessionUser,
};
