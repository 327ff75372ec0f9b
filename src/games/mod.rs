//! Games module for gamevault
//!
//! REST API endpoints for the game catalog: public listing and lookup,
//! admin-gated create, update, and delete.

pub mod api;

pub use api::{GameApiState, game_api_router};
