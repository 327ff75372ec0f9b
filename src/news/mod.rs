//! News module for gamevault
//!
//! REST API endpoints for news articles: public listing (newest first) and
//! lookup, admin-gated create, update, and delete.

pub mod api;

pub use api::{NewsApiState, news_api_router};
