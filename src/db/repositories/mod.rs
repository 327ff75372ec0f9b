//! Database repositories for gamevault
//!
//! Repositories encapsulate data access logic and provide a clean API for
//! business logic to interact with the database.

pub mod game;
pub mod news;
pub mod user;

pub use game::{GameRepository, GameRepositoryError};
pub use news::{NewsRepository, NewsRepositoryError};
pub use user::{UserRepository, UserRepositoryError};
