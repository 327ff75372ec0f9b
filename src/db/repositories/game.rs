//! Game repository for database operations
//!
//! Identifier-keyed CRUD over the games collection. Updates are partial:
//! only supplied fields change (COALESCE update).

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{CreateGame, Game, UpdateGame};

/// Game repository error types
#[derive(Debug, thiserror::Error)]
pub enum GameRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Game repository for database operations
#[derive(Clone)]
pub struct GameRepository {
    pool: PgPool,
}

impl GameRepository {
    /// Create a new game repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all games (no guaranteed order)
    pub async fn list_all(&self) -> Result<Vec<Game>, GameRepositoryError> {
        let games = sqlx::query_as::<_, Game>(
            r#"
            SELECT id, title, description, genre, image, video, rating,
                   game_type, download_link, created_at, updated_at
            FROM games
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(games)
    }

    /// Find a game by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Game>, GameRepositoryError> {
        let game = sqlx::query_as::<_, Game>(
            r#"
            SELECT id, title, description, genre, image, video, rating,
                   game_type, download_link, created_at, updated_at
            FROM games
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(game)
    }

    /// Create a new game; the store assigns id and timestamps
    pub async fn create(&self, dto: &CreateGame) -> Result<Game, GameRepositoryError> {
        let game = sqlx::query_as::<_, Game>(
            r#"
            INSERT INTO games (title, description, genre, image, video, rating,
                               game_type, download_link)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, description, genre, image, video, rating,
                      game_type, download_link, created_at, updated_at
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.genre)
        .bind(&dto.image)
        .bind(&dto.video)
        .bind(dto.rating)
        .bind(&dto.game_type)
        .bind(&dto.download_link)
        .fetch_one(&self.pool)
        .await?;

        Ok(game)
    }

    /// Partially update a game; returns None when the id does not exist
    pub async fn update(
        &self,
        id: Uuid,
        updates: &UpdateGame,
    ) -> Result<Option<Game>, GameRepositoryError> {
        let game = sqlx::query_as::<_, Game>(
            r#"
            UPDATE games
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                genre = COALESCE($4, genre),
                image = COALESCE($5, image),
                video = COALESCE($6, video),
                rating = COALESCE($7, rating),
                game_type = COALESCE($8, game_type),
                download_link = COALESCE($9, download_link),
                updated_at = now()
            WHERE id = $1
            RETURNING id, title, description, genre, image, video, rating,
                      game_type, download_link, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&updates.title)
        .bind(&updates.description)
        .bind(&updates.genre)
        .bind(&updates.image)
        .bind(&updates.video)
        .bind(updates.rating)
        .bind(&updates.game_type)
        .bind(&updates.download_link)
        .fetch_optional(&self.pool)
        .await?;

        Ok(game)
    }

    /// Delete a game by ID; true iff a record was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool, GameRepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM games
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
