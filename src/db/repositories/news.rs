//! News repository for database operations
//!
//! Identifier-keyed CRUD over news articles. Lists are returned newest
//! first. Updating an article refreshes its publication date.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{CreateNews, News, UpdateNews};

/// News repository error types
#[derive(Debug, thiserror::Error)]
pub enum NewsRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// News repository for database operations
#[derive(Clone)]
pub struct NewsRepository {
    pool: PgPool,
}

impl NewsRepository {
    /// Create a new news repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all news articles, newest first
    pub async fn list_all(&self) -> Result<Vec<News>, NewsRepositoryError> {
        let items = sqlx::query_as::<_, News>(
            r#"
            SELECT id, title, description, image, date, created_at, updated_at
            FROM news
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Find a news article by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<News>, NewsRepositoryError> {
        let item = sqlx::query_as::<_, News>(
            r#"
            SELECT id, title, description, image, date, created_at, updated_at
            FROM news
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Create a news article; publication date defaults to creation time
    pub async fn create(&self, dto: &CreateNews) -> Result<News, NewsRepositoryError> {
        let item = sqlx::query_as::<_, News>(
            r#"
            INSERT INTO news (title, description, image)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, image, date, created_at, updated_at
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Update a news article; unset fields keep their current value, the
    /// publication date is refreshed. Returns None when the id does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        updates: &UpdateNews,
    ) -> Result<Option<News>, NewsRepositoryError> {
        let item = sqlx::query_as::<_, News>(
            r#"
            UPDATE news
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                image = COALESCE($4, image),
                date = now(),
                updated_at = now()
            WHERE id = $1
            RETURNING id, title, description, image, date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&updates.title)
        .bind(&updates.description)
        .bind(&updates.image)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Delete a news article by ID; true iff a record was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool, NewsRepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM news
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
