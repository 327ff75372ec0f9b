//! User repository for database operations
//!
//! Credential storage with bcrypt password hashing. Email and username
//! uniqueness is enforced here (and by UNIQUE constraints in the schema).

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Role, User};

/// Cost factor for bcrypt hashing (12 is recommended for production)
const BCRYPT_COST: u32 = 12;

/// User repository error types
#[derive(Debug, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User not found")]
    NotFound,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Username already exists")]
    UsernameAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Hash a password using bcrypt with automatic salt generation
    pub fn hash_password(password: &str) -> Result<String, UserRepositoryError> {
        bcrypt::hash(password, BCRYPT_COST)
            .map_err(|e| UserRepositoryError::HashingError(e.to_string()))
    }

    /// Verify a password against a bcrypt hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, UserRepositoryError> {
        bcrypt::verify(password, hash).map_err(|e| UserRepositoryError::HashingError(e.to_string()))
    }

    /// Create a new user with a plain text password (will be hashed)
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<User, UserRepositoryError> {
        // Check if email already exists
        if self.find_by_email(email).await?.is_some() {
            return Err(UserRepositoryError::EmailAlreadyExists);
        }

        // Check if username already exists
        if self.find_by_username(username).await?.is_some() {
            return Err(UserRepositoryError::UsernameAlreadyExists);
        }

        let password_hash = Self::hash_password(password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, role, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(&password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by username
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Authenticate a user by email and password
    ///
    /// Returns the user if credentials are valid, None on unknown email or
    /// password mismatch (no distinction is surfaced to the caller).
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let user = match self.find_by_email(email).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        let is_valid = Self::verify_password(password, &user.password_hash)?;

        if is_valid { Ok(Some(user)) } else { Ok(None) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Password Hashing Tests (don't require database)
    // ========================================================================

    #[test]
    fn test_hash_password_produces_valid_bcrypt_hash() {
        let password = "my_secure_password123!";
        let hash = UserRepository::hash_password(password).unwrap();

        // Bcrypt hashes start with $2b$ (or $2a$, $2y$)
        assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$") || hash.starts_with("$2y$"));
        assert_eq!(hash.len(), 60);
    }

    #[test]
    fn test_hash_password_produces_different_hashes_for_same_password() {
        let password = "same_password";
        let hash1 = UserRepository::hash_password(password).unwrap();
        let hash2 = UserRepository::hash_password(password).unwrap();

        // Due to random salt, hashes should be different
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let password = "correct_password";
        let hash = UserRepository::hash_password(password).unwrap();

        let is_valid = UserRepository::verify_password(password, &hash).unwrap();
        assert!(is_valid);
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = UserRepository::hash_password("correct_password").unwrap();

        let is_valid = UserRepository::verify_password("wrong_password", &hash).unwrap();
        assert!(!is_valid);
    }

    #[test]
    fn test_verify_password_invalid_hash_format() {
        let result = UserRepository::verify_password("password", "not_a_valid_hash");
        assert!(result.is_err());
    }

    #[test]
    fn test_user_repository_error_display() {
        assert_eq!(format!("{}", UserRepositoryError::NotFound), "User not found");
        assert_eq!(
            format!("{}", UserRepositoryError::EmailAlreadyExists),
            "Email already exists"
        );
        assert_eq!(
            format!("{}", UserRepositoryError::UsernameAlreadyExists),
            "Username already exists"
        );
    }

    // ========================================================================
    // Integration Tests (require database)
    // ========================================================================

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_create_and_authenticate_user() {
        let repo = UserRepository::new(create_test_pool().await);

        let unique = Uuid::new_v4().to_string();
        let email = format!("auth_{}@example.com", &unique[..8]);
        let username = format!("auth_user_{}", &unique[..8]);

        let created = repo
            .create(&username, &email, "secure_password123", Role::User)
            .await
            .unwrap();

        assert_eq!(created.email, email);
        assert_eq!(created.role, Role::User);
        // Password is stored hashed, never verbatim
        assert_ne!(created.password_hash, "secure_password123");
        assert!(created.password_hash.starts_with("$2"));

        let result = repo.authenticate(&email, "secure_password123").await.unwrap();
        assert!(result.is_some());
        assert_eq!(result.unwrap().id, created.id);

        let result = repo.authenticate(&email, "wrong_password").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_create_user_duplicate_email_leaves_record_unchanged() {
        let repo = UserRepository::new(create_test_pool().await);

        let unique = Uuid::new_v4().to_string();
        let email = format!("dup_{}@example.com", &unique[..8]);
        let original_username = format!("dup_user1_{}", &unique[..8]);

        repo.create(&original_username, &email, "Password123", Role::User)
            .await
            .unwrap();

        let result = repo
            .create(
                &format!("dup_user2_{}", &unique[..8]),
                &email,
                "Password456",
                Role::Admin,
            )
            .await;

        assert!(matches!(result, Err(UserRepositoryError::EmailAlreadyExists)));

        // The existing record is untouched
        let existing = repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(existing.username, original_username);
        assert_eq!(existing.role, Role::User);
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_find_by_id_not_found() {
        let repo = UserRepository::new(create_test_pool().await);

        let found = repo.find_by_id(Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_create_admin_keeps_role() {
        let repo = UserRepository::new(create_test_pool().await);

        let unique = Uuid::new_v4().to_string();
        let created = repo
            .create(
                &format!("admin_{}", &unique[..8]),
                &format!("admin_{}@example.com", &unique[..8]),
                "Password123",
                Role::Admin,
            )
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.role, Role::Admin);
    }

    // Helper function to create test pool
    async fn create_test_pool() -> PgPool {
        use crate::db::pool::{DbConfig, create_pool_with_migrations};

        let config = DbConfig::from_env().expect("DATABASE_URL must be set for tests");
        create_pool_with_migrations(&config)
            .await
            .expect("Failed to create test pool")
    }
}
