use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::models::user::{RegisterRequest, User, UserSummary};

/// Repository errors for database operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Resource not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Trait defining user repository operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(
        &self,
        user: RegisterRequest,
        password_hash: String,
    ) -> Result<User, RepositoryError>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// List every user as an id + username projection
    async fn list_all(&self) -> Result<Vec<UserSummary>, RepositoryError>;
}

/// SQLite implementation of UserRepository
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(
        &self,
        user: RegisterRequest,
        password_hash: String,
    ) -> Result<User, RepositoryError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, username, password_hash)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, username, password_hash
            "#,
        )
        .bind(&user.name)
        .bind(&user.username)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) => {
                // UNIQUE constraint on users.username
                if db_err.is_unique_violation() {
                    Err(RepositoryError::ConstraintViolation(
                        "Username already exists".to_string(),
                    ))
                } else {
                    Err(RepositoryError::DatabaseError(db_err.to_string()))
                }
            }
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, username, password_hash
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }

    async fn list_all(&self) -> Result<Vec<UserSummary>, RepositoryError> {
        let result = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT id, username
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await;

        match result {
            Ok(users) => Ok(users),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }
}
