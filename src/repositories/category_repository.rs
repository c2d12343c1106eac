use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::models::category::{Category, CreateCategoryRequest};

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

/// Trait defining category repository operations
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Create a new category
    async fn create(&self, category: CreateCategoryRequest) -> Result<Category, RepositoryError>;

    /// Find a category by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepositoryError>;

    /// List all categories
    async fn list_all(&self) -> Result<Vec<Category>, RepositoryError>;

    /// Hard-delete a category, returning the removed row if it existed
    async fn delete(&self, id: i64) -> Result<Option<Category>, RepositoryError>;
}

/// SQLite implementation of CategoryRepository
pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn create(&self, category: CreateCategoryRequest) -> Result<Category, RepositoryError> {
        let result = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, image_url)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, description, image_url
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.image_url)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(category) => Ok(category),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepositoryError> {
        let result = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, image_url
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(category) => Ok(category),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }

    async fn list_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let result = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, image_url
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await;

        match result {
            Ok(categories) => Ok(categories),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }

    async fn delete(&self, id: i64) -> Result<Option<Category>, RepositoryError> {
        let result = sqlx::query_as::<_, Category>(
            r#"
            DELETE FROM categories
            WHERE id = ?1
            RETURNING id, name, description, image_url
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(category) => Ok(category),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }
}
