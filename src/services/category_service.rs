use async_trait::async_trait;
use std::sync::Arc;

use crate::models::category::{Category, CreateCategoryRequest};
use crate::repositories::category_repository::{
    CategoryRepository, RepositoryError as CategoryRepositoryError,
};
use crate::repositories::expense_repository::ExpenseRepository;

/// Category service errors
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    #[error("Category not found")]
    CategoryNotFound,

    #[error("Category is in use and cannot be deleted")]
    CategoryInUse,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Trait defining category service operations
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// Create a new category; no uniqueness or non-empty-name checks apply
    async fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<Category, CategoryError>;

    /// Get all categories
    async fn list_categories(&self) -> Result<Vec<Category>, CategoryError>;

    /// Hard-delete a category; refused while any expense references it
    async fn delete_category(&self, id: i64) -> Result<Category, CategoryError>;
}

/// Implementation of CategoryService
pub struct CategoryServiceImpl {
    category_repository: Arc<dyn CategoryRepository>,
    expense_repository: Arc<dyn ExpenseRepository>,
}

impl CategoryServiceImpl {
    pub fn new(
        category_repository: Arc<dyn CategoryRepository>,
        expense_repository: Arc<dyn ExpenseRepository>,
    ) -> Self {
        Self {
            category_repository,
            expense_repository,
        }
    }
}

fn map_repository_error(e: CategoryRepositoryError) -> CategoryError {
    match e {
        CategoryRepositoryError::NotFound => CategoryError::CategoryNotFound,
        CategoryRepositoryError::DatabaseError(msg) => CategoryError::DatabaseError(msg),
        CategoryRepositoryError::ConstraintViolation(msg) => CategoryError::DatabaseError(msg),
    }
}

#[async_trait]
impl CategoryService for CategoryServiceImpl {
    async fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<Category, CategoryError> {
        self.category_repository
            .create(request)
            .await
            .map_err(map_repository_error)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CategoryError> {
        self.category_repository
            .list_all()
            .await
            .map_err(map_repository_error)
    }

    async fn delete_category(&self, id: i64) -> Result<Category, CategoryError> {
        // Soft-deleted expenses keep their category reference, so they block
        // deletion too
        let referenced = self
            .expense_repository
            .exists_for_category(id)
            .await
            .map_err(|e| CategoryError::DatabaseError(e.to_string()))?;
        if referenced {
            return Err(CategoryError::CategoryInUse);
        }

        self.category_repository
            .delete(id)
            .await
            .map_err(map_repository_error)?
            .ok_or(CategoryError::CategoryNotFound)
    }
}
