use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::models::expense::{
    CreateExpenseRequest, Expense, ExpenseStatus, ExpenseWithCategory, NewExpense,
};
use crate::repositories::category_repository::CategoryRepository;
use crate::repositories::expense_repository::{ExpenseRepository, RepositoryError};

/// Date format accepted by the expense creation endpoint
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Expense service errors
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    #[error("Category not found")]
    CategoryNotFound,

    #[error("Invalid date format, expected YYYY-MM-DD")]
    InvalidDate,

    #[error("Expense not found")]
    ExpenseNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Trait defining expense service operations
#[async_trait]
pub trait ExpenseService: Send + Sync {
    /// Create a new expense referencing an existing category
    async fn create_expense(
        &self,
        request: CreateExpenseRequest,
    ) -> Result<ExpenseWithCategory, ExpenseError>;

    /// List expenses in the given state, enriched with category image URLs
    async fn list_expenses(
        &self,
        status: ExpenseStatus,
    ) -> Result<Vec<ExpenseWithCategory>, ExpenseError>;

    /// Soft-delete an expense, returning the updated row
    async fn delete_expense(&self, id: i64) -> Result<Expense, ExpenseError>;
}

/// Implementation of ExpenseService
pub struct ExpenseServiceImpl {
    expense_repository: Arc<dyn ExpenseRepository>,
    category_repository: Arc<dyn CategoryRepository>,
}

impl ExpenseServiceImpl {
    pub fn new(
        expense_repository: Arc<dyn ExpenseRepository>,
        category_repository: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            expense_repository,
            category_repository,
        }
    }
}

fn map_repository_error(e: RepositoryError) -> ExpenseError {
    match e {
        RepositoryError::NotFound => ExpenseError::ExpenseNotFound,
        RepositoryError::DatabaseError(msg) => ExpenseError::DatabaseError(msg),
        RepositoryError::ConstraintViolation(msg) => ExpenseError::DatabaseError(msg),
    }
}

#[async_trait]
impl ExpenseService for ExpenseServiceImpl {
    async fn create_expense(
        &self,
        request: CreateExpenseRequest,
    ) -> Result<ExpenseWithCategory, ExpenseError> {
        let date = NaiveDate::parse_from_str(&request.date, DATE_FORMAT)
            .map_err(|_| ExpenseError::InvalidDate)?;

        // The referenced category must exist before anything is persisted
        let category = self
            .category_repository
            .find_by_id(request.category_id)
            .await
            .map_err(|e| ExpenseError::DatabaseError(e.to_string()))?
            .ok_or(ExpenseError::CategoryNotFound)?;

        let expense = self
            .expense_repository
            .create(NewExpense {
                amount: request.amount,
                category_id: request.category_id,
                description: request.description,
                date,
            })
            .await
            .map_err(map_repository_error)?;

        Ok(ExpenseWithCategory {
            expense,
            category_image_url: category.image_url,
        })
    }

    async fn list_expenses(
        &self,
        status: ExpenseStatus,
    ) -> Result<Vec<ExpenseWithCategory>, ExpenseError> {
        self.expense_repository
            .list_by_status(status)
            .await
            .map_err(map_repository_error)
    }

    async fn delete_expense(&self, id: i64) -> Result<Expense, ExpenseError> {
        self.expense_repository
            .mark_deleted(id)
            .await
            .map_err(map_repository_error)?
            .ok_or(ExpenseError::ExpenseNotFound)
    }
}
