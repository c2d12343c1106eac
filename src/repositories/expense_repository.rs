use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::models::expense::{Expense, ExpenseStatus, ExpenseWithCategory, NewExpense};

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

/// Trait defining expense repository operations
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Insert a new expense row with status Active
    async fn create(&self, expense: NewExpense) -> Result<Expense, RepositoryError>;

    /// Find an expense by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Expense>, RepositoryError>;

    /// List expenses in the given state, each joined with its category's
    /// image URL
    async fn list_by_status(
        &self,
        status: ExpenseStatus,
    ) -> Result<Vec<ExpenseWithCategory>, RepositoryError>;

    /// Flip an expense to Deleted, returning the updated row if it existed
    async fn mark_deleted(&self, id: i64) -> Result<Option<Expense>, RepositoryError>;

    /// Whether any expense row (active or deleted) references the category
    async fn exists_for_category(&self, category_id: i64) -> Result<bool, RepositoryError>;
}

/// Raw expense row; amount is stored as TEXT because the sqlite driver has
/// no native decimal mapping
#[derive(Debug, sqlx::FromRow)]
struct ExpenseRow {
    id: i64,
    amount: String,
    category_id: i64,
    description: String,
    date: NaiveDate,
    is_deleted: bool,
}

impl ExpenseRow {
    fn into_expense(self) -> Result<Expense, RepositoryError> {
        let amount = self.amount.parse::<Decimal>().map_err(|e| {
            RepositoryError::DatabaseError(format!(
                "invalid amount stored for expense {}: {}",
                self.id, e
            ))
        })?;
        Ok(Expense {
            id: self.id,
            amount,
            category_id: self.category_id,
            description: self.description,
            date: self.date,
            status: ExpenseStatus::from_flag(self.is_deleted),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ExpenseWithCategoryRow {
    id: i64,
    amount: String,
    category_id: i64,
    description: String,
    date: NaiveDate,
    is_deleted: bool,
    category_image_url: String,
}

impl ExpenseWithCategoryRow {
    fn into_record(self) -> Result<ExpenseWithCategory, RepositoryError> {
        let row = ExpenseRow {
            id: self.id,
            amount: self.amount,
            category_id: self.category_id,
            description: self.description,
            date: self.date,
            is_deleted: self.is_deleted,
        };
        let category_image_url = self.category_image_url;
        Ok(ExpenseWithCategory {
            expense: row.into_expense()?,
            category_image_url,
        })
    }
}

/// SQLite implementation of ExpenseRepository
pub struct SqliteExpenseRepository {
    pool: SqlitePool,
}

impl SqliteExpenseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseRepository for SqliteExpenseRepository {
    async fn create(&self, expense: NewExpense) -> Result<Expense, RepositoryError> {
        let result = sqlx::query_as::<_, ExpenseRow>(
            r#"
            INSERT INTO expenses (amount, category_id, description, date, is_deleted)
            VALUES (?1, ?2, ?3, ?4, 0)
            RETURNING id, amount, category_id, description, date, is_deleted
            "#,
        )
        .bind(expense.amount.to_string())
        .bind(expense.category_id)
        .bind(&expense.description)
        .bind(expense.date)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => row.into_expense(),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Expense>, RepositoryError> {
        let result = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, amount, category_id, description, date, is_deleted
            FROM expenses
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(row)) => row.into_expense().map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }

    async fn list_by_status(
        &self,
        status: ExpenseStatus,
    ) -> Result<Vec<ExpenseWithCategory>, RepositoryError> {
        // LEFT JOIN so a dangling category reference degrades to an empty
        // image URL instead of dropping the row
        let result = sqlx::query_as::<_, ExpenseWithCategoryRow>(
            r#"
            SELECT e.id, e.amount, e.category_id, e.description, e.date, e.is_deleted,
                   COALESCE(c.image_url, '') AS category_image_url
            FROM expenses e
            LEFT JOIN categories c ON c.id = e.category_id
            WHERE e.is_deleted = ?1
            ORDER BY e.id
            "#,
        )
        .bind(status.is_deleted())
        .fetch_all(&self.pool)
        .await;

        match result {
            Ok(rows) => rows.into_iter().map(|row| row.into_record()).collect(),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }

    async fn mark_deleted(&self, id: i64) -> Result<Option<Expense>, RepositoryError> {
        let result = sqlx::query_as::<_, ExpenseRow>(
            r#"
            UPDATE expenses
            SET is_deleted = 1
            WHERE id = ?1
            RETURNING id, amount, category_id, description, date, is_deleted
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(row)) => row.into_expense().map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }

    async fn exists_for_category(&self, category_id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM expenses WHERE category_id = ?1)
            "#,
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(referenced) => Ok(referenced),
            Err(e) => Err(RepositoryError::DatabaseError(e.to_string())),
        }
    }
}
