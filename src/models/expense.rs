use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of an expense. The only transition is Active -> Deleted;
/// there is no restore operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    Active,
    Deleted,
}

impl ExpenseStatus {
    pub fn from_flag(is_deleted: bool) -> Self {
        if is_deleted {
            ExpenseStatus::Deleted
        } else {
            ExpenseStatus::Active
        }
    }

    pub fn is_deleted(self) -> bool {
        matches!(self, ExpenseStatus::Deleted)
    }
}

/// Expense entity representing a single expense record
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub amount: Decimal,
    pub category_id: i64,
    pub description: String,
    pub date: NaiveDate,
    pub status: ExpenseStatus,
}

/// Fields required to insert a new expense row
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub amount: Decimal,
    pub category_id: i64,
    pub description: String,
    pub date: NaiveDate,
}

/// Expense paired with the image URL of its category
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseWithCategory {
    pub expense: Expense,
    pub category_image_url: String,
}

/// Request payload for creating an expense; the date must be an ISO
/// calendar date (YYYY-MM-DD)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "amount": 42.50,
    "category_id": 1,
    "description": "Weekly shop",
    "date": "2024-01-15"
}))]
pub struct CreateExpenseRequest {
    pub amount: Decimal,

    pub category_id: i64,

    #[serde(default)]
    pub description: String,

    #[schema(format = "date", example = "2024-01-15")]
    pub date: String,
}

/// Expense as returned by the creation and listing endpoints, with the
/// category's image URL denormalized in
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpenseResponse {
    pub id: i64,
    pub amount: Decimal,
    pub category_id: i64,
    pub description: String,
    pub date: NaiveDate,
    pub category_image_url: String,
    pub is_deleted: bool,
}

impl From<ExpenseWithCategory> for ExpenseResponse {
    fn from(record: ExpenseWithCategory) -> Self {
        let ExpenseWithCategory {
            expense,
            category_image_url,
        } = record;
        Self {
            id: expense.id,
            amount: expense.amount,
            category_id: expense.category_id,
            description: expense.description,
            date: expense.date,
            category_image_url,
            is_deleted: expense.status.is_deleted(),
        }
    }
}

/// Expense snapshot without category enrichment, returned by the delete
/// endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpenseSnapshot {
    pub id: i64,
    pub amount: Decimal,
    pub category_id: i64,
    pub description: String,
    pub date: NaiveDate,
    pub is_deleted: bool,
}

impl From<Expense> for ExpenseSnapshot {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            amount: expense.amount,
            category_id: expense.category_id,
            description: expense.description,
            date: expense.date,
            is_deleted: expense.status.is_deleted(),
        }
    }
}

/// Response body for an expense deletion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteExpenseResponse {
    pub message: String,
    pub expense: ExpenseSnapshot,
}
