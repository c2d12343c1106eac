use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::handlers::ErrorResponse;
use crate::models::expense::{
    CreateExpenseRequest, DeleteExpenseResponse, ExpenseResponse, ExpenseStatus,
};
use crate::services::expense_service::{ExpenseError, ExpenseService};

/// Convert ExpenseError to an HTTP response
impl IntoResponse for ExpenseError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ExpenseError::CategoryNotFound => {
                (StatusCode::BAD_REQUEST, "Category not found".to_string())
            }
            ExpenseError::InvalidDate => (
                StatusCode::BAD_REQUEST,
                "Invalid date format, expected YYYY-MM-DD".to_string(),
            ),
            ExpenseError::ExpenseNotFound => {
                (StatusCode::NOT_FOUND, "Expense not found".to_string())
            }
            ExpenseError::DatabaseError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Handler for creating an expense
///
/// Creates a new expense referencing an existing category and returns it
/// with the category's image URL denormalized in.
#[utoipa::path(
    post,
    path = "/expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense successfully created", body = ExpenseResponse),
        (status = 400, description = "Unknown category or malformed date", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "expenses"
)]
pub async fn create_expense_handler(
    State(expense_service): State<Arc<dyn ExpenseService>>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseResponse>), Response> {
    match expense_service.create_expense(request).await {
        Ok(record) => Ok((StatusCode::CREATED, Json(record.into()))),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for listing active expenses
#[utoipa::path(
    get,
    path = "/expenses",
    responses(
        (status = 200, description = "List of active expenses", body = Vec<ExpenseResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "expenses"
)]
pub async fn list_active_expenses_handler(
    State(expense_service): State<Arc<dyn ExpenseService>>,
) -> Result<Json<Vec<ExpenseResponse>>, Response> {
    list_expenses(expense_service, ExpenseStatus::Active).await
}

/// Handler for listing soft-deleted expenses
#[utoipa::path(
    get,
    path = "/expenses/deleted",
    responses(
        (status = 200, description = "List of deleted expenses", body = Vec<ExpenseResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "expenses"
)]
pub async fn list_deleted_expenses_handler(
    State(expense_service): State<Arc<dyn ExpenseService>>,
) -> Result<Json<Vec<ExpenseResponse>>, Response> {
    list_expenses(expense_service, ExpenseStatus::Deleted).await
}

async fn list_expenses(
    expense_service: Arc<dyn ExpenseService>,
    status: ExpenseStatus,
) -> Result<Json<Vec<ExpenseResponse>>, Response> {
    match expense_service.list_expenses(status).await {
        Ok(records) => Ok(Json(records.into_iter().map(Into::into).collect())),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for deleting an expense
///
/// Marks the expense deleted and returns its snapshot; the row stays in the
/// store and moves to the deleted listing.
#[utoipa::path(
    delete,
    path = "/expenses/{id}",
    params(
        ("id" = i64, Path, description = "Expense ID")
    ),
    responses(
        (status = 200, description = "Expense deleted", body = DeleteExpenseResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "expenses"
)]
pub async fn delete_expense_handler(
    State(expense_service): State<Arc<dyn ExpenseService>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteExpenseResponse>, Response> {
    match expense_service.delete_expense(id).await {
        Ok(expense) => Ok(Json(DeleteExpenseResponse {
            message: "Expense deleted successfully".to_string(),
            expense: expense.into(),
        })),
        Err(e) => Err(e.into_response()),
    }
}
