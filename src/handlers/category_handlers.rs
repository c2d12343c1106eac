use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::handlers::ErrorResponse;
use crate::models::category::{Category, CreateCategoryRequest, DeleteCategoryResponse};
use crate::services::category_service::{CategoryError, CategoryService};

/// Convert CategoryError to an HTTP response
impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            CategoryError::CategoryNotFound => {
                (StatusCode::NOT_FOUND, "Category not found".to_string())
            }
            CategoryError::CategoryInUse => (
                StatusCode::CONFLICT,
                "Category is in use and cannot be deleted".to_string(),
            ),
            CategoryError::DatabaseError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Handler for creating a category
///
/// Creates a new expense category; description and image URL default to
/// empty strings.
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category successfully created", body = Category),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "categories"
)]
pub async fn create_category_handler(
    State(category_service): State<Arc<dyn CategoryService>>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), Response> {
    match category_service.create_category(request).await {
        Ok(category) => Ok((StatusCode::CREATED, Json(category))),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for listing categories
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "List of categories", body = Vec<Category>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "categories"
)]
pub async fn list_categories_handler(
    State(category_service): State<Arc<dyn CategoryService>>,
) -> Result<Json<Vec<Category>>, Response> {
    match category_service.list_categories().await {
        Ok(categories) => Ok(Json(categories)),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for deleting a category
///
/// Hard-deletes the category and echoes the removed row. Deletion is
/// refused while any expense still references the category.
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted", body = DeleteCategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Category still referenced by expenses", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "categories"
)]
pub async fn delete_category_handler(
    State(category_service): State<Arc<dyn CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteCategoryResponse>, Response> {
    match category_service.delete_category(id).await {
        Ok(category) => Ok(Json(DeleteCategoryResponse {
            message: "Category deleted successfully".to_string(),
            category,
        })),
        Err(e) => Err(e.into_response()),
    }
}
