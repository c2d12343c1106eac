use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category entity representing an expense classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_url: String,
}

/// Request payload for creating a category; description and image URL
/// default to empty strings when omitted
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "name": "Groceries",
    "description": "Food and household shopping",
    "image_url": "https://example.com/groceries.png"
}))]
pub struct CreateCategoryRequest {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image_url: String,
}

/// Response body for a category deletion, echoing the removed row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteCategoryResponse {
    pub message: String,
    pub category: Category,
}
