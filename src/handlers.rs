pub mod auth_handlers;
pub mod category_handlers;
pub mod expense_handlers;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON error body shared by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
