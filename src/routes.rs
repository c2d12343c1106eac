use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::handlers::auth_handlers::{list_users_handler, login_handler, register_handler};
use crate::handlers::category_handlers::{
    create_category_handler, delete_category_handler, list_categories_handler,
};
use crate::handlers::expense_handlers::{
    create_expense_handler, delete_expense_handler, list_active_expenses_handler,
    list_deleted_expenses_handler,
};
use crate::middleware::auth_middleware::auth_middleware;
use crate::state::AppState;

/// Assemble the full application router: registration and login are public,
/// everything else sits behind the bearer-token middleware
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/users", get(list_users_handler))
        .route(
            "/categories",
            post(create_category_handler).get(list_categories_handler),
        )
        .route("/categories/{id}", delete(delete_category_handler))
        .route(
            "/expenses",
            post(create_expense_handler).get(list_active_expenses_handler),
        )
        .route("/expenses/deleted", get(list_deleted_expenses_handler))
        .route("/expenses/{id}", delete(delete_expense_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .merge(protected)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
