use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::str::FromStr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use expense_manager::handlers::ErrorResponse;
use expense_manager::models::auth::{LoginRequest, LoginResponse};
use expense_manager::models::category::{Category, CreateCategoryRequest, DeleteCategoryResponse};
use expense_manager::models::expense::{
    CreateExpenseRequest, DeleteExpenseResponse, ExpenseResponse, ExpenseSnapshot,
};
use expense_manager::models::user::{RegisterRequest, RegisterResponse, UserSummary};
use expense_manager::routes;
use expense_manager::state::AppState;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        expense_manager::handlers::auth_handlers::register_handler,
        expense_manager::handlers::auth_handlers::login_handler,
        expense_manager::handlers::auth_handlers::list_users_handler,
        expense_manager::handlers::category_handlers::create_category_handler,
        expense_manager::handlers::category_handlers::list_categories_handler,
        expense_manager::handlers::category_handlers::delete_category_handler,
        expense_manager::handlers::expense_handlers::create_expense_handler,
        expense_manager::handlers::expense_handlers::list_active_expenses_handler,
        expense_manager::handlers::expense_handlers::list_deleted_expenses_handler,
        expense_manager::handlers::expense_handlers::delete_expense_handler,
    ),
    components(
        schemas(
            RegisterRequest, RegisterResponse, LoginRequest, LoginResponse, UserSummary,
            Category, CreateCategoryRequest, DeleteCategoryResponse,
            CreateExpenseRequest, ExpenseResponse, ExpenseSnapshot, DeleteExpenseResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and user listing"),
        (name = "categories", description = "Expense category endpoints"),
        (name = "expenses", description = "Expense record endpoints")
    ),
    info(
        title = "Expense Manager API",
        version = "0.1.0",
        description = "REST API for tracking personal expenses",
    )
)]
struct ApiDoc;

/// Registers the bearer scheme referenced by the protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("expense_manager=info,tower_http=info")),
        )
        .init();

    // Get configuration from environment
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:expense_manager.db".to_string());
    let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    // Create database connection pool
    let options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("connected to database");

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("migrations completed");

    let state = AppState::new(pool, jwt_secret);

    let app = routes::router(state)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
