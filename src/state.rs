use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::repositories::category_repository::{CategoryRepository, SqliteCategoryRepository};
use crate::repositories::expense_repository::{ExpenseRepository, SqliteExpenseRepository};
use crate::repositories::user_repository::SqliteUserRepository;
use crate::services::auth_service::{AuthService, AuthServiceImpl};
use crate::services::category_service::{CategoryService, CategoryServiceImpl};
use crate::services::expense_service::{ExpenseService, ExpenseServiceImpl};

/// Application context constructed once at startup and handed to every
/// handler through axum state extraction
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub category_service: Arc<dyn CategoryService>,
    pub expense_service: Arc<dyn ExpenseService>,
}

impl AppState {
    /// Wire repositories and services over a shared connection pool
    pub fn new(pool: SqlitePool, jwt_secret: String) -> Self {
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let category_repository: Arc<dyn CategoryRepository> =
            Arc::new(SqliteCategoryRepository::new(pool.clone()));
        let expense_repository: Arc<dyn ExpenseRepository> =
            Arc::new(SqliteExpenseRepository::new(pool));

        let auth_service: Arc<dyn AuthService> =
            Arc::new(AuthServiceImpl::new(user_repository, jwt_secret));
        let category_service: Arc<dyn CategoryService> = Arc::new(CategoryServiceImpl::new(
            category_repository.clone(),
            expense_repository.clone(),
        ));
        let expense_service: Arc<dyn ExpenseService> = Arc::new(ExpenseServiceImpl::new(
            expense_repository,
            category_repository,
        ));

        Self {
            auth_service,
            category_service,
            expense_service,
        }
    }
}

impl FromRef<AppState> for Arc<dyn AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<dyn CategoryService> {
    fn from_ref(state: &AppState) -> Self {
        state.category_service.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ExpenseService> {
    fn from_ref(state: &AppState) -> Self {
        state.expense_service.clone()
    }
}
