pub mod auth;
pub mod category;
pub mod expense;
pub mod user;

pub use auth::{LoginRequest, LoginResponse};
pub use category::{Category, CreateCategoryRequest, DeleteCategoryResponse};
pub use expense::{
    CreateExpenseRequest, DeleteExpenseResponse, Expense, ExpenseResponse, ExpenseSnapshot,
    ExpenseStatus, ExpenseWithCategory, NewExpense,
};
pub use user::{RegisterRequest, RegisterResponse, User, UserSummary};
