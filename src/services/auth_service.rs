use async_trait::async_trait;
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::auth::{LoginRequest, LoginResponse};
use crate::models::user::{RegisterRequest, User, UserSummary};
use crate::repositories::user_repository::{RepositoryError, UserRepository};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    exp: i64,    // expiration timestamp
}

/// Authentication service errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Trait defining authentication and identity operations
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, request: RegisterRequest) -> Result<User, AuthError>;

    /// Authenticate a user and return a bearer token with the username
    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError>;

    /// Validate a JWT and return the user id it carries
    async fn validate_token(&self, token: &str) -> Result<i64, AuthError>;

    /// List every registered user
    async fn list_users(&self) -> Result<Vec<UserSummary>, AuthError>;
}

/// Implementation of AuthService
pub struct AuthServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    jwt_secret: String,
}

impl AuthServiceImpl {
    pub fn new(user_repository: Arc<dyn UserRepository>, jwt_secret: String) -> Self {
        Self {
            user_repository,
            jwt_secret,
        }
    }

    /// Hash a password using bcrypt
    fn hash_password(password: &str) -> Result<String, AuthError> {
        hash(password, DEFAULT_COST)
            .map_err(|e| AuthError::DatabaseError(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against a hash
    fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        verify(password, hash)
            .map_err(|e| AuthError::DatabaseError(format!("Password verification failed: {}", e)))
    }

    /// Generate a JWT for a user with a fixed 1-day expiry
    fn generate_jwt(&self, user_id: i64) -> Result<String, AuthError> {
        let expiration = Utc::now() + Duration::days(1);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiration.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::DatabaseError(format!("Token generation failed: {}", e)))
    }

    /// Decode and validate a JWT
    fn decode_jwt(&self, token: &str) -> Result<i64, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        token_data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken)
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        let password_hash = Self::hash_password(&request.password)?;

        let user = self
            .user_repository
            .create(request, password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::ConstraintViolation(_) => AuthError::DuplicateUsername,
                RepositoryError::DatabaseError(msg) => AuthError::DatabaseError(msg),
                RepositoryError::NotFound => {
                    AuthError::DatabaseError("Unexpected error".to_string())
                }
            })?;

        Ok(user)
    }

    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        // Lookup failure and hash mismatch produce the same error so the
        // response does not reveal whether the username exists
        let user = self
            .user_repository
            .find_by_username(&request.username)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        let is_valid = Self::verify_password(&request.password, &user.password_hash)?;
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.generate_jwt(user.id)?;

        Ok(LoginResponse {
            access_token,
            name: user.username,
        })
    }

    async fn validate_token(&self, token: &str) -> Result<i64, AuthError> {
        self.decode_jwt(token)
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, AuthError> {
        self.user_repository
            .list_all()
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    // Mock repository for testing
    struct MockUserRepository {
        users: Mutex<HashMap<String, User>>,
        next_id: AtomicI64,
    }

    impl MockUserRepository {
        fn new() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
                next_id: AtomicI64::new(1),
            }
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn create(
            &self,
            user: RegisterRequest,
            password_hash: String,
        ) -> Result<User, RepositoryError> {
            let mut users = self.users.lock().unwrap();

            if users.contains_key(&user.username) {
                return Err(RepositoryError::ConstraintViolation(
                    "Username already exists".to_string(),
                ));
            }

            let new_user = User {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                name: user.name,
                username: user.username.clone(),
                password_hash,
            };

            users.insert(new_user.username.clone(), new_user.clone());
            Ok(new_user)
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(username).cloned())
        }

        async fn list_all(&self) -> Result<Vec<UserSummary>, RepositoryError> {
            let users = self.users.lock().unwrap();
            let mut summaries: Vec<UserSummary> = users
                .values()
                .map(|u| UserSummary {
                    id: u.id,
                    username: u.username.clone(),
                })
                .collect();
            summaries.sort_by_key(|u| u.id);
            Ok(summaries)
        }
    }

    fn register_request(username: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Test User".to_string(),
            username: username.to_string(),
            password: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let repo = Arc::new(MockUserRepository::new());
        let service = AuthServiceImpl::new(repo, "test_secret".to_string());

        let result = service.register(register_request("testuser")).await;
        assert!(result.is_ok());

        let user = result.unwrap();
        assert_eq!(user.name, "Test User");
        assert_eq!(user.username, "testuser");
        assert_ne!(user.password_hash, "password123");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let repo = Arc::new(MockUserRepository::new());
        let service = AuthServiceImpl::new(repo, "test_secret".to_string());

        service.register(register_request("testuser")).await.unwrap();

        let result = service.register(register_request("testuser")).await;
        assert!(matches!(result, Err(AuthError::DuplicateUsername)));
    }

    #[tokio::test]
    async fn test_login_success_returns_token_and_username() {
        let repo = Arc::new(MockUserRepository::new());
        let service = AuthServiceImpl::new(repo, "test_secret".to_string());

        service.register(register_request("testuser")).await.unwrap();

        let result = service
            .login(LoginRequest {
                username: "testuser".to_string(),
                password: "password123".to_string(),
            })
            .await;
        assert!(result.is_ok());

        let response = result.unwrap();
        assert!(!response.access_token.is_empty());
        assert_eq!(response.name, "testuser");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let repo = Arc::new(MockUserRepository::new());
        let service = AuthServiceImpl::new(repo, "test_secret".to_string());

        service.register(register_request("testuser")).await.unwrap();

        let result = service
            .login(LoginRequest {
                username: "testuser".to_string(),
                password: "wrongpassword".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_username_same_error_as_wrong_password() {
        let repo = Arc::new(MockUserRepository::new());
        let service = AuthServiceImpl::new(repo, "test_secret".to_string());

        let result = service
            .login(LoginRequest {
                username: "nobody".to_string(),
                password: "password123".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_validate_token_returns_user_id() {
        let repo = Arc::new(MockUserRepository::new());
        let service = AuthServiceImpl::new(repo, "test_secret".to_string());

        let user = service.register(register_request("testuser")).await.unwrap();

        let response = service
            .login(LoginRequest {
                username: "testuser".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        // Token format sanity: JWT has 3 parts
        let parts: Vec<&str> = response.access_token.split('.').collect();
        assert_eq!(parts.len(), 3);

        let validated = service.validate_token(&response.access_token).await;
        assert_eq!(validated.unwrap(), user.id);
    }

    #[tokio::test]
    async fn test_validate_token_invalid() {
        let repo = Arc::new(MockUserRepository::new());
        let service = AuthServiceImpl::new(repo, "test_secret".to_string());

        for token in ["not.a.token", "invalid", "", "header.payload", "a.b.c.d"] {
            let result = service.validate_token(token).await;
            assert!(
                matches!(result, Err(AuthError::InvalidToken)),
                "token '{}' should be rejected",
                token
            );
        }
    }

    #[tokio::test]
    async fn test_token_signed_with_different_secret_is_invalid() {
        let repo = Arc::new(MockUserRepository::new());
        let service1 = AuthServiceImpl::new(repo.clone(), "secret1".to_string());
        let service2 = AuthServiceImpl::new(repo, "secret2".to_string());

        service1.register(register_request("testuser")).await.unwrap();

        let response = service1
            .login(LoginRequest {
                username: "testuser".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        let result = service2.validate_token(&response.access_token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_list_users_returns_summaries() {
        let repo = Arc::new(MockUserRepository::new());
        let service = AuthServiceImpl::new(repo, "test_secret".to_string());

        let user1 = service.register(register_request("alice")).await.unwrap();
        let user2 = service.register(register_request("bob")).await.unwrap();

        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.iter().any(|u| u.id == user1.id && u.username == "alice"));
        assert!(users.iter().any(|u| u.id == user2.id && u.username == "bob"));
    }
}
