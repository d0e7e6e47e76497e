//! Authentication service: registration, login and password hashing

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Credentials, User},
    repository::Storage,
};

#[derive(Clone)]
pub struct AuthService {
    storage: Arc<dyn Storage>,
}

impl AuthService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Create an account with an empty cart.
    ///
    /// Fails with `DuplicateUser` when the username is taken; the existing
    /// record is left untouched.
    pub async fn register(&self, credentials: Credentials) -> AppResult<User> {
        let credentials = credentials.normalized();
        credentials.validate()?;

        if self
            .storage
            .find_user_by_username(&credentials.username)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateUser);
        }

        let hash = hash_password(&credentials.password)?;
        let user = self.storage.create_user(&credentials.username, &hash).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check credentials and return the stored user
    pub async fn login(&self, credentials: Credentials) -> AppResult<User> {
        let credentials = credentials.normalized();

        let user = self
            .storage
            .find_user_by_username(&credentials.username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&user, &credentials.password)? {
            tracing::debug!(username = %credentials.username, "Password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Re-read the session's user from storage
    pub async fn current_user(&self, user_id: Uuid) -> AppResult<User> {
        self.storage
            .find_user_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify user password
fn verify_password(user: &User, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockStorage;
    use chrono::Utc;

    fn stored_user(username: &str, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password: hash_password(password).unwrap(),
            cart: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_password() {
        let user = stored_user("alice", "hunter2");
        assert!(verify_password(&user, "hunter2").unwrap());
        assert!(!verify_password(&user, "hunter3").unwrap());
    }

    #[tokio::test]
    async fn test_register_duplicate_does_not_create() {
        let existing = stored_user("alice", "first");
        let mut storage = MockStorage::new();
        storage
            .expect_find_user_by_username()
            .returning(move |_| Ok(Some(existing.clone())));
        storage.expect_create_user().times(0);

        let service = AuthService::new(Arc::new(storage));
        let err = service.register(credentials("alice", "second")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateUser));
    }

    #[tokio::test]
    async fn test_register_stores_hash() {
        let mut storage = MockStorage::new();
        storage.expect_find_user_by_username().returning(|_| Ok(None));
        storage
            .expect_create_user()
            .withf(|username, hash| {
                username.to_string() == "bob" && hash.to_string() != "secret" && hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|username, hash| {
                Ok(User {
                    id: Uuid::new_v4(),
                    username: username.to_string(),
                    password: hash.to_string(),
                    cart: Vec::new(),
                    created_at: Utc::now(),
                })
            });

        let service = AuthService::new(Arc::new(storage));
        let user = service.register(credentials("  bob ", "secret")).await.unwrap();
        assert_eq!(user.username, "bob");
        assert!(user.cart.is_empty());
    }

    #[tokio::test]
    async fn test_register_rejects_empty_username() {
        let storage = MockStorage::new();
        let service = AuthService::new(Arc::new(storage));
        let err = service.register(credentials("", "secret")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut storage = MockStorage::new();
        storage.expect_find_user_by_username().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(storage));
        let err = service.login(credentials("ghost", "x")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = stored_user("alice", "right");
        let mut storage = MockStorage::new();
        storage
            .expect_find_user_by_username()
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(storage));
        let err = service.login(credentials("alice", "wrong")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_success() {
        let user = stored_user("alice", "right");
        let expected_id = user.id;
        let mut storage = MockStorage::new();
        storage
            .expect_find_user_by_username()
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(storage));
        let logged_in = service.login(credentials("alice", "right")).await.unwrap();
        assert_eq!(logged_in.id, expected_id);
    }
}
