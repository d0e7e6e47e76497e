//! Error types for the lending server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message shown for every failure whose details must stay server-side
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Stable numeric codes returned in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    StorageFailure = 2,
    NoSuchUser = 3,
    NoSuchBook = 4,
    AlreadyInCart = 5,
    BookNotAvailable = 6,
    UserAlreadyExists = 7,
    BadCredentials = 8,
    BadValue = 9,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("User not found")]
    UserNotFound,

    #[error("Book not found")]
    BookNotFound,

    #[error("Book is already in your cart")]
    DuplicateInCart,

    #[error("Book is not available")]
    BookUnavailable,

    #[error("Username already exists")]
    DuplicateUser,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status and code sent to the client
    pub fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::UserNotFound => (StatusCode::UNAUTHORIZED, ErrorCode::NoSuchUser),
            AppError::BookNotFound => (StatusCode::NOT_FOUND, ErrorCode::NoSuchBook),
            AppError::DuplicateInCart => (StatusCode::CONFLICT, ErrorCode::AlreadyInCart),
            AppError::BookUnavailable => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::BookNotAvailable)
            }
            AppError::DuplicateUser => (StatusCode::CONFLICT, ErrorCode::UserAlreadyExists),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, ErrorCode::BadCredentials),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::StorageUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::StorageFailure)
            }
            AppError::Session(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure)
            }
        }
    }

    /// Message safe to show to the user. Storage, session and internal
    /// failures are logged and replaced by the generic message.
    pub fn user_message(&self) -> String {
        match self {
            AppError::StorageUnavailable(msg) => {
                tracing::error!("Storage error: {}", msg);
                GENERIC_ERROR_MESSAGE.to_string()
            }
            AppError::Session(msg) => {
                tracing::error!("Session error: {}", msg);
                GENERIC_ERROR_MESSAGE.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                GENERIC_ERROR_MESSAGE.to_string()
            }
            AppError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::StorageUnavailable(format!("{:?}", e))
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(e: tower_sessions::session::Error) -> Self {
        AppError::Session(e.to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(e: axum::extract::rejection::JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message: self.user_message(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
