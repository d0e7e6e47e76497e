//! User model, cart entries and related types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::book::Book;
use crate::error::{AppError, AppResult};

/// Stored user with its cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub password: String,
    pub cart: Vec<CartEntry>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether the cart already holds an entry for this book
    pub fn has_book(&self, book_id: Uuid) -> bool {
        self.cart.iter().any(|entry| entry.book == book_id)
    }

    /// Drop every entry for this book and return how many were removed
    pub fn remove_book(&mut self, book_id: Uuid) -> usize {
        let before = self.cart.len();
        self.cart.retain(|entry| entry.book != book_id);
        before - self.cart.len()
    }
}

/// One book reference in a user's cart. Persisted inside the user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    /// Book id
    pub book: Uuid,
    pub due_date: DateTime<Utc>,
}

impl CartEntry {
    /// Entry for `book` borrowed at `now`, due after the book's loan duration.
    /// Fails when the due date falls outside the representable range.
    pub fn borrow(book: &Book, now: DateTime<Utc>) -> AppResult<Self> {
        let due_date = Duration::try_days(i64::from(book.max_days))
            .and_then(|loan| now.checked_add_signed(loan))
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Loan duration of book {} is out of range: {} days",
                    book.id, book.max_days
                ))
            })?;

        Ok(Self {
            book: book.id,
            due_date,
        })
    }
}

/// Cart entry with its book resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub book: Book,
    pub due_date: DateTime<Utc>,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    /// Number of entries in the cart
    pub cart_size: usize,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            cart_size: user.cart.len(),
        }
    }
}

/// Username and password, as submitted to register and login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct Credentials {
    #[validate(length(min = 1, max = 64, message = "Username must be 1 to 64 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl Credentials {
    /// Trim the username before validation
    pub fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self
    }
}
