//! Repository layer for database operations

pub mod books;
pub mod users;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, BookQuery, User},
};

/// Storage consumed by the services.
///
/// Every method may fail with `AppError::StorageUnavailable`; callers do not
/// retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
    // === Users ===

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert a new user with an empty cart. Fails with `DuplicateUser` if the
    /// username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User>;

    /// Persist the user's cart in a single write
    async fn save_user(&self, user: &User) -> AppResult<()>;

    // === Books ===

    async fn find_book_by_id(&self, id: Uuid) -> AppResult<Option<Book>>;

    /// Books matching any of `ids`, in no particular order
    async fn find_books_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Book>>;

    /// Books of a branch, optionally filtered by text, ordered by title then id
    async fn find_books_by_branch(&self, query: &BookQuery) -> AppResult<Vec<Book>>;

    /// Distinct branch names, sorted
    async fn list_branches(&self) -> AppResult<Vec<String>>;

    /// Check that the backing store answers
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl Storage for Repository {
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.users.get_by_username(username).await
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.users.get_by_id(id).await
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User> {
        self.users.create(username, password_hash).await
    }

    async fn save_user(&self, user: &User) -> AppResult<()> {
        self.users.save_cart(user).await
    }

    async fn find_book_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        self.books.get_by_id(id).await
    }

    async fn find_books_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        self.books.get_by_ids(ids).await
    }

    async fn find_books_by_branch(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.books.search(query).await
    }

    async fn list_branches(&self) -> AppResult<Vec<String>> {
        self.books.branches().await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
