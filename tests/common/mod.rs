//! Shared test fixtures: an in-memory storage and an app wired to it

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use tower_sessions::MemoryStore;
use uuid::Uuid;

use lending_server::{
    api::{self, session::create_session_layer},
    config::AppConfig,
    models::{Book, BookQuery, User},
    repository::Storage,
    services::Services,
    AppError, AppResult, AppState,
};

/// Storage kept in process memory
#[derive(Default)]
pub struct MemoryStorage {
    users: Mutex<Vec<User>>,
    books: Mutex<Vec<Book>>,
    failing: AtomicBool,
}

impl MemoryStorage {
    pub fn with_books(books: Vec<Book>) -> Arc<Self> {
        let storage = Self::default();
        *storage.books.lock().unwrap() = books;
        Arc::new(storage)
    }

    /// Make every following call fail with `StorageUnavailable`
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn user(&self, username: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    pub fn book(&self, id: Uuid) -> Option<Book> {
        self.books.lock().unwrap().iter().find(|b| b.id == id).cloned()
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::StorageUnavailable("memory storage offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.check()?;
        Ok(self.user(username))
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.check()?;
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<User> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == username) {
            return Err(AppError::DuplicateUser);
        }
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password: password_hash.to_string(),
            cart: Vec::new(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn save_user(&self, user: &User) -> AppResult<()> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(AppError::UserNotFound)?;
        stored.cart = user.cart.clone();
        Ok(())
    }

    async fn find_book_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        self.check()?;
        Ok(self.book(id))
    }

    async fn find_books_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        self.check()?;
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .filter(|b| ids.contains(&b.id))
            .cloned()
            .collect())
    }

    async fn find_books_by_branch(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.check()?;
        let mut books: Vec<Book> = self
            .books
            .lock()
            .unwrap()
            .iter()
            .filter(|b| matches(query, b))
            .cloned()
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(books)
    }

    async fn list_branches(&self) -> AppResult<Vec<String>> {
        self.check()?;
        let mut branches: Vec<String> = self
            .books
            .lock()
            .unwrap()
            .iter()
            .map(|b| b.branch.clone())
            .collect();
        branches.sort();
        branches.dedup();
        Ok(branches)
    }

    async fn ping(&self) -> AppResult<()> {
        self.check()
    }
}

/// Branch equality plus case-insensitive substring match on title and
/// description, standing in for the database text search
fn matches(query: &BookQuery, book: &Book) -> bool {
    if book.branch != query.branch {
        return false;
    }
    match &query.query {
        None => true,
        Some(q) => {
            let needle = q.to_lowercase();
            book.title.to_lowercase().contains(&needle)
                || book
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        }
    }
}

pub fn book(branch: &str, title: &str, quantity: i32, max_days: i32) -> Book {
    Book {
        id: Uuid::new_v4(),
        title: title.to_string(),
        author: "Test Author".to_string(),
        branch: branch.to_string(),
        image: Some(format!("/images/{}.jpg", title.to_lowercase().replace(' ', "-"))),
        description: Some(format!("About {}", title)),
        quantity,
        max_days,
    }
}

pub fn services(storage: Arc<MemoryStorage>) -> Services {
    Services::new(storage)
}

/// Full router with in-memory sessions
pub fn app(storage: Arc<MemoryStorage>) -> Router {
    let config = AppConfig::default();
    let session_layer = create_session_layer(MemoryStore::default(), &config.session);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services(storage)),
    };

    api::create_router(state).layer(session_layer)
}
