//! Catalog browsing service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookQuery},
    repository::Storage,
};

#[derive(Clone)]
pub struct CatalogService {
    storage: Arc<dyn Storage>,
}

impl CatalogService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Books of a branch, filtered by `query` when one is given
    pub async fn list_books(&self, branch: &str, query: Option<String>) -> AppResult<Vec<Book>> {
        let query = BookQuery::new(branch, query);
        let books = self.storage.find_books_by_branch(&query).await?;
        tracing::debug!(branch, query = ?query.query, count = books.len(), "Listed books");
        Ok(books)
    }

    /// All branch names
    pub async fn list_branches(&self) -> AppResult<Vec<String>> {
        self.storage.list_branches().await
    }

    /// Get a single book
    pub async fn get_book(&self, id: Uuid) -> AppResult<Book> {
        self.storage
            .find_book_by_id(id)
            .await?
            .ok_or(AppError::BookNotFound)
    }
}
