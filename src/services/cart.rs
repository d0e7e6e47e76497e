//! Cart workflow: add, remove and view the books a user is borrowing
//!
//! Every operation starts by re-reading the user from storage, so the cart
//! seen by the workflow is never a stale session copy. A cart change is a
//! single `save_user` call; nothing is written when a precondition fails.
//!
//! Book quantity is checked on add but never decremented or restored.

use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{CartEntry, CartItem, User},
    repository::Storage,
};

#[derive(Clone)]
pub struct CartService {
    storage: Arc<dyn Storage>,
}

impl CartService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Add a book to the user's cart, due after the book's loan duration.
    ///
    /// Preconditions are checked in order: the user exists, the book is not
    /// already in the cart, the book exists, the book has units left.
    pub async fn add_to_cart(&self, user_id: Uuid, book_id: Uuid) -> AppResult<CartEntry> {
        let mut user = self.load_user(user_id).await?;

        if user.has_book(book_id) {
            return Err(AppError::DuplicateInCart);
        }

        let book = self
            .storage
            .find_book_by_id(book_id)
            .await?
            .ok_or(AppError::BookNotFound)?;

        if !book.is_available() {
            return Err(AppError::BookUnavailable);
        }

        let entry = CartEntry::borrow(&book, Utc::now())?;
        user.cart.push(entry.clone());
        self.storage.save_user(&user).await?;

        tracing::info!(
            user_id = %user.id,
            book_id = %book.id,
            due_date = %entry.due_date,
            "Book added to cart"
        );

        Ok(entry)
    }

    /// Remove a book from the user's cart and return the remaining entries.
    /// Removing a book that is not in the cart leaves it unchanged.
    pub async fn remove_from_cart(&self, user_id: Uuid, book_id: Uuid) -> AppResult<Vec<CartEntry>> {
        let mut user = self.load_user(user_id).await?;

        let removed = user.remove_book(book_id);
        if removed == 0 {
            tracing::debug!(user_id = %user.id, book_id = %book_id, "Book not in cart");
            return Ok(user.cart);
        }

        self.storage.save_user(&user).await?;
        tracing::info!(user_id = %user.id, book_id = %book_id, "Book removed from cart");

        Ok(user.cart)
    }

    /// The user's cart with every book resolved
    pub async fn view_cart(&self, user_id: Uuid) -> AppResult<Vec<CartItem>> {
        let user = self.load_user(user_id).await?;
        self.resolve(&user.cart).await
    }

    /// Join cart entries with their books, keeping cart order. Entries whose
    /// book no longer exists are left out.
    pub async fn resolve(&self, entries: &[CartEntry]) -> AppResult<Vec<CartItem>> {
        let ids: Vec<Uuid> = entries.iter().map(|entry| entry.book).collect();
        let books: HashMap<Uuid, _> = self
            .storage
            .find_books_by_ids(&ids)
            .await?
            .into_iter()
            .map(|book| (book.id, book))
            .collect();

        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            match books.get(&entry.book) {
                Some(book) => items.push(CartItem {
                    book: book.clone(),
                    due_date: entry.due_date,
                }),
                None => tracing::warn!(book_id = %entry.book, "Cart references a missing book"),
            }
        }

        Ok(items)
    }

    async fn load_user(&self, user_id: Uuid) -> AppResult<User> {
        self.storage
            .find_user_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)
    }
}
