//! Books repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, BookQuery},
};

const BOOK_COLUMNS: &str = "id, title, author, branch, image, description, quantity, max_days";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Get all books whose id is in `ids`
    pub async fn get_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = ANY($1)",
            BOOK_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Books of a branch, filtered by phrase search or substring on title
    /// and description when a query is given
    pub async fn search(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let books = match query.query {
            None => {
                sqlx::query_as::<_, Book>(&format!(
                    r#"
                    SELECT {} FROM books
                    WHERE branch = $1
                    ORDER BY title, id
                    "#,
                    BOOK_COLUMNS
                ))
                .bind(&query.branch)
                .fetch_all(&self.pool)
                .await?
            }
            Some(ref text) => {
                sqlx::query_as::<_, Book>(&format!(
                    r#"
                    SELECT {} FROM books
                    WHERE branch = $1
                      AND (
                        to_tsvector('english', title || ' ' || COALESCE(description, ''))
                            @@ phraseto_tsquery('english', $2)
                        OR title ILIKE $3 ESCAPE '\'
                        OR description ILIKE $3 ESCAPE '\'
                      )
                    ORDER BY title, id
                    "#,
                    BOOK_COLUMNS
                ))
                .bind(&query.branch)
                .bind(text)
                .bind(like_pattern(text))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(books)
    }

    /// Distinct branch names
    pub async fn branches(&self) -> AppResult<Vec<String>> {
        let branches = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT branch FROM books ORDER BY branch",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(branches)
    }
}

/// `%text%` with LIKE wildcards in `text` escaped
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
