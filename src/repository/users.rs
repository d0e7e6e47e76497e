//! Users repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{CartEntry, User},
};

/// Row shape of the `users` table
#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password: String,
    cart: Json<Vec<CartEntry>>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password: row.password,
            cart: row.cart.0,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, cart, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Get user by username (exact match)
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, cart, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Create a new user with an empty cart
    pub async fn create(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password, cart, created_at)
            VALUES ($1, $2, $3, '[]'::jsonb, $4)
            RETURNING id, username, password, cart, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::DuplicateUser,
            other => AppError::from(other),
        })?;

        Ok(row.into())
    }

    /// Replace the stored cart of a user
    pub async fn save_cart(&self, user: &User) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET cart = $2 WHERE id = $1")
            .bind(user.id)
            .bind(Json(&user.cart))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::UserNotFound);
        }

        Ok(())
    }
}
