//! Cart endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::{CartEntry, CartItem},
    AppState,
};

use super::session::{self, SessionUser};

/// Add-to-cart request
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    /// Book ID
    pub book_id: String,
}

/// Result of a removal request. `cart` is set on success, `error` otherwise.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RemoveFromCartResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart: Option<Vec<CartItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RemoveFromCartResponse {
    fn ok(cart: Vec<CartItem>) -> Self {
        Self {
            success: true,
            cart: Some(cart),
            error: None,
        }
    }

    fn failed(err: &AppError) -> Self {
        Self {
            success: false,
            cart: None,
            error: Some(err.user_message()),
        }
    }
}

/// Add a book of a branch to the logged-in user's cart
#[utoipa::path(
    post,
    path = "/branches/{branch}/add-to-cart",
    tag = "cart",
    params(
        ("branch" = String, Path, description = "Branch the book was picked from")
    ),
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Book added", body = CartEntry),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "User not found"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book is already in the cart"),
        (status = 422, description = "Book is not available")
    )
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Path(branch): Path<String>,
    payload: Result<Json<AddToCartRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CartEntry>)> {
    let Json(request) = payload?;
    tracing::debug!(%user_id, book_id = %request.book_id, branch = %branch, "Add to cart");

    let book_id = match Uuid::parse_str(&request.book_id) {
        Ok(book_id) => book_id,
        Err(_) => {
            // An id that is not a UUID names no book
            state.services.auth.current_user(user_id).await?;
            return Err(AppError::BookNotFound);
        }
    };

    let entry = state.services.cart.add_to_cart(user_id, book_id).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// View the logged-in user's cart
#[utoipa::path(
    get,
    path = "/cart",
    tag = "cart",
    responses(
        (status = 200, description = "Cart with resolved books", body = Vec<CartItem>),
        (status = 401, description = "User not found")
    )
)]
pub async fn view_cart(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> AppResult<Json<Vec<CartItem>>> {
    let items = state.services.cart.view_cart(user_id).await?;
    Ok(Json(items))
}

/// Remove a book from the logged-in user's cart.
///
/// Always answers 200; failures are reported in the body.
#[utoipa::path(
    delete,
    path = "/cart/remove/{id}",
    tag = "cart",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Removal result", body = RemoveFromCartResponse)
    )
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    session: Session,
    Path(book_id): Path<String>,
) -> Json<RemoveFromCartResponse> {
    tracing::debug!(book_id = %book_id, "Remove from cart");

    match remove(&state, &session, &book_id).await {
        Ok(cart) => Json(RemoveFromCartResponse::ok(cart)),
        Err(err) => {
            tracing::warn!(book_id = %book_id, error = %err, "Removal failed");
            Json(RemoveFromCartResponse::failed(&err))
        }
    }
}

async fn remove(state: &AppState, session: &Session, book_id: &str) -> AppResult<Vec<CartItem>> {
    let user_id = session::current_user_id(session).await?;
    let cart = &state.services.cart;

    // An id that is not a UUID cannot be in any cart
    match Uuid::parse_str(book_id) {
        Ok(book_id) => {
            let entries = cart.remove_from_cart(user_id, book_id).await?;
            cart.resolve(&entries).await
        }
        Err(_) => cart.view_cart(user_id).await,
    }
}
