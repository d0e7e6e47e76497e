//! Catalog browsing endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{book::BranchBooksParams, Book},
    AppState,
};

/// List branch names
#[utoipa::path(
    get,
    path = "/branches",
    tag = "books",
    responses(
        (status = 200, description = "Branch names", body = Vec<String>)
    )
)]
pub async fn list_branches(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let branches = state.services.catalog.list_branches().await?;
    Ok(Json(branches))
}

/// List the books of a branch, optionally filtered by a text query
#[utoipa::path(
    get,
    path = "/branches/{branch}/books",
    tag = "books",
    params(
        ("branch" = String, Path, description = "Branch name"),
        BranchBooksParams
    ),
    responses(
        (status = 200, description = "Books of the branch", body = Vec<Book>)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Path(branch): Path<String>,
    Query(params): Query<BranchBooksParams>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books(&branch, params.query).await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}
