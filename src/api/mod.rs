//! API handlers and router for the lending REST endpoints

pub mod auth;
pub mod books;
pub mod cart;
pub mod health;
pub mod openapi;
pub mod session;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes.
///
/// The session layer is added by the caller, which picks the session store.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout).get(auth::logout))
        .route("/auth/me", get(auth::me))
        // Catalog
        .route("/branches", get(books::list_branches))
        .route("/branches/{branch}/books", get(books::list_books))
        .route("/books/{id}", get(books::get_book))
        // Cart
        .route("/branches/{branch}/add-to-cart", post(cart::add_to_cart))
        .route("/cart", get(cart::view_cart))
        .route("/cart/remove/{id}", delete(cart::remove_from_cart))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
