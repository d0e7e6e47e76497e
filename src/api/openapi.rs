//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, cart, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lending API",
        version = "1.0.0",
        description = "Branch library book lending REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        // Books
        books::list_branches,
        books::list_books,
        books::get_book,
        // Cart
        cart::add_to_cart,
        cart::view_cart,
        cart::remove_from_cart,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::Credentials,
            crate::models::user::UserInfo,
            auth::LogoutResponse,
            // Books
            crate::models::book::Book,
            // Cart
            crate::models::user::CartEntry,
            crate::models::user::CartItem,
            cart::AddToCartRequest,
            cart::RemoveFromCartResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and sessions"),
        (name = "books", description = "Catalog browsing by branch"),
        (name = "cart", description = "Cart and due dates")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
