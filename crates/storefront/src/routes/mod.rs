//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to /products
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog reachable)
//!
//! # Products
//! GET  /products               - Product listing (HTMX-aware)
//! GET  /product/{id}           - Product detail, ?image=N selects the gallery image
//!
//! # Search
//! GET  /search?query=          - Search results (HTMX-aware)
//!
//! # Carousel (HTMX fragments)
//! POST /carousel/next          - Rotate a card's images forward
//! POST /carousel/previous      - Rotate a card's images backward
//! ```
//!
//! Listing routes accept `page`, `sortBy`, `order`, `category` and `query`.

pub mod carousel;
pub mod listing;
pub mod products;
pub mod search;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the carousel fragment router.
pub fn carousel_routes() -> Router<AppState> {
    Router::new()
        .route("/next", post(carousel::next))
        .route("/previous", post(carousel::previous))
}

/// Create the main storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route(products::PRODUCTS_PATH, get(products::index))
        .route("/product/{id}", get(products::show))
        .route(search::SEARCH_PATH, get(search::index))
        .nest("/carousel", carousel_routes())
}

async fn home() -> Redirect {
    Redirect::to(products::PRODUCTS_PATH)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the catalog API is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.catalog().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Catalog API not reachable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
