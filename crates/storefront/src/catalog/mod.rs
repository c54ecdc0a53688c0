//! Catalog API client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`; the catalog API is the source of truth
//! - Products are fetched per request and never cached
//! - The category list is cached in memory via `moka` (TTL from config)
//!
//! # Endpoints
//!
//! - `GET /products?limit=&skip=&sortBy=&order=&category=&search=` - listing page
//! - `GET /products/{id}` - single product
//! - `GET /categories` - category slugs
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_core::ListingQuery;
//! use vitrine_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let products = client.list_products(&ListingQuery::default()).await?;
//! ```

mod client;
pub mod types;

pub use client::CatalogClient;

use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure (connection refused, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested resource does not exist.
    #[error("Not found: {url}")]
    NotFound { url: String },

    /// Any other non-success status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The body was not the JSON shape we expected.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
