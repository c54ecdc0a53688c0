//! Catalog API client implementation.
//!
//! Uses `reqwest` for HTTP and caches the category list with `moka`.

use std::sync::Arc;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;
use vitrine_core::{ListingQuery, Product, ProductId};

use crate::catalog::CatalogError;
use crate::catalog::types::{CategoryEntry, ProductsPayload};
use crate::config::CatalogConfig;

const CATEGORIES_CACHE_KEY: &str = "categories";

/// Maximum number of body characters written to logs on failure.
const LOGGED_BODY_CHARS: usize = 500;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog REST API.
///
/// Cheap to clone; all clones share one connection pool and one category
/// cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    config: CatalogConfig,
    categories: Cache<&'static str, Arc<Vec<String>>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("vitrine-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let categories = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.category_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                config: config.clone(),
                categories,
            }),
        })
    }

    /// Fetch `url` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, CatalogError> {
        let mut request = self.inner.client.get(url.clone());
        if let Some(token) = self.inner.config.bearer_token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound {
                url: url.to_string(),
            });
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                url = %url,
                body = %body.chars().take(LOGGED_BODY_CHARS).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(LOGGED_BODY_CHARS).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Deserialize {
                context: context.to_string(),
                source: e,
            }
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Fetch one page of products for a listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the body is not a product list.
    #[instrument(skip(self), fields(page = query.page()))]
    pub async fn list_products(&self, query: &ListingQuery) -> Result<Vec<Product>, CatalogError> {
        let url = self.products_url(query);
        debug!(url = %url, "Fetching products");

        let payload: ProductsPayload = self.get_json(url, "product listing").await?;
        Ok(payload.into_products())
    }

    /// Fetch a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the API answers 404, or another
    /// error if the request or decoding fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = self.inner.config.endpoint(&format!("products/{id}"));
        self.get_json(url, &format!("product {id}")).await
    }

    /// The upstream URL for a listing query.
    #[must_use]
    pub fn products_url(&self, query: &ListingQuery) -> Url {
        let mut url = self.inner.config.endpoint("products");
        url.query_pairs_mut().extend_pairs(query.api_params());
        url
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// Fetch the category slugs the catalog serves.
    ///
    /// Cached for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a category
    /// list. Failures are not cached.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Arc<Vec<String>>, CatalogError> {
        if let Some(categories) = self.inner.categories.get(CATEGORIES_CACHE_KEY).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories = Arc::new(self.fetch_categories().await?);

        self.inner
            .categories
            .insert(CATEGORIES_CACHE_KEY, Arc::clone(&categories))
            .await;

        Ok(categories)
    }

    /// Check that the catalog API answers, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns the error from the category request.
    pub async fn ping(&self) -> Result<(), CatalogError> {
        self.fetch_categories().await.map(|_| ())
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
        let url = self.inner.config.endpoint("categories");
        let entries: Vec<CategoryEntry> = self.get_json(url, "category list").await?;
        Ok(entries.into_iter().map(CategoryEntry::into_slug).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrine_core::{ListingChange, SortOption};

    use super::*;

    fn client(base_url: &str) -> CatalogClient {
        CatalogClient::new(&CatalogConfig::new(base_url).unwrap()).unwrap()
    }

    #[test]
    fn test_products_url_default_query() {
        let url = client("https://api.example.com").products_url(&ListingQuery::default());
        assert_eq!(
            url.as_str(),
            "https://api.example.com/products?limit=20&skip=0&sortBy=id&order=asc"
        );
    }

    #[test]
    fn test_products_url_full_query() {
        let query = ListingQuery::default()
            .apply(ListingChange::NextPage)
            .apply(ListingChange::Sort(SortOption::PriceDesc))
            .apply(ListingChange::Category(Some("laptops".to_string())))
            .apply(ListingChange::Search(Some("pro max".to_string())));

        let url = client("https://api.example.com/").products_url(&query);
        assert_eq!(
            url.as_str(),
            "https://api.example.com/products?limit=20&skip=20&sortBy=price&order=desc&category=laptops&search=pro+max"
        );
    }
}
