//! Integration tests for the Vitrine storefront.
//!
//! Each test starts a `wiremock` server standing in for the catalog API and
//! drives the storefront router in-process with `tower::ServiceExt::oneshot`.
//! No network access beyond localhost is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use vitrine_storefront::config::{CatalogConfig, StorefrontConfig};
use vitrine_storefront::state::AppState;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A storefront router wired to a mock catalog API.
pub struct TestStorefront {
    pub catalog: MockServer,
    router: Router,
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// A response header as a string, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Number of product cards rendered.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.body.matches("class=\"product-card\"").count()
    }
}

impl TestStorefront {
    /// Start a mock catalog and build the router against it.
    pub async fn start() -> Self {
        let catalog = MockServer::start().await;
        let config = StorefrontConfig::with_catalog(
            CatalogConfig::new(&catalog.uri()).expect("mock server URI is a valid base URL"),
        );
        let state = AppState::new(config).expect("Failed to initialize application state");

        Self {
            catalog,
            router: vitrine_storefront::app(state),
        }
    }

    /// Serve `GET /categories` with `slugs`.
    pub async fn mount_categories(&self, slugs: &[&str]) {
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(slugs)))
            .mount(&self.catalog)
            .await;
    }

    /// Issue a plain browser `GET`.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().method(Method::GET).uri(uri), Body::empty())
            .await
    }

    /// Issue a `GET` the way HTMX does.
    pub async fn get_htmx(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .header("hx-request", "true"),
            Body::empty(),
        )
        .await
    }

    /// Post a url-encoded form.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();

        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header("hx-request", "true"),
            Body::from(body),
        )
        .await
    }

    async fn send(&self, builder: axum::http::request::Builder, body: Body) -> TestResponse {
        let request = builder.body(body).expect("valid test request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body is readable");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// A catalog product fixture.
#[must_use]
pub fn product_json(id: u32, title: &str, images: usize) -> Value {
    let images: Vec<String> = (1..=images)
        .map(|n| format!("https://cdn.example.com/products/{id}/{n}.png"))
        .collect();

    json!({
        "id": id,
        "title": title,
        "category": "laptops",
        "price": 999.5,
        "description": format!("{title} description"),
        "images": images
    })
}
