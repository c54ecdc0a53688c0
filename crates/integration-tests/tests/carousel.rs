//! Carousel rotation fragments.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;
use vitrine_integration_tests::TestStorefront;
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

const IMAGES: &str = r#"["https://cdn.example.com/a.png","https://cdn.example.com/b.png","https://cdn.example.com/c.png"]"#;

/// Position of `needle` in the body, for order assertions.
fn position(body: &str, needle: &str) -> usize {
    body.find(needle).unwrap()
}

async fn store_without_upstream_calls() -> TestStorefront {
    let store = TestStorefront::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&store.catalog)
        .await;
    store
}

#[tokio::test]
async fn next_moves_first_image_to_back() {
    let store = store_without_upstream_calls().await;

    let response = store
        .post_form(
            "/carousel/next",
            &[("product_id", "4"), ("title", "Bag"), ("images", IMAGES)],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("<html"));
    assert!(response.body.contains("id=\"carousel-4\""));
    assert!(response.body.contains("src=\"https://cdn.example.com/b.png\""));
    let b = position(&response.body, "b.png&#34;");
    let c = position(&response.body, "c.png&#34;");
    let a = position(&response.body, "a.png&#34;");
    assert!(b < c && c < a);
}

#[tokio::test]
async fn previous_moves_last_image_to_front() {
    let store = store_without_upstream_calls().await;

    let response = store
        .post_form(
            "/carousel/previous",
            &[("product_id", "4"), ("title", "Bag"), ("images", IMAGES)],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("src=\"https://cdn.example.com/c.png\""));
}

#[tokio::test]
async fn invalid_image_list_is_rejected() {
    let store = store_without_upstream_calls().await;

    let response = store
        .post_form(
            "/carousel/next",
            &[("product_id", "4"), ("images", r#"["javascript:alert(1)"]"#)],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = store
        .post_form("/carousel/next", &[("product_id", "4"), ("images", "nope")])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
