//! Product and review types as served by the catalog API.

use core::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A catalog product.
///
/// Deserialized verbatim from the catalog API. Everything except `id` and
/// `title` is optional upstream and defaults to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub stock: Option<u32>,
    /// Image URLs in display order.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Rating, if the product has a non-zero one.
    #[must_use]
    pub fn visible_rating(&self) -> Option<f64> {
        self.rating.filter(|r| *r > 0.0)
    }

    /// Units in stock, if any are available.
    #[must_use]
    pub fn visible_stock(&self) -> Option<u32> {
        self.stock.filter(|s| *s > 0)
    }
}

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(alias = "reviewerName", default)]
    pub name: String,
    #[serde(default)]
    pub date: ReviewDate,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub rating: f64,
}

/// A review date.
///
/// Upstream sends ISO 8601 timestamps; anything that does not parse is kept
/// and displayed as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ReviewDate {
    raw: String,
    parsed: Option<DateTime<FixedOffset>>,
}

impl ReviewDate {
    /// The timestamp, when the upstream value was a valid RFC 3339 date.
    #[must_use]
    pub const fn parsed(&self) -> Option<&DateTime<FixedOffset>> {
        self.parsed.as_ref()
    }
}

impl From<String> for ReviewDate {
    fn from(raw: String) -> Self {
        let parsed = DateTime::parse_from_rfc3339(raw.trim()).ok();
        Self { raw, parsed }
    }
}

impl From<ReviewDate> for String {
    fn from(date: ReviewDate) -> Self {
        date.raw
    }
}

impl fmt::Display for ReviewDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parsed {
            Some(date) => write!(f, "{}", date.format("%B %-d, %Y")),
            None => f.write_str(&self.raw),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn full_product_json() -> serde_json::Value {
        serde_json::json!({
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "category": "beauty",
            "price": 9.99,
            "description": "A popular mascara.",
            "tags": ["beauty", "mascara"],
            "rating": 4.94,
            "stock": 5,
            "images": [
                "https://cdn.example.com/1/1.png",
                "https://cdn.example.com/1/2.png"
            ],
            "reviews": [{
                "reviewerName": "John Doe",
                "date": "2024-05-23T08:56:21.618Z",
                "comment": "Very happy with my purchase!",
                "rating": 5
            }]
        })
    }

    #[test]
    fn test_product_deserializes_full_shape() {
        let product: Product = serde_json::from_value(full_product_json()).unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price.to_string(), "$9.99");
        assert_eq!(product.tags, vec!["beauty", "mascara"]);
        assert_eq!(product.visible_stock(), Some(5));
        assert_eq!(product.primary_image(), Some("https://cdn.example.com/1/1.png"));
        assert_eq!(product.reviews[0].name, "John Doe");
        assert_eq!(product.reviews[0].date.to_string(), "May 23, 2024");
    }

    #[test]
    fn test_product_deserializes_minimal_shape() {
        let product: Product =
            serde_json::from_value(serde_json::json!({"id": 7, "title": "Bare"})).unwrap();

        assert!(product.images.is_empty());
        assert!(product.reviews.is_empty());
        assert_eq!(product.visible_rating(), None);
        assert_eq!(product.visible_stock(), None);
    }

    #[test]
    fn test_zero_rating_and_stock_are_hidden() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 3, "title": "Sold out", "rating": 0, "stock": 0
        }))
        .unwrap();

        assert_eq!(product.visible_rating(), None);
        assert_eq!(product.visible_stock(), None);
    }

    #[test]
    fn test_review_accepts_name_field() {
        let review: Review = serde_json::from_value(serde_json::json!({
            "name": "Ada", "date": "yesterday", "comment": "ok", "rating": 4
        }))
        .unwrap();

        assert_eq!(review.name, "Ada");
        assert!(review.date.parsed().is_none());
        assert_eq!(review.date.to_string(), "yesterday");
    }

    #[test]
    fn test_review_date_serializes_raw_value() {
        let date = ReviewDate::from("2024-05-23T08:56:21.618Z".to_string());
        assert_eq!(
            serde_json::to_string(&date).unwrap(),
            "\"2024-05-23T08:56:21.618Z\""
        );
    }
}
