//! Wire shapes of catalog API responses.
//!
//! Product and review types live in `vitrine_core`; this module only covers
//! the envelopes around them, which differ between catalog deployments.

use serde::Deserialize;
use vitrine_core::Product;

/// Body of `GET /products`.
///
/// Some deployments return a bare array, others wrap it with paging
/// metadata. Either way only the products are used.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProductsPayload {
    List(Vec<Product>),
    Page { products: Vec<Product> },
}

impl ProductsPayload {
    #[must_use]
    pub fn into_products(self) -> Vec<Product> {
        match self {
            Self::List(products) | Self::Page { products } => products,
        }
    }
}

/// One entry of `GET /categories`: a bare slug or an object with a slug.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CategoryEntry {
    Slug(String),
    Detailed { slug: String },
}

impl CategoryEntry {
    #[must_use]
    pub fn into_slug(self) -> String {
        match self {
            Self::Slug(slug) | Self::Detailed { slug } => slug,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_products_payload_bare_array() {
        let payload: ProductsPayload =
            serde_json::from_str(r#"[{"id": 1, "title": "One"}, {"id": 2, "title": "Two"}]"#)
                .unwrap();
        let products = payload.into_products();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].title, "Two");
    }

    #[test]
    fn test_products_payload_wrapped() {
        let payload: ProductsPayload = serde_json::from_str(
            r#"{"products": [{"id": 5, "title": "Five"}], "total": 194, "skip": 0, "limit": 20}"#,
        )
        .unwrap();
        assert_eq!(payload.into_products().len(), 1);
    }

    #[test]
    fn test_products_payload_rejects_other_shapes() {
        assert!(serde_json::from_str::<ProductsPayload>(r#"{"message": "oops"}"#).is_err());
    }

    #[test]
    fn test_category_entries() {
        let entries: Vec<CategoryEntry> = serde_json::from_str(
            r#"["beauty", {"slug": "laptops", "name": "Laptops", "url": "https://x/laptops"}]"#,
        )
        .unwrap();
        let slugs: Vec<String> = entries.into_iter().map(CategoryEntry::into_slug).collect();
        assert_eq!(slugs, vec!["beauty", "laptops"]);
    }
}
