//! Catalog types for Vitrine.
//!
//! These mirror the product shape served by the catalog API and wrap the
//! primitive fields that need type safety (IDs, prices).

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::Price;
pub use product::{Product, Review, ReviewDate};
