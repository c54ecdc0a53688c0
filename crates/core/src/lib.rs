//! Vitrine Core - catalog types and listing state.
//!
//! This crate provides the pieces of the storefront that do not touch the
//! network:
//! - `types` - Product, review, price and ID types as served by the catalog API
//! - `listing` - The listing query (page, sort, category, search) and its
//!   serialization to upstream request parameters and to the page URL
//! - `taxonomy` - The static category taxonomy used by the filter
//! - `carousel` - Image rotation for product cards and the detail gallery
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. The storefront binary owns fetching and rendering.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carousel;
pub mod listing;
pub mod taxonomy;
pub mod types;

pub use carousel::{Carousel, Gallery};
pub use listing::{
    ListingChange, ListingParams, ListingQuery, PAGE_SIZE, SortKey, SortOption, SortOptionError,
    SortOrder,
};
pub use taxonomy::{CATEGORY_GROUPS, CategoryGroup, group_categories};
pub use types::*;
