//! Static category taxonomy.
//!
//! The catalog API serves a flat list of category slugs. The storefront
//! groups them under a fixed set of labelled groups; slugs that are not in the
//! taxonomy are never offered by the filter.

use serde::Serialize;

/// A labelled group of category slugs, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub label: &'static str,
    pub slugs: Vec<String>,
}

/// Every group and its slugs, in display order.
pub const CATEGORY_GROUPS: &[(&str, &[&str])] = &[
    ("Men", &["mens-shirts", "mens-shoes", "mens-watches"]),
    (
        "Women",
        &[
            "womens-dresses",
            "womens-shoes",
            "womens-bags",
            "womens-jewellery",
            "womens-watches",
        ],
    ),
    (
        "Accessories",
        &[
            "sunglasses",
            "mobile-accessories",
            "sports-accessories",
            "motorcycle",
            "vehicle",
        ],
    ),
    ("Electronics", &["laptops", "smartphones", "tablets"]),
    (
        "Home & Living",
        &["furniture", "home-decoration", "kitchen-accessories"],
    ),
    ("Beauty & Care", &["beauty", "skin-care", "fragrances"]),
    ("Groceries", &["groceries"]),
];

/// Whether `slug` belongs to the taxonomy.
#[must_use]
pub fn is_known(slug: &str) -> bool {
    CATEGORY_GROUPS
        .iter()
        .any(|(_, slugs)| slugs.contains(&slug))
}

/// Group the categories the catalog actually serves.
///
/// Keeps taxonomy order, keeps only slugs present in `available`, and drops
/// groups left empty.
#[must_use]
pub fn group_categories<S: AsRef<str>>(available: &[S]) -> Vec<CategoryGroup> {
    CATEGORY_GROUPS
        .iter()
        .filter_map(|(label, slugs)| {
            let present: Vec<String> = slugs
                .iter()
                .filter(|slug| available.iter().any(|a| a.as_ref() == **slug))
                .map(|slug| (*slug).to_string())
                .collect();
            (!present.is_empty()).then_some(CategoryGroup {
                label: *label,
                slugs: present,
            })
        })
        .collect()
}

/// Display label for a slug: dashes become spaces.
#[must_use]
pub fn humanize(slug: &str) -> String {
    slug.replace('-', " ")
}
