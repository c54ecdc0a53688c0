//! Listing query composition.
//!
//! A [`ListingQuery`] is the complete state of a product listing: page, sort
//! key, sort order, category filter and search text. It is parsed once from
//! the page URL ([`ListingParams`]), never mutated, and serialized two ways:
//!
//! - [`ListingQuery::api_params`] - the upstream `GET /products` parameters
//! - [`ListingQuery::url_params`] - the page URL parameters
//!
//! Every user action is a [`ListingChange`] that produces a new query, so the
//! request that is sent and the URL that is shown always come from the same
//! value.
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::{ListingChange, ListingQuery, SortOption};
//!
//! let query = ListingQuery::default()
//!     .apply(ListingChange::NextPage)
//!     .apply(ListingChange::Sort(SortOption::PriceDesc))
//!     .apply(ListingChange::Category(Some("laptops".to_string())));
//!
//! assert_eq!(
//!     query.api_query_string(),
//!     "limit=20&skip=20&sortBy=price&order=desc&category=laptops"
//! );
//! assert_eq!(
//!     query.href("/products"),
//!     "/products?page=2&sortBy=price&order=desc&category=laptops"
//! );
//! ```

use core::fmt;
use core::str::FromStr;

use thiserror::Error;
use url::form_urlencoded;

use crate::taxonomy;

/// Products requested per listing page.
pub const PAGE_SIZE: u32 = 20;

/// Field the catalog sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    Id,
    Price,
}

impl SortKey {
    /// The upstream / URL spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Price => "price",
        }
    }

    /// Parse a URL value, falling back to [`SortKey::Id`] for anything unknown.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim() {
            "price" => Self::Price,
            _ => Self::Id,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// The upstream / URL spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse a URL value, falling back to [`SortOrder::Asc`] for anything unknown.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim() {
            "desc" => Self::Desc,
            _ => Self::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a sort control reports something it should not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortOptionError {
    /// The control name is not `sortBy`.
    #[error("unknown sort control: {0}")]
    UnknownControl(String),
    /// The value is not one of the offered options.
    #[error("unknown sort option: {0}")]
    UnknownOption(String),
}

/// The options offered by the sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOption {
    /// Catalog order (`id`, ascending).
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
}

impl SortOption {
    /// Name the sort control reports its selection under.
    pub const CONTROL_NAME: &'static str = "sortBy";

    /// Every option, in dropdown order.
    pub const ALL: [Self; 3] = [Self::Default, Self::PriceAsc, Self::PriceDesc];

    /// Value reported by the control.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Default => "id",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Sort",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
        }
    }

    /// Interpret a `(name, value)` pair reported by the sort control.
    ///
    /// # Errors
    ///
    /// Returns [`SortOptionError`] if the name is not `sortBy` or the value is
    /// not one of [`SortOption::ALL`].
    pub fn from_control(name: &str, value: &str) -> Result<Self, SortOptionError> {
        if name != Self::CONTROL_NAME {
            return Err(SortOptionError::UnknownControl(name.to_string()));
        }
        value.parse()
    }

    /// Split into the sort key and order sent upstream.
    #[must_use]
    pub const fn decompose(self) -> (SortKey, SortOrder) {
        match self {
            Self::Default => (SortKey::Id, SortOrder::Asc),
            Self::PriceAsc => (SortKey::Price, SortOrder::Asc),
            Self::PriceDesc => (SortKey::Price, SortOrder::Desc),
        }
    }

    /// The option matching a listing's sort state.
    #[must_use]
    pub const fn from_state(sort_by: SortKey, order: SortOrder) -> Self {
        match (sort_by, order) {
            (SortKey::Id, _) => Self::Default,
            (SortKey::Price, SortOrder::Asc) => Self::PriceAsc,
            (SortKey::Price, SortOrder::Desc) => Self::PriceDesc,
        }
    }
}

impl FromStr for SortOption {
    type Err = SortOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.value() == value)
            .ok_or_else(|| SortOptionError::UnknownOption(value.to_string()))
    }
}

/// Raw listing parameters as they appear in the page URL.
///
/// Every field is optional and unvalidated; [`ListingQuery::from_params`]
/// applies the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingParams {
    pub page: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub category: Option<String>,
    pub query: Option<String>,
}

impl ListingParams {
    /// Collect listing parameters from a raw URL query string.
    ///
    /// Unrelated keys are ignored. When a key repeats, the last value wins.
    #[must_use]
    pub fn from_query_str(raw_query: Option<&str>) -> Self {
        let mut params = Self::default();
        let raw = raw_query.unwrap_or_default();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "page" => &mut params.page,
                "sortBy" => &mut params.sort_by,
                "order" => &mut params.order,
                "category" => &mut params.category,
                "query" => &mut params.query,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        params
    }
}

/// A single user action on the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingChange {
    /// Go forward one page. There is no upper bound.
    NextPage,
    /// Go back one page, stopping at page 1.
    PreviousPage,
    /// Select a category, or clear the filter with `None`.
    Category(Option<String>),
    /// Select a sort option.
    Sort(SortOption),
    /// Set or clear the search text.
    Search(Option<String>),
}

/// The full state of a product listing.
///
/// Invariants, enforced by every constructor:
/// - `page >= 1`
/// - `order == Asc` whenever `sort_by == Id`
/// - `category`, when set, is a slug from the category taxonomy
/// - `search`, when set, is trimmed and non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingQuery {
    page: u32,
    sort_by: SortKey,
    order: SortOrder,
    category: Option<String>,
    search: Option<String>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: 1,
            sort_by: SortKey::Id,
            order: SortOrder::Asc,
            category: None,
            search: None,
        }
    }
}

impl ListingQuery {
    /// Build a listing query, normalizing every field.
    #[must_use]
    pub fn new(
        page: u32,
        sort_by: SortKey,
        order: SortOrder,
        category: Option<String>,
        search: Option<String>,
    ) -> Self {
        let order = match sort_by {
            SortKey::Id => SortOrder::Asc,
            SortKey::Price => order,
        };

        Self {
            page: page.max(1),
            sort_by,
            order,
            category: category.filter(|slug| taxonomy::is_known(slug)),
            search: search
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
        }
    }

    /// Parse URL parameters leniently.
    ///
    /// Missing, malformed or unknown values fall back to their defaults:
    /// page 1, sort by `id`, ascending, no category, no search.
    #[must_use]
    pub fn from_params(params: &ListingParams) -> Self {
        let page = params
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .unwrap_or(1);
        // The sort dropdown submits a combined value such as `price-desc`.
        let (sort_by, order) = match params
            .sort_by
            .as_deref()
            .map(|value| SortOption::from_control(SortOption::CONTROL_NAME, value))
        {
            Some(Ok(option)) => option.decompose(),
            _ => (
                params
                    .sort_by
                    .as_deref()
                    .map_or(SortKey::Id, SortKey::parse_lenient),
                params
                    .order
                    .as_deref()
                    .map_or(SortOrder::Asc, SortOrder::parse_lenient),
            ),
        };

        Self::new(
            page,
            sort_by,
            order,
            params.category.clone(),
            params.query.clone(),
        )
    }

    /// Produce the query that results from `change`.
    #[must_use]
    pub fn apply(&self, change: ListingChange) -> Self {
        let mut next = self.clone();
        match change {
            ListingChange::NextPage => next.page = self.page.saturating_add(1),
            ListingChange::PreviousPage => next.page = self.page.saturating_sub(1).max(1),
            ListingChange::Category(category) => {
                next.category = category.filter(|slug| taxonomy::is_known(slug));
            }
            ListingChange::Sort(option) => {
                let (sort_by, order) = option.decompose();
                next.sort_by = sort_by;
                next.order = order;
            }
            ListingChange::Search(search) => {
                next.search = search
                    .map(|text| text.trim().to_string())
                    .filter(|text| !text.is_empty());
            }
        }
        next
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn sort_by(&self) -> SortKey {
        self.sort_by
    }

    #[must_use]
    pub const fn order(&self) -> SortOrder {
        self.order
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// The sort dropdown option matching this state.
    #[must_use]
    pub const fn sort_option(&self) -> SortOption {
        SortOption::from_state(self.sort_by, self.order)
    }

    /// Number of products to skip upstream.
    #[must_use]
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(PAGE_SIZE)
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// Parameters for the upstream `GET /products` request, in order.
    #[must_use]
    pub fn api_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", PAGE_SIZE.to_string()),
            ("skip", self.skip().to_string()),
            ("sortBy", self.sort_by.as_str().to_string()),
            ("order", self.order.as_str().to_string()),
        ];
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params
    }

    /// Parameters mirrored into the page URL, in order.
    #[must_use]
    pub fn url_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("sortBy", self.sort_by.as_str().to_string()),
            ("order", self.order.as_str().to_string()),
        ];
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(search) = &self.search {
            params.push(("query", search.clone()));
        }
        params
    }

    /// The upstream query string, e.g. `limit=20&skip=0&sortBy=id&order=asc`.
    #[must_use]
    pub fn api_query_string(&self) -> String {
        encode(&self.api_params())
    }

    /// The page URL query string.
    #[must_use]
    pub fn url_query_string(&self) -> String {
        encode(&self.url_params())
    }

    /// A link to `path` carrying this listing state.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        format!("{path}?{}", self.url_query_string())
    }

    /// Whether a raw URL query string already is this state's serialization.
    ///
    /// Compares decoded pairs, so `+` and `%20` spellings of a space are
    /// treated alike.
    #[must_use]
    pub fn is_canonical(&self, raw_query: Option<&str>) -> bool {
        let raw = raw_query.unwrap_or_default();
        let actual: Vec<(String, String)> = form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let expected: Vec<(String, String)> = self
            .url_params()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        actual == expected
    }
}

fn encode(params: &[(&'static str, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ListingParams {
        let raw: String = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        ListingParams::from_query_str(Some(&raw))
    }

    fn api_value(query: &ListingQuery, key: &str) -> Option<String> {
        query
            .api_params()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    #[test]
    fn test_default_query() {
        let query = ListingQuery::default();
        assert_eq!(query.api_query_string(), "limit=20&skip=0&sortBy=id&order=asc");
        assert_eq!(query.url_query_string(), "page=1&sortBy=id&order=asc");
    }

    #[test]
    fn test_skip_and_limit_for_every_page() {
        for page in 1..=200_u32 {
            let query = ListingQuery::new(page, SortKey::Id, SortOrder::Asc, None, None);
            assert_eq!(
                api_value(&query, "skip"),
                Some((u64::from(page - 1) * 20).to_string())
            );
            assert_eq!(api_value(&query, "limit"), Some("20".to_string()));
        }
    }

    #[test]
    fn test_id_sort_forces_ascending_order() {
        let query = ListingQuery::new(1, SortKey::Id, SortOrder::Desc, None, None);
        assert_eq!(query.order(), SortOrder::Asc);
        assert_eq!(api_value(&query, "order"), Some("asc".to_string()));

        let query = ListingQuery::from_params(&params(&[("sortBy", "id"), ("order", "desc")]));
        assert_eq!(api_value(&query, "order"), Some("asc".to_string()));

        let query = ListingQuery::new(1, SortKey::Price, SortOrder::Desc, None, None)
            .apply(ListingChange::Sort(SortOption::Default));
        assert_eq!(api_value(&query, "order"), Some("asc".to_string()));
    }

    #[test]
    fn test_previous_page_floors_at_one() {
        let query = ListingQuery::default();
        assert_eq!(query.apply(ListingChange::PreviousPage).page(), 1);

        let query = ListingQuery::new(3, SortKey::Id, SortOrder::Asc, None, None);
        let query = query.apply(ListingChange::PreviousPage);
        assert_eq!(query.page(), 2);
        assert_eq!(query.apply(ListingChange::PreviousPage).page(), 1);
        assert!(!query.apply(ListingChange::PreviousPage).has_previous_page());
    }

    #[test]
    fn test_next_page_is_unbounded() {
        let mut query = ListingQuery::default();
        for _ in 0..1000 {
            query = query.apply(ListingChange::NextPage);
        }
        assert_eq!(query.page(), 1001);
        assert_eq!(api_value(&query, "skip"), Some("20000".to_string()));
    }

    #[test]
    fn test_clearing_category_removes_it_everywhere() {
        let query = ListingQuery::default().apply(ListingChange::Category(Some("laptops".into())));
        assert_eq!(query.category(), Some("laptops"));

        let cleared = query.apply(ListingChange::Category(None));
        assert_eq!(cleared.category(), None);
        assert!(api_value(&cleared, "category").is_none());
        assert!(!cleared.url_query_string().contains("category"));
    }

    #[test]
    fn test_scenario_price_desc_laptops_page_two() {
        let query = ListingQuery::from_params(&params(&[
            ("page", "2"),
            ("sortBy", "price"),
            ("order", "desc"),
            ("category", "laptops"),
        ]));

        assert_eq!(
            query.api_query_string(),
            "limit=20&skip=20&sortBy=price&order=desc&category=laptops"
        );
        assert_eq!(
            query.url_query_string(),
            "page=2&sortBy=price&order=desc&category=laptops"
        );
    }

    #[test]
    fn test_lenient_parsing_falls_back_to_defaults() {
        for page in ["0", "-3", "abc", "", "1.5"] {
            let query = ListingQuery::from_params(&params(&[("page", page)]));
            assert_eq!(query.page(), 1, "page={page}");
        }

        let query = ListingQuery::from_params(&params(&[
            ("sortBy", "rating"),
            ("order", "sideways"),
            ("category", "spaceships"),
            ("query", "   "),
        ]));
        assert_eq!(query, ListingQuery::default());
    }

    #[test]
    fn test_empty_category_is_no_category() {
        let query = ListingQuery::from_params(&params(&[("category", "")]));
        assert_eq!(query.category(), None);
    }

    #[test]
    fn test_search_is_trimmed_and_serialized() {
        let query = ListingQuery::default().apply(ListingChange::Search(Some("  red phone ".into())));
        assert_eq!(query.search(), Some("red phone"));
        assert_eq!(api_value(&query, "search"), Some("red phone".to_string()));
        assert_eq!(
            query.url_query_string(),
            "page=1&sortBy=id&order=asc&query=red+phone"
        );
    }

    #[test]
    fn test_url_round_trip_is_stable() {
        let query = ListingQuery::new(
            4,
            SortKey::Price,
            SortOrder::Desc,
            Some("smartphones".into()),
            Some("case & cover".into()),
        );
        let parsed: Vec<(String, String)> =
            form_urlencoded::parse(query.url_query_string().as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
        let mut raw = ListingParams::default();
        for (key, value) in parsed {
            match key.as_str() {
                "page" => raw.page = Some(value),
                "sortBy" => raw.sort_by = Some(value),
                "order" => raw.order = Some(value),
                "category" => raw.category = Some(value),
                "query" => raw.query = Some(value),
                _ => {}
            }
        }
        assert_eq!(ListingQuery::from_params(&raw), query);
    }

    #[test]
    fn test_is_canonical() {
        let query = ListingQuery::default().apply(ListingChange::Search(Some("red phone".into())));
        assert!(query.is_canonical(Some("page=1&sortBy=id&order=asc&query=red+phone")));
        assert!(query.is_canonical(Some("page=1&sortBy=id&order=asc&query=red%20phone")));
        assert!(!query.is_canonical(Some("query=red+phone")));
        assert!(!query.is_canonical(None));
        assert!(!ListingQuery::default().is_canonical(Some("page=1&sortBy=id&order=desc")));
    }

    #[test]
    fn test_href() {
        let query = ListingQuery::default().apply(ListingChange::NextPage);
        assert_eq!(query.href("/products"), "/products?page=2&sortBy=id&order=asc");
    }

    #[test]
    fn test_sort_option_from_control() {
        assert_eq!(
            SortOption::from_control("sortBy", "price-desc").unwrap(),
            SortOption::PriceDesc
        );
        assert_eq!(
            SortOption::from_control("sortBy", "id").unwrap(),
            SortOption::Default
        );
        assert!(matches!(
            SortOption::from_control("order", "price-asc"),
            Err(SortOptionError::UnknownControl(_))
        ));
        assert!(matches!(
            SortOption::from_control("sortBy", "rating"),
            Err(SortOptionError::UnknownOption(_))
        ));
    }

    #[test]
    fn test_dropdown_value_in_sort_by_param() {
        let params = ListingParams {
            page: Some("3".into()),
            sort_by: Some("price-desc".into()),
            order: Some("asc".into()),
            ..ListingParams::default()
        };
        let query = ListingQuery::from_params(&params);
        assert_eq!(query.sort_option(), SortOption::PriceDesc);
        assert_eq!(query.page(), 3);
        assert!(!query.is_canonical(Some("page=3&sortBy=price-desc&order=asc")));
        assert_eq!(query.url_query_string(), "page=3&sortBy=price&order=desc");
    }

    #[test]
    fn test_sort_option_state_round_trip() {
        for option in SortOption::ALL {
            let (sort_by, order) = option.decompose();
            assert_eq!(SortOption::from_state(sort_by, order), option);
        }
        assert_eq!(
            SortOption::from_state(SortKey::Id, SortOrder::Desc),
            SortOption::Default
        );
    }

    #[test]
    fn test_sort_change_keeps_page_and_filters() {
        let query = ListingQuery::new(3, SortKey::Id, SortOrder::Asc, Some("tablets".into()), None)
            .apply(ListingChange::Sort(SortOption::PriceAsc));
        assert_eq!(query.page(), 3);
        assert_eq!(query.category(), Some("tablets"));
        assert_eq!(query.sort_option(), SortOption::PriceAsc);
    }

    #[test]
    fn test_repeated_keys_keep_last_value() {
        let params = ListingParams::from_query_str(Some(
            "page=2&page=3&category=laptops&category=tablets&utm_source=mail",
        ));
        assert_eq!(params.page.as_deref(), Some("3"));
        assert_eq!(params.category.as_deref(), Some("tablets"));

        let query = ListingQuery::from_params(&params);
        assert_eq!(query.page(), 3);
        assert_eq!(query.category(), Some("tablets"));
    }

    #[test]
    fn test_from_query_str_without_query() {
        assert_eq!(ListingParams::from_query_str(None), ListingParams::default());
        assert_eq!(
            ListingParams::from_query_str(Some("query=red+phone")).query.as_deref(),
            Some("red phone")
        );
    }
}
