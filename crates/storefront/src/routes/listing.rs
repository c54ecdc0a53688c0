//! Shared rendering for product listings.
//!
//! `/products` and `/search` both render a [`ListingView`] built from one
//! [`ListingQuery`]. The same query value produces the upstream request, the
//! control links, and the `HX-Push-Url` header, so the browser URL always
//! describes the grid on screen.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use vitrine_core::{
    Carousel, CategoryGroup, ListingChange, ListingQuery, Product, SortOption, group_categories,
};

use crate::error::CATALOG_ERROR_MESSAGE;
use crate::filters;
use crate::middleware::{HX_PUSH_URL, HxRequest, vary_on_htmx};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// One product card in the grid.
#[derive(Clone, Debug)]
pub struct ProductCardView {
    pub href: String,
    pub title: String,
    pub category: String,
    pub price: String,
    pub carousel: CarouselView,
}

/// The rotating image block of a product card.
#[derive(Clone, Debug)]
pub struct CarouselView {
    pub product_id: u32,
    pub title: String,
    pub current: Option<String>,
    /// Current image order as a JSON array, posted back on rotation.
    pub images_json: String,
    pub can_rotate: bool,
    pub fallback_image_url: String,
}

impl CarouselView {
    #[must_use]
    pub fn new(product_id: u32, title: &str, carousel: &Carousel, fallback_image_url: &str) -> Self {
        Self {
            product_id,
            title: title.to_string(),
            current: carousel.current().map(String::from),
            images_json: serde_json::to_string(carousel.images()).unwrap_or_else(|_| "[]".into()),
            can_rotate: carousel.can_rotate(),
            fallback_image_url: fallback_image_url.to_string(),
        }
    }
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, fallback_image_url: &str) -> Self {
        let carousel = Carousel::new(product.images.clone());
        Self {
            href: format!("/product/{}", product.id),
            title: product.title.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            carousel: CarouselView::new(
                product.id.as_u32(),
                &product.title,
                &carousel,
                fallback_image_url,
            ),
        }
    }
}

/// A category link in the filter.
#[derive(Clone, Debug)]
pub struct FilterOptionView {
    pub slug: String,
    pub href: String,
    pub selected: bool,
}

/// A labelled group of category links.
#[derive(Clone, Debug)]
pub struct FilterGroupView {
    pub label: &'static str,
    pub options: Vec<FilterOptionView>,
    /// Whether the selected category is in this group.
    pub open: bool,
}

/// The category filter.
#[derive(Clone, Debug)]
pub struct FilterView {
    pub groups: Vec<FilterGroupView>,
    /// Link that clears the filter; only present when a category is selected.
    pub clear_href: Option<String>,
}

impl FilterView {
    fn new(query: &ListingQuery, groups: Vec<CategoryGroup>, path: &str) -> Self {
        let groups = groups
            .into_iter()
            .map(|group| {
                let options: Vec<FilterOptionView> = group
                    .slugs
                    .into_iter()
                    .map(|slug| FilterOptionView {
                        href: query
                            .apply(ListingChange::Category(Some(slug.clone())))
                            .href(path),
                        selected: query.category() == Some(slug.as_str()),
                        slug,
                    })
                    .collect();
                FilterGroupView {
                    label: group.label,
                    open: options.iter().any(|o| o.selected),
                    options,
                }
            })
            .collect();

        Self {
            groups,
            clear_href: query
                .category()
                .map(|_| query.apply(ListingChange::Category(None)).href(path)),
        }
    }
}

/// One entry of the sort dropdown.
#[derive(Clone, Debug)]
pub struct SortOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// The sort dropdown, submitted as a GET form.
#[derive(Clone, Debug)]
pub struct SortView {
    pub control_name: &'static str,
    pub options: Vec<SortOptionView>,
    /// Listing state other than the sort, carried as hidden inputs.
    pub hidden: Vec<(&'static str, String)>,
}

impl SortView {
    fn new(query: &ListingQuery) -> Self {
        let active = query.sort_option();
        Self {
            control_name: SortOption::CONTROL_NAME,
            options: SortOption::ALL
                .into_iter()
                .map(|option| SortOptionView {
                    value: option.value(),
                    label: option.label(),
                    selected: option == active,
                })
                .collect(),
            hidden: query
                .url_params()
                .into_iter()
                .filter(|(name, _)| !matches!(*name, "sortBy" | "order"))
                .collect(),
        }
    }
}

/// Everything the listing partial renders.
#[derive(Clone, Debug)]
pub struct ListingView {
    pub path: &'static str,
    pub href: String,
    pub page: u32,
    pub cards: Vec<ProductCardView>,
    pub error: Option<&'static str>,
    pub empty_message: String,
    pub filter: FilterView,
    pub sort: SortView,
    pub previous_href: Option<String>,
    pub next_href: String,
}

/// The listing section on its own, swapped in by HTMX.
#[derive(Template, WebTemplate)]
#[template(path = "partials/listing.html")]
pub struct ListingTemplate {
    pub listing: ListingView,
}

// =============================================================================
// Loading and Responding
// =============================================================================

/// Redirect to the canonical URL when a full-page request's query string is
/// not the serialization of the state it parses to.
#[must_use]
pub fn canonical_redirect(
    hx: HxRequest,
    query: &ListingQuery,
    raw_query: Option<&str>,
    path: &str,
) -> Option<Response> {
    if hx.is_fragment() || query.is_canonical(raw_query) {
        return None;
    }
    Some((vary_on_htmx(), Redirect::to(&query.href(path))).into_response())
}

/// Fetch the products and categories for `query` and build the view.
///
/// Never fails: a product fetch failure yields the generic error message and
/// no cards, and a category fetch failure yields an empty filter.
pub async fn load_listing(
    state: &AppState,
    query: &ListingQuery,
    path: &'static str,
    empty_message: String,
) -> ListingView {
    let catalog = state.catalog();
    let (products, categories) = tokio::join!(catalog.list_products(query), catalog.categories());

    let groups = match categories {
        Ok(slugs) => group_categories(slugs.as_slice()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch categories");
            Vec::new()
        }
    };

    let fallback = &state.config().fallback_image_url;
    let (cards, error) = match products {
        Ok(products) => (
            products
                .iter()
                .map(|product| ProductCardView::new(product, fallback))
                .collect(),
            None,
        ),
        Err(e) => {
            tracing::error!(error = %e, page = query.page(), "Failed to fetch products");
            (Vec::new(), Some(CATALOG_ERROR_MESSAGE))
        }
    };

    ListingView {
        path,
        href: query.href(path),
        page: query.page(),
        cards,
        error,
        empty_message,
        filter: FilterView::new(query, groups, path),
        sort: SortView::new(query),
        previous_href: query
            .has_previous_page()
            .then(|| query.apply(ListingChange::PreviousPage).href(path)),
        next_href: query.apply(ListingChange::NextPage).href(path),
    }
}

/// Answer a listing request.
///
/// HTMX requests get the listing fragment and `HX-Push-Url`; HTMX does not
/// swap error statuses, so fragments are always 200. Full-page requests get
/// `page(listing)` with 502 when the catalog failed.
pub fn respond<T>(hx: HxRequest, listing: ListingView, page: impl FnOnce(ListingView) -> T) -> Response
where
    T: IntoResponse,
{
    if hx.is_fragment() {
        let push_url = listing.href.clone();
        return (
            vary_on_htmx(),
            AppendHeaders([(HX_PUSH_URL, push_url)]),
            ListingTemplate { listing },
        )
            .into_response();
    }

    let status = if listing.error.is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (status, vary_on_htmx(), page(listing)).into_response()
}
