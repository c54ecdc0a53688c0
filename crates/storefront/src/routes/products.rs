//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, RawQuery, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};
use tracing::instrument;
use url::form_urlencoded;
use vitrine_core::{Gallery, ListingParams, ListingQuery, Product, ProductId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::HxRequest;
use crate::routes::listing::{self, ListingView};
use crate::state::AppState;

/// Path of the product listing.
pub const PRODUCTS_PATH: &str = "/products";

/// Product detail data for templates.
#[derive(Clone, Debug)]
pub struct ProductView {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub price: String,
    pub description: String,
    pub tags: Vec<String>,
    pub rating: Option<f64>,
    pub stock: Option<u32>,
    pub reviews: Vec<ReviewView>,
}

/// Review display data for templates.
#[derive(Clone, Debug)]
pub struct ReviewView {
    pub name: String,
    pub date: String,
    pub comment: String,
    pub rating: f64,
}

/// A gallery thumbnail.
#[derive(Clone, Debug)]
pub struct ThumbnailView {
    pub url: String,
    pub href: String,
    pub selected: bool,
    pub number: usize,
}

/// The detail-page gallery.
#[derive(Clone, Debug)]
pub struct GalleryView {
    pub main_image: Option<String>,
    pub thumbnails: Vec<ThumbnailView>,
    pub fallback_image_url: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_u32(),
            title: product.title.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            tags: product.tags.clone(),
            rating: product.visible_rating(),
            stock: product.visible_stock(),
            reviews: product
                .reviews
                .iter()
                .map(|review| ReviewView {
                    name: review.name.clone(),
                    date: review.date.to_string(),
                    comment: review.comment.clone(),
                    rating: review.rating,
                })
                .collect(),
        }
    }
}

impl GalleryView {
    fn new(product_id: ProductId, gallery: &Gallery, fallback_image_url: &str) -> Self {
        let thumbnails = if gallery.has_thumbnails() {
            gallery
                .images()
                .iter()
                .enumerate()
                .map(|(index, url)| ThumbnailView {
                    url: url.clone(),
                    href: format!("/product/{product_id}?image={index}"),
                    selected: index == gallery.selected(),
                    number: index + 1,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            main_image: gallery.main_image().map(String::from),
            thumbnails,
            fallback_image_url: fallback_image_url.to_string(),
        }
    }
}

/// Gallery index selected by `?image=N`.
///
/// Missing or malformed values select the first image; the last `image` key
/// wins when it repeats.
#[must_use]
pub fn selected_image(raw_query: Option<&str>) -> usize {
    form_urlencoded::parse(raw_query.unwrap_or_default().as_bytes())
        .filter(|(key, _)| key == "image")
        .last()
        .and_then(|(_, index)| index.trim().parse::<usize>().ok())
        .unwrap_or(0)
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub listing: ListingView,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub gallery: GalleryView,
}

/// Display the product listing.
#[instrument(skip_all, fields(htmx = hx.is_fragment()))]
pub async fn index(
    State(state): State<AppState>,
    hx: HxRequest,
    RawQuery(raw_query): RawQuery,
) -> Response {
    let query = ListingQuery::from_params(&ListingParams::from_query_str(raw_query.as_deref()));

    if let Some(redirect) =
        listing::canonical_redirect(hx, &query, raw_query.as_deref(), PRODUCTS_PATH)
    {
        return redirect;
    }

    let view = listing::load_listing(
        &state,
        &query,
        PRODUCTS_PATH,
        "No products found.".to_string(),
    )
    .await;

    listing::respond(hx, view, |listing| ProductsIndexTemplate { listing })
}

/// Display a product's detail page.
///
/// `?image=N` selects the gallery image shown large.
/// An id that is not a number is a missing product.
#[instrument(skip(state, raw_query))]
pub async fn show(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    RawQuery(raw_query): RawQuery,
) -> Result<impl IntoResponse> {
    let Path(raw_id) = path.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let id = raw_id
        .trim()
        .parse::<u32>()
        .map(ProductId::new)
        .map_err(|_| AppError::NotFound(format!("product {raw_id}")))?;
    let product = state.catalog().get_product(id).await?;

    let selected = selected_image(raw_query.as_deref());
    let gallery = Gallery::new(product.images.clone()).select(selected);

    Ok(ProductShowTemplate {
        product: ProductView::from(&product),
        gallery: GalleryView::new(id, &gallery, &state.config().fallback_image_url),
    })
}
