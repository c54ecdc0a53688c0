//! Product card carousel fragments (HTMX).
//!
//! The card posts its current image order; the server rotates it and
//! returns the new carousel block. No catalog request is made.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State};
use serde::Deserialize;
use tracing::instrument;
use url::Url;
use vitrine_core::Carousel;

use crate::error::{AppError, Result};
use crate::routes::listing::CarouselView;
use crate::state::AppState;

/// Upper bound on images accepted from a posted carousel.
const MAX_IMAGES: usize = 50;

/// Carousel rotation form.
#[derive(Debug, Deserialize)]
pub struct CarouselForm {
    pub product_id: u32,
    #[serde(default)]
    pub title: String,
    /// JSON array of image URLs in display order.
    pub images: String,
}

/// Carousel fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/carousel.html")]
pub struct CarouselTemplate {
    pub carousel: CarouselView,
}

/// Rotate forward: the first image moves to the back.
#[instrument(skip(state, form), fields(product_id = form.product_id))]
pub async fn next(
    State(state): State<AppState>,
    Form(form): Form<CarouselForm>,
) -> Result<CarouselTemplate> {
    rotate(&state, form, Carousel::next)
}

/// Rotate backward: the last image moves to the front.
#[instrument(skip(state, form), fields(product_id = form.product_id))]
pub async fn previous(
    State(state): State<AppState>,
    Form(form): Form<CarouselForm>,
) -> Result<CarouselTemplate> {
    rotate(&state, form, Carousel::previous)
}

fn rotate(
    state: &AppState,
    form: CarouselForm,
    step: impl FnOnce(Carousel) -> Carousel,
) -> Result<CarouselTemplate> {
    let images = parse_images(&form.images)?;
    let carousel = step(Carousel::new(images));

    Ok(CarouselTemplate {
        carousel: CarouselView::new(
            form.product_id,
            &form.title,
            &carousel,
            &state.config().fallback_image_url,
        ),
    })
}

/// Parse and validate the posted image list.
fn parse_images(raw: &str) -> Result<Vec<String>> {
    let images: Vec<String> = serde_json::from_str(raw)
        .map_err(|e| AppError::BadRequest(format!("images must be a JSON array of URLs: {e}")))?;

    if images.len() > MAX_IMAGES {
        return Err(AppError::BadRequest(format!(
            "at most {MAX_IMAGES} images are accepted"
        )));
    }

    for image in &images {
        let url = Url::parse(image)
            .map_err(|e| AppError::BadRequest(format!("invalid image URL '{image}': {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::BadRequest(format!(
                "image URL '{image}' must use http or https"
            )));
        }
    }

    Ok(images)
}
