//! Search route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{RawQuery, State},
    response::{AppendHeaders, IntoResponse, Response},
};
use tracing::instrument;
use vitrine_core::{ListingParams, ListingQuery};

use crate::filters;
use crate::middleware::{HX_PUSH_URL, HxRequest, vary_on_htmx};
use crate::routes::listing::{self, ListingView};
use crate::state::AppState;

/// Path of the search results page.
pub const SEARCH_PATH: &str = "/search";

/// Search results page template.
///
/// `listing` is absent when no search text was given.
#[derive(Template, WebTemplate)]
#[template(path = "pages/search.html")]
pub struct SearchTemplate {
    pub query: String,
    pub listing: Option<ListingView>,
}

/// The search prompt alone, swapped in place of the listing.
#[derive(Template, WebTemplate)]
#[template(path = "partials/search_prompt.html")]
pub struct SearchPromptTemplate;

/// Display search results.
///
/// Results go through the same listing composer as `/products`, so
/// pagination, sort and category apply to them too. A blank query renders the
/// prompt without calling the catalog.
#[instrument(skip_all, fields(htmx = hx.is_fragment()))]
pub async fn index(
    State(state): State<AppState>,
    hx: HxRequest,
    RawQuery(raw_query): RawQuery,
) -> Response {
    let query = ListingQuery::from_params(&ListingParams::from_query_str(raw_query.as_deref()));

    let Some(text) = query.search().map(String::from) else {
        if hx.is_fragment() {
            return (
                vary_on_htmx(),
                AppendHeaders([(HX_PUSH_URL, SEARCH_PATH)]),
                SearchPromptTemplate,
            )
                .into_response();
        }
        return (
            vary_on_htmx(),
            SearchTemplate {
                query: String::new(),
                listing: None,
            },
        )
            .into_response();
    };

    if let Some(redirect) =
        listing::canonical_redirect(hx, &query, raw_query.as_deref(), SEARCH_PATH)
    {
        return redirect;
    }

    tracing::debug!(query = %text, "Searching products");

    let view = listing::load_listing(
        &state,
        &query,
        SEARCH_PATH,
        format!("No products found for \"{text}\"."),
    )
    .await;

    listing::respond(hx, view, |listing| SearchTemplate {
        query: text,
        listing: Some(listing),
    })
}
