//! HTMX request detection.
//!
//! HTMX marks its requests with `HX-Request: true`. Listing handlers use this
//! to answer with a fragment plus `HX-Push-Url` instead of a full page.

use axum::{
    extract::FromRequestParts,
    http::{HeaderName, header, request::Parts},
    response::AppendHeaders,
};

/// Header HTMX sets on every request it issues.
pub const HX_REQUEST: &str = "hx-request";

/// Header HTMX sets when the request only targets part of a history-restored
/// page. Such requests need the full page.
pub const HX_HISTORY_RESTORE_REQUEST: &str = "hx-history-restore-request";

/// Response header telling HTMX which URL to push into browser history.
pub const HX_PUSH_URL: &str = "HX-Push-Url";

/// `Vary` value for responses whose body depends on [`HxRequest`].
pub const HX_VARY: &str = "hx-request, hx-history-restore-request";

/// `Vary` header for responses that differ between fragment and full page.
#[must_use]
pub const fn vary_on_htmx() -> AppendHeaders<[(HeaderName, &'static str); 1]> {
    AppendHeaders([(header::VARY, HX_VARY)])
}

/// Whether the request came from HTMX and wants a fragment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HxRequest(pub bool);

impl HxRequest {
    #[must_use]
    pub const fn is_fragment(self) -> bool {
        self.0
    }
}

impl<S> FromRequestParts<S> for HxRequest
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_set = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        };

        Ok(Self(is_set(HX_REQUEST) && !is_set(HX_HISTORY_RESTORE_REQUEST)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(request: Request<()>) -> HxRequest {
        let (mut parts, ()) = request.into_parts();
        HxRequest::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_detects_htmx_requests() {
        let request = Request::builder()
            .header(HX_REQUEST, "true")
            .body(())
            .unwrap();
        assert!(extract(request).await.is_fragment());
    }

    #[tokio::test]
    async fn test_plain_and_history_restore_requests_want_full_page() {
        let request = Request::builder().body(()).unwrap();
        assert!(!extract(request).await.is_fragment());

        let request = Request::builder()
            .header(HX_REQUEST, "true")
            .header(HX_HISTORY_RESTORE_REQUEST, "true")
            .body(())
            .unwrap();
        assert!(!extract(request).await.is_fragment());
    }
}
