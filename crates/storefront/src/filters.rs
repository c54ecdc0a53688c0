//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Turns a category slug into a label: `home-decoration` becomes
/// `home decoration`.
///
/// Usage in templates: `{{ slug|humanize }}`
#[askama::filter_fn]
pub fn humanize(slug: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(vitrine_core::taxonomy::humanize(&slug.to_string()))
}
