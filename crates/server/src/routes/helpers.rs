//! Shared route helpers for page rendering.

use axum::response::Html;
use tera::Context;

use crate::error::AppResult;
use crate::state::AppState;

/// Start a page context with the site-wide variables every page expects.
///
/// Adds: `search_query` (shown in the navigation search box).
pub fn page_context(search_query: &str) -> Context {
    let mut context = Context::new();
    context.insert("search_query", search_query);
    context
}

/// Render a page template into an HTML response body.
pub fn render_page(state: &AppState, template: &str, context: &Context) -> AppResult<Html<String>> {
    let html = state.theme().render(template, context)?;
    Ok(Html(html))
}

/// First value of a query parameter. Later repeats are ignored.
pub fn first_param(pairs: &[(String, String)], name: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

/// Parse a compound id path segment.
///
/// Only plain non-negative decimal integers are ids; anything else
/// (signs, whitespace, overflow) is treated as a missing compound.
pub fn parse_cid(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
