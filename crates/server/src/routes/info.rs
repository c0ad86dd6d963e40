//! Static informational pages.

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::error::AppResult;
use crate::state::AppState;

use super::helpers::{page_context, render_page};

/// Create the informational pages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/help", get(help))
        .route("/contact", get(contact))
        .route("/about", get(about))
}

async fn help(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_page(&state, "help.html", &page_context(""))
}

async fn contact(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_page(&state, "contact.html", &page_context(""))
}

async fn about(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_page(&state, "about.html", &page_context(""))
}
