//! HTTP route handlers.

pub mod api;
pub mod catalog;
pub mod health;
pub mod helpers;
pub mod info;

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
///
/// Middleware order (last added = first executed): TraceLayer → timeout → routes.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(catalog::router())
        .merge(api::router())
        .merge(info::router())
        .merge(health::router())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
