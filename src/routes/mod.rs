//! Router assembly.

mod common;
mod resources;
pub use common::common_routes;
pub use resources::resource_routes;

use crate::middleware::cors;
use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Full application: common + resource routes, request tracing, CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(resource_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(cors))
}
