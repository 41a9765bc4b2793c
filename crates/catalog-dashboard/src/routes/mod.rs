//! HTTP route handlers and router configuration

mod admin;
mod api;
mod pages;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(admin::health))
        // Server-rendered dashboard
        .route("/", get(pages::dashboard))
        .route("/products", post(pages::create))
        .route("/products/:id", get(pages::detail).post(pages::update))
        .route("/products/:id/edit", get(pages::edit))
        .route("/products/:id/delete", post(pages::delete))
        // JSON API; the static export segment takes precedence over :id
        .route("/api/products", get(api::list).post(api::create))
        .route("/api/products/export", get(api::export))
        .route(
            "/api/products/:id",
            get(api::get).put(api::update).delete(api::delete),
        )
        .fallback(pages::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
