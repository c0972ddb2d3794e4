//! Dashboard API router.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use dockdash_runtime::engine::Engine;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Engine backing every endpoint.
    pub engine: Arc<Engine>,
}

/// Creates the dashboard router.
///
/// API routes live under `/api`; every other path is served from
/// `static_dir`, falling back to its `index.html` so client-side routes
/// resolve.
#[must_use]
pub fn create_router(engine: Arc<Engine>, static_dir: &Path) -> Router {
    let state = AppState { engine };
    let ui = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/settings", get(handlers::settings))
        .route("/api/containers", get(handlers::list_containers))
        .route("/api/containers/{id}/start", post(handlers::start_container))
        .route("/api/containers/{id}/stop", post(handlers::stop_container))
        .route("/api/containers/{id}/logs", get(handlers::container_logs))
        .fallback_service(ui)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
