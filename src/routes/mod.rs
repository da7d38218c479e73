pub mod ai;
pub mod auth;
pub mod health;
pub mod lessons;
pub mod levels;
pub mod progress;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::middleware::request_id;
use crate::state::AppState;

/// Maximum request body size: 1 MiB. Attempt payloads and auth requests are
/// tiny; anything larger is not ours.
const MAX_BODY_SIZE: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/auth", auth::router())
        .nest("/levels", levels::router())
        .nest("/lessons", lessons::router())
        .nest("/progress", progress::router())
        .nest("/ai", ai::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE));

    // Bundled SPA frontend with index fallback.
    let spa_fallback =
        ServeDir::new("static").not_found_service(ServeFile::new("static/index.html"));

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health::router())
        .fallback_service(spa_fallback)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .with_state(state)
}
