use std::sync::OnceLock;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

fn startup_instant() -> &'static Instant {
    static INSTANCE: OnceLock<Instant> = OnceLock::new();
    INSTANCE.get_or_init(Instant::now)
}

pub fn router() -> Router<AppState> {
    // Record startup time when the router is built.
    let _ = startup_instant();

    Router::new()
        .route("/", get(health_check))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
}

async fn health_check(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let store_healthy = state.store().get_user_by_id("__health_check__").is_ok();
    Json(serde_json::json!({
        "status": if store_healthy { "ok" } else { "degraded" },
        "uptimeSecs": startup_instant().elapsed().as_secs(),
        "store": { "healthy": store_healthy },
    }))
}

async fn liveness() -> StatusCode {
    StatusCode::OK
}

async fn readiness() -> StatusCode {
    StatusCode::OK
}
