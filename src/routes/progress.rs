use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::extractors::JsonBody;
use crate::progress::ingest::ingest;
use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/save", post(save_progress))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProgressRequest {
    pub sentence_id: i64,
    pub is_correct: bool,
}

async fn save_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SaveProgressRequest>,
) -> Result<impl IntoResponse, AppError> {
    let record = ingest(
        state.store(),
        &auth.user_id,
        req.sentence_id,
        req.is_correct,
        Utc::now(),
    )?;
    Ok(ok(record))
}
