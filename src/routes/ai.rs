use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::extractors::JsonBody;
use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/explain-error", post(explain_error))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainErrorRequest {
    pub prompt: String,
    pub correct_answer: String,
    pub user_answer: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainErrorResponse {
    pub explanation: String,
}

async fn explain_error(
    _auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ExplainErrorRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Nothing to explain without an answer; skip the upstream call.
    if req.user_answer.trim().is_empty() {
        return Ok(ok(ExplainErrorResponse {
            explanation: "The answer was left empty.".to_string(),
        }));
    }

    let explanation = state
        .explainer()
        .explain(&req.prompt, &req.correct_answer, &req.user_answer)
        .await?;

    Ok(ok(ExplainErrorResponse { explanation }))
}
