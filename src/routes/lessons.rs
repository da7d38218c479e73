use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::auth::AuthUser;
use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::store::operations::progress::ProgressStatus;

pub fn router() -> Router<AppState> {
    Router::new().route("/:lesson_id/sentences", get(get_sentences_by_lesson))
}

/// One sentence joined with the caller's progress. `status` and
/// `correctStreak` are null for unseen sentences; `transcription` and
/// `audioPath` are nullable reference data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceView {
    pub id: i64,
    pub lesson_id: i64,
    pub order_number: i32,
    pub prompt: String,
    pub answer: String,
    pub transcription: Option<String>,
    pub audio_path: Option<String>,
    pub status: Option<ProgressStatus>,
    pub correct_streak: Option<u32>,
}

async fn get_sentences_by_lesson(
    auth: AuthUser,
    Path(lesson_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let sentences = state.store().list_sentences(lesson_id)?;

    let mut views = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        let record = state.store().get_progress(&auth.user_id, sentence.id)?;
        views.push(SentenceView {
            id: sentence.id,
            lesson_id: sentence.lesson_id,
            order_number: sentence.order_number,
            prompt: sentence.prompt,
            answer: sentence.answer,
            transcription: sentence.transcription,
            audio_path: sentence.audio_path,
            status: record.as_ref().map(|r| r.status),
            correct_streak: record.as_ref().map(|r| r.correct_streak),
        });
    }

    Ok(ok(views))
}
