use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::auth::AuthUser;
use crate::progress::stars::rate_lesson;
use crate::progress::stats::account_summary;
use crate::response::{ok, AppError};
use crate::state::AppState;
use crate::store::operations::progress::ProgressRecord;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_levels))
        .route("/:level_id/lessons", get(get_lessons_by_level))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSummary {
    pub id: i64,
    pub level_id: i64,
    pub lesson_number: i32,
    pub title: String,
    pub total_sentences: usize,
    pub completed_sentences: usize,
    pub sentences_with_errors: usize,
    pub stars: u8,
}

/// Account overview: level list plus completion, star, accuracy and
/// study-time statistics for the caller.
async fn get_levels(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = account_summary(state.store(), &auth.user_id)?;
    Ok(ok(summary))
}

/// Lessons of one level with the caller's per-lesson completion and star
/// rating. An unknown level yields an empty list, not an error.
async fn get_lessons_by_level(
    auth: AuthUser,
    Path(level_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let lessons = state.store().list_lessons(level_id)?;
    let records = state.store().list_progress_for_user(&auth.user_id)?;
    let by_sentence: HashMap<i64, &ProgressRecord> =
        records.iter().map(|r| (r.sentence_id, r)).collect();

    let mut summaries = Vec::with_capacity(lessons.len());
    for lesson in lessons {
        let sentences = state.store().list_sentences(lesson.id)?;
        let rating = rate_lesson(&sentences, &by_sentence);
        summaries.push(LessonSummary {
            id: lesson.id,
            level_id: lesson.level_id,
            lesson_number: lesson.lesson_number,
            title: lesson.title,
            total_sentences: rating.total,
            completed_sentences: rating.completed,
            sentences_with_errors: rating.errors,
            stars: rating.stars,
        });
    }

    Ok(ok(summaries))
}
