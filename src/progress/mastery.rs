use chrono::{DateTime, Duration, Utc};

use crate::store::operations::progress::{ProgressRecord, ProgressStatus, ProgressUpsert};

/// Review horizon for mastered sentences: far enough out that they never
/// reappear in rotation (~100 years).
pub const MASTERED_REVIEW_HORIZON_DAYS: i64 = 36_500;

/// The mastery state machine: one correct answer masters a sentence, one
/// incorrect answer sends it (back) to learning with an immediate review.
///
/// Pure function of (current state, outcome, now); total over its domain —
/// an absent record is the implicit "unseen" initial state, not an error.
/// Persistence is the orchestrator's job.
pub fn advance(
    _current: Option<&ProgressRecord>,
    correct: bool,
    now: DateTime<Utc>,
) -> ProgressUpsert {
    if correct {
        ProgressUpsert {
            status: ProgressStatus::Mastered,
            correct_streak: 1,
            next_review_at: now + Duration::days(MASTERED_REVIEW_HORIZON_DAYS),
            mistake_delta: 0,
            updated_at: now,
        }
    } else {
        ProgressUpsert {
            status: ProgressStatus::Learning,
            correct_streak: 0,
            next_review_at: now,
            mistake_delta: 1,
            updated_at: now,
        }
    }
}
