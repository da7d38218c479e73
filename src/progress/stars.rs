use std::collections::HashMap;

use serde::Serialize;

use crate::store::operations::catalog::Sentence;
use crate::store::operations::progress::{ProgressRecord, ProgressStatus};

/// Error density below which a completed lesson still earns two stars.
/// The boundary is strict: exactly 5% errors drops to one star.
pub const TWO_STAR_ERROR_RATIO: f64 = 0.05;

pub const MAX_STARS_PER_LESSON: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRating {
    pub total: usize,
    pub completed: usize,
    /// Sentences the user has ever answered incorrectly.
    pub errors: usize,
    pub complete: bool,
    pub stars: u8,
}

/// Rate one lesson from raw counts. A lesson with no sentences is never
/// complete and earns no stars.
pub fn rate(total: usize, completed: usize, errors: usize) -> LessonRating {
    let complete = total > 0 && completed == total;
    let stars = if !complete {
        0
    } else if errors == 0 {
        MAX_STARS_PER_LESSON
    } else if (errors as f64) / (total as f64) < TWO_STAR_ERROR_RATIO {
        2
    } else {
        1
    };

    LessonRating {
        total,
        completed,
        errors,
        complete,
        stars,
    }
}

/// Rate a lesson against one user's progress records (keyed by sentence id).
pub fn rate_lesson(
    sentences: &[Sentence],
    records: &HashMap<i64, &ProgressRecord>,
) -> LessonRating {
    let total = sentences.len();
    let mut completed = 0;
    let mut errors = 0;
    for sentence in sentences {
        if let Some(record) = records.get(&sentence.id) {
            if record.status == ProgressStatus::Mastered {
                completed += 1;
            }
            if record.mistake_count > 0 {
                errors += 1;
            }
        }
    }
    rate(total, completed, errors)
}
