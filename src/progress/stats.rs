use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::progress::stars::{rate_lesson, MAX_STARS_PER_LESSON};
use crate::store::operations::catalog::Level;
use crate::store::operations::progress::ProgressRecord;
use crate::store::operations::users::UserCounters;
use crate::store::{Store, StoreError};

/// Gaps between consecutive progress updates at or above this cutoff are
/// treated as idle time between sessions and excluded entirely (not capped).
pub const SESSION_TIMEOUT_MINUTES: i64 = 15;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub levels: Vec<Level>,
    pub completed_lessons: usize,
    pub total_lessons: usize,
    pub study_time_hours: f64,
    pub accuracy: f64,
    pub earned_stars: u32,
    pub total_stars: u32,
}

/// Estimate active study time from the ascending `updated_at` sequence of a
/// user's progress records. Consecutive rapid updates are assumed to be
/// continuous study; this is a heuristic, not a session tracker.
pub fn study_time_hours(timestamps: &[DateTime<Utc>]) -> f64 {
    let timeout = Duration::minutes(SESSION_TIMEOUT_MINUTES);
    let mut total = Duration::zero();
    for pair in timestamps.windows(2) {
        let gap = pair[1] - pair[0];
        if gap < timeout {
            total = total + gap;
        }
    }
    total.num_milliseconds() as f64 / 3_600_000.0
}

/// Percentage of correct attempts; zero attempts yields zero, not a division
/// error.
pub fn accuracy_percent(counters: &UserCounters) -> f64 {
    if counters.total_attempts == 0 {
        return 0.0;
    }
    counters.total_correct as f64 / counters.total_attempts as f64 * 100.0
}

/// Build the account-wide view: level list, lesson completion counts, star
/// totals, accuracy, and estimated study time for one user.
pub fn account_summary(store: &Store, user_id: &str) -> Result<AccountSummary, StoreError> {
    let levels = store.list_levels()?;
    let lessons = store.list_all_lessons()?;
    let records = store.list_progress_for_user(user_id)?;
    let counters = store.get_user_counters(user_id)?;

    let by_sentence: HashMap<i64, &ProgressRecord> =
        records.iter().map(|r| (r.sentence_id, r)).collect();

    let mut completed_lessons = 0;
    let mut earned_stars: u32 = 0;
    for lesson in &lessons {
        let sentences = store.list_sentences(lesson.id)?;
        let rating = rate_lesson(&sentences, &by_sentence);
        if rating.complete {
            completed_lessons += 1;
        }
        earned_stars += u32::from(rating.stars);
    }

    let timestamps: Vec<DateTime<Utc>> = records.iter().map(|r| r.updated_at).collect();

    Ok(AccountSummary {
        completed_lessons,
        total_lessons: lessons.len(),
        study_time_hours: study_time_hours(&timestamps),
        accuracy: accuracy_percent(&counters),
        earned_stars,
        total_stars: lessons.len() as u32 * u32::from(MAX_STARS_PER_LESSON),
        levels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes_after(base: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
        base + Duration::minutes(minutes)
    }

    #[test]
    fn study_time_sums_only_short_gaps() {
        let base = Utc::now();
        // 5-minute gap counts; the following 20-minute gap is a session
        // boundary and contributes nothing.
        let timestamps = vec![base, minutes_after(base, 5), minutes_after(base, 25)];
        let hours = study_time_hours(&timestamps);
        assert!((hours - 5.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn study_time_of_single_update_is_zero() {
        assert_eq!(study_time_hours(&[Utc::now()]), 0.0);
        assert_eq!(study_time_hours(&[]), 0.0);
    }

    #[test]
    fn exact_timeout_gap_is_excluded() {
        let base = Utc::now();
        let timestamps = vec![base, minutes_after(base, SESSION_TIMEOUT_MINUTES)];
        assert_eq!(study_time_hours(&timestamps), 0.0);
    }

    #[test]
    fn accuracy_handles_zero_attempts() {
        let counters = UserCounters {
            total_attempts: 0,
            total_correct: 0,
        };
        assert_eq!(accuracy_percent(&counters), 0.0);
    }

    #[test]
    fn accuracy_is_a_percentage() {
        let counters = UserCounters {
            total_attempts: 8,
            total_correct: 6,
        };
        assert!((accuracy_percent(&counters) - 75.0).abs() < 1e-9);
    }
}
