use chrono::{DateTime, Utc};

use crate::progress::mastery::advance;
use crate::store::operations::progress::ProgressRecord;
use crate::store::{Store, StoreError};

/// Ingest one attempt: load the current record, advance the mastery state,
/// persist it, and bump the account counters.
///
/// The upsert is the authoritative write; if it fails the whole ingestion
/// fails and the counters are untouched. A counter failure after a
/// successful upsert is logged and swallowed — per-sentence state was saved,
/// so the caller still gets a success and accuracy may undercount.
pub fn ingest(
    store: &Store,
    user_id: &str,
    sentence_id: i64,
    correct: bool,
    now: DateTime<Utc>,
) -> Result<ProgressRecord, StoreError> {
    if store.get_sentence(sentence_id)?.is_none() {
        return Err(StoreError::NotFound {
            entity: "sentence".to_string(),
            key: sentence_id.to_string(),
        });
    }

    let current = store.get_progress(user_id, sentence_id)?;
    let upsert = advance(current.as_ref(), correct, now);
    let record = store.upsert_progress(user_id, sentence_id, &upsert)?;

    let correct_delta = u64::from(correct);
    if let Err(e) = store.increment_user_counters(user_id, 1, correct_delta) {
        tracing::warn!(
            user_id,
            sentence_id,
            error = %e,
            "Progress saved but account counters were not updated"
        );
    }

    Ok(record)
}
