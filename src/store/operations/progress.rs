use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

/// Per-(user, sentence) learning state. Absence of a record is the implicit
/// "unseen" state; a record is created on first attempt and then only
/// updated, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub user_id: String,
    pub sentence_id: i64,
    pub status: ProgressStatus,
    pub correct_streak: u32,
    pub next_review_at: DateTime<Utc>,
    pub mistake_count: u32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Learning,
    Mastered,
}

/// The write half of the upsert contract. `mistake_delta` is added to the
/// stored count, never overwritten, which keeps the count monotone no matter
/// how writes interleave.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpsert {
    pub status: ProgressStatus,
    pub correct_streak: u32,
    pub next_review_at: DateTime<Utc>,
    pub mistake_delta: u32,
    pub updated_at: DateTime<Utc>,
}

impl ProgressUpsert {
    /// Materialize a full record given the previously stored mistake count
    /// (zero for an unseen sentence).
    pub fn into_record(
        &self,
        user_id: &str,
        sentence_id: i64,
        prior_mistake_count: u32,
    ) -> ProgressRecord {
        ProgressRecord {
            user_id: user_id.to_string(),
            sentence_id,
            status: self.status,
            correct_streak: self.correct_streak,
            next_review_at: self.next_review_at,
            mistake_count: prior_mistake_count + self.mistake_delta,
            updated_at: self.updated_at,
        }
    }
}

impl Store {
    pub fn get_progress(
        &self,
        user_id: &str,
        sentence_id: i64,
    ) -> Result<Option<ProgressRecord>, StoreError> {
        let key = keys::progress_key(user_id, sentence_id);
        match self.progress.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    /// Atomic insert-or-update for one (user, sentence) pair. Runs as a sled
    /// transaction: the stored mistake count is read and the delta applied
    /// inside it, so two racing upserts produce one of the two outcomes and
    /// never a corrupted merge.
    pub fn upsert_progress(
        &self,
        user_id: &str,
        sentence_id: i64,
        upsert: &ProgressUpsert,
    ) -> Result<ProgressRecord, StoreError> {
        let key = keys::progress_key(user_id, sentence_id);

        self.progress
            .transaction(|tx| {
                let prior_mistakes = match tx.get(key.as_bytes())? {
                    Some(raw) => {
                        let existing: ProgressRecord =
                            serde_json::from_slice(&raw).map_err(|e| {
                                sled::transaction::ConflictableTransactionError::Abort(
                                    StoreError::Serialization(e),
                                )
                            })?;
                        existing.mistake_count
                    }
                    None => 0,
                };

                let record = upsert.into_record(user_id, sentence_id, prior_mistakes);
                let bytes = serde_json::to_vec(&record).map_err(|e| {
                    sled::transaction::ConflictableTransactionError::Abort(
                        StoreError::Serialization(e),
                    )
                })?;
                tx.insert(key.as_bytes(), bytes)?;
                Ok(record)
            })
            .map_err(
                |error: sled::transaction::TransactionError<StoreError>| match error {
                    sled::transaction::TransactionError::Abort(store_error) => store_error,
                    sled::transaction::TransactionError::Storage(storage_error) => {
                        StoreError::Sled(storage_error)
                    }
                },
            )
    }

    /// All progress records for one user, ascending by `updated_at` (the
    /// order the study-time heuristic consumes).
    pub fn list_progress_for_user(&self, user_id: &str) -> Result<Vec<ProgressRecord>, StoreError> {
        let prefix = keys::progress_prefix(user_id);
        let mut records = Vec::new();
        for item in self.progress.scan_prefix(prefix.as_bytes()) {
            let (_, value) = item?;
            records.push(Self::deserialize::<ProgressRecord>(&value)?);
        }
        records.sort_by_key(|r| r.updated_at);
        Ok(records)
    }
}
