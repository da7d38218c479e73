use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::keys;
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    /// Account-wide counters, mutated only through `increment_user_counters`.
    pub total_attempts: u64,
    pub total_correct: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCounters {
    pub total_attempts: u64,
    pub total_correct: u64,
}

impl Store {
    pub fn create_user(&self, user: &User) -> Result<(), StoreError> {
        let email_key = keys::user_email_index_key(&user.email);

        // Atomic compare-and-swap on the email index: two concurrent
        // registrations with the same email cannot both pass an existence
        // check, so the index entry itself is the uniqueness guard.
        let cas_result = self
            .users
            .compare_and_swap(
                email_key.as_bytes(),
                None::<&[u8]>,
                Some(user.id.as_bytes().to_vec()),
            )
            .map_err(StoreError::Sled)?;

        if cas_result.is_err() {
            return Err(StoreError::Conflict {
                entity: "user_email".to_string(),
                key: user.email.clone(),
            });
        }

        let user_key = keys::user_key(&user.id);
        let user_bytes = Self::serialize(user)?;
        if let Err(e) = self.users.insert(user_key.as_bytes(), user_bytes) {
            let _ = self.users.remove(email_key.as_bytes());
            return Err(StoreError::Sled(e));
        }

        Ok(())
    }

    pub fn get_user_by_id(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        let key = keys::user_key(user_id);
        match self.users.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let index_key = keys::user_email_index_key(email);
        let Some(user_id_raw) = self.users.get(index_key.as_bytes())? else {
            return Ok(None);
        };
        let user_id = match String::from_utf8(user_id_raw.to_vec()) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid UTF-8 in user email index");
                return Ok(None);
            }
        };
        self.get_user_by_id(&user_id)
    }

    pub fn get_user_counters(&self, user_id: &str) -> Result<UserCounters, StoreError> {
        let user = self
            .get_user_by_id(user_id)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "user".to_string(),
                key: user_id.to_string(),
            })?;
        Ok(UserCounters {
            total_attempts: user.total_attempts,
            total_correct: user.total_correct,
        })
    }

    /// Atomically add to the account-wide attempt counters. Runs as a sled
    /// transaction so concurrent ingestions never lose an increment.
    pub fn increment_user_counters(
        &self,
        user_id: &str,
        attempts_delta: u64,
        correct_delta: u64,
    ) -> Result<(), StoreError> {
        let key = keys::user_key(user_id);

        self.users
            .transaction(|tx| {
                let raw = tx.get(key.as_bytes())?.ok_or_else(|| {
                    sled::transaction::ConflictableTransactionError::Abort(StoreError::NotFound {
                        entity: "user".to_string(),
                        key: user_id.to_string(),
                    })
                })?;
                let mut user: User = serde_json::from_slice(&raw).map_err(|e| {
                    sled::transaction::ConflictableTransactionError::Abort(
                        StoreError::Serialization(e),
                    )
                })?;

                user.total_attempts += attempts_delta;
                user.total_correct += correct_delta;
                user.updated_at = Utc::now();

                let bytes = serde_json::to_vec(&user).map_err(|e| {
                    sled::transaction::ConflictableTransactionError::Abort(
                        StoreError::Serialization(e),
                    )
                })?;
                tx.insert(key.as_bytes(), bytes)?;
                Ok(())
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
}
