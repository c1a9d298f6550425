//! Entry store.
//!
//! Persists encoded payloads under generated ids and enforces the entry
//! lifespan. Expiry is lazy: every operation first deletes rows whose age has
//! reached the lifespan, and lookups additionally ignore such rows, so no
//! caller ever observes an expired entry.

use std::sync::Arc;

use cgshare_core::clock::Clock;
use cgshare_core::codec;
use cgshare_core::entry::{EntryPayload, EntryType};
use cgshare_core::error::{CoreError, CoreResult};
use cgshare_core::ids::{IdGenerator, RandomIds};
use cgshare_core::types::{Timestamp, ENTRY_LIFESPAN_SECS};
use cgshare_db::models::entry::CreateEntry;
use cgshare_db::repositories::EntryRepo;
use cgshare_db::DbPool;

use crate::auth::password::hash_password;

/// Insert attempts before giving up on finding a free id.
pub const MAX_INSERT_ATTEMPTS: usize = 3;

/// A live entry as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub id: String,
    /// Creation time, Unix seconds.
    pub created: i64,
    pub entry_type: EntryType,
    pub password_hash: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct EntryStore {
    pool: DbPool,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl EntryStore {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            clock,
            ids: Arc::new(RandomIds),
        }
    }

    /// Replace the id source.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Current time according to the store's clock.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Store `payload` under a fresh id and return the id.
    ///
    /// The password, if any, is hashed before anything is written. A hashing
    /// failure aborts with [`CoreError::Hashing`] and leaves storage untouched.
    pub async fn put(&self, payload: &EntryPayload, password: Option<&str>) -> CoreResult<String> {
        let data = codec::encode(payload)?;
        let password_hash = match password {
            Some(password) => Some(hash_in_background(password.to_string()).await?),
            None => None,
        };

        let now = self.now().timestamp();
        self.sweep(now - ENTRY_LIFESPAN_SECS).await;

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let id = self.ids.generate();
            let row = CreateEntry {
                id: &id,
                created: now,
                entry_type: payload.entry_type(),
                password_hash: password_hash.as_deref(),
                data: &data,
            };

            match EntryRepo::create(&self.pool, &row).await {
                Ok(()) => {
                    tracing::info!(
                        entry_id = %id,
                        entry_type = %payload.entry_type(),
                        protected = password_hash.is_some(),
                        "Entry stored",
                    );
                    return Ok(id);
                }
                Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                    tracing::warn!(attempt, entry_id = %id, "Entry id collision, retrying");
                }
                Err(e) => return Err(storage_failure(e)),
            }
        }

        tracing::error!(attempts = MAX_INSERT_ATTEMPTS, "No free entry id found");
        Err(CoreError::Storage(format!(
            "no free id after {MAX_INSERT_ATTEMPTS} attempts"
        )))
    }

    /// Fetch a live entry.
    pub async fn get(&self, id: &str) -> CoreResult<StoredEntry> {
        let cutoff = self.cutoff();
        self.sweep(cutoff).await;

        let row = EntryRepo::find_live(&self.pool, id, cutoff)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| CoreError::NotFound { id: id.to_string() })?;

        let entry_type = row.kind().ok_or_else(|| {
            CoreError::MalformedPayload(format!("unknown entry type code {}", row.entry_type))
        })?;

        Ok(StoredEntry {
            id: row.id,
            created: row.created,
            entry_type,
            password_hash: row.password_hash,
            data: row.data,
        })
    }

    /// Remove an entry. Deleting an absent id is not an error; the return
    /// value reports whether a row was removed.
    pub async fn delete(&self, id: &str) -> CoreResult<bool> {
        self.sweep(self.cutoff()).await;
        let removed = EntryRepo::delete(&self.pool, id)
            .await
            .map_err(storage_failure)?;
        if removed {
            tracing::info!(entry_id = %id, "Entry deleted");
        }
        Ok(removed)
    }

    /// Rows created at or before this instant (Unix seconds) are expired.
    fn cutoff(&self) -> i64 {
        self.now().timestamp() - ENTRY_LIFESPAN_SECS
    }

    /// Purge expired rows. Lookups filter on the same cutoff, so a failed
    /// sweep is logged and the operation continues.
    async fn sweep(&self, cutoff: i64) {
        if let Err(e) = EntryRepo::sweep_expired(&self.pool, cutoff).await {
            tracing::error!(error = %e, cutoff, "Failed to sweep expired entries");
        }
    }
}

async fn hash_in_background(password: String) -> CoreResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| CoreError::Hashing(e.to_string()))?
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            CoreError::Hashing(e.to_string())
        })
}

fn storage_failure(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Entry storage failed");
    CoreError::Storage(err.to_string())
}
