//! Repository for the `entries` table.
//!
//! Callers pass an explicit `cutoff` (Unix seconds). A row is live while
//! `created > cutoff`; rows at or below the cutoff are expired.

use sqlx::SqlitePool;

use crate::models::entry::{CreateEntry, Entry};

const ENTRY_COLUMNS: &str = "id, created, type, password_hash, data";

/// Provides persistence operations for share entries.
pub struct EntryRepo;

impl EntryRepo {
    /// Delete every row created at or before `cutoff`. Returns the number of
    /// rows removed.
    pub async fn sweep_expired(pool: &SqlitePool, cutoff: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM entries WHERE created <= ?")
            .bind(cutoff)
            .execute(pool)
            .await?;
        let removed = result.rows_affected();
        if removed > 0 {
            tracing::debug!(removed, cutoff, "Swept expired entries");
        }
        Ok(removed)
    }

    /// Insert a new row. Fails with a unique violation if the id is taken.
    pub async fn create(pool: &SqlitePool, input: &CreateEntry<'_>) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO entries (id, created, type, password_hash, data) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(input.id)
        .bind(input.created)
        .bind(input.entry_type.code())
        .bind(input.password_hash)
        .bind(input.data)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a live row by id.
    pub async fn find_live(
        pool: &SqlitePool,
        id: &str,
        cutoff: i64,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = ? AND created > ?");
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(cutoff)
            .fetch_optional(pool)
            .await
    }

    /// Delete a row by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM entries WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of rows currently stored, live or not.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM entries")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
