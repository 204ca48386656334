//! Journal entry repository for database operations

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::{JournalStore, StoreResult};
use crate::models::{JournalEntry, NewEntry};

/// PostgreSQL-backed journal entry repository
#[derive(Clone)]
pub struct JournalRepository {
    pool: PgPool,
}

impl JournalRepository {
    /// Create a new journal entry repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JournalStore for JournalRepository {
    async fn create(&self, new_entry: &NewEntry) -> StoreResult<JournalEntry> {
        info!("Creating journal entry for user {}", new_entry.owner_id);

        let entry = sqlx::query_as::<_, JournalEntry>(
            r#"
            INSERT INTO journal_entries (title, body, created_at, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, body, created_at, owner_id
            "#,
        )
        .bind(&new_entry.title)
        .bind(&new_entry.body)
        .bind(new_entry.created_at)
        .bind(new_entry.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn list_by_owner(&self, owner_id: i32) -> StoreResult<Vec<JournalEntry>> {
        let entries = sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT id, title, body, created_at, owner_id
            FROM journal_entries
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
