use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::EntryStore;
use crate::error::StoreError;
use crate::models::{EntryRecord, ManualOverride};

/// Reads from the `entries` and `cycle_overrides` tables.
///
/// `entries.entry_date` is kept as text the way the logging form submits it,
/// so a bad date surfaces as a skipped record rather than a failed query.
/// Rows come back oldest write first; the analyzer keeps the last record per
/// date.
#[derive(Clone)]
pub struct PgEntryStore {
    pool: PgPool,
}

impl PgEntryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore for PgEntryStore {
    async fn fetch_entries(&self, user_id: Uuid) -> Result<Vec<EntryRecord>, StoreError> {
        let rows = sqlx::query_as::<_, EntryRecord>(
            r#"
            SELECT entry_date, flow, symptoms, mood, sleep, steps,
                   exercise, diet, cervical, notes, updated_at
            FROM entries
            WHERE user_id = $1
            ORDER BY updated_at ASC NULLS FIRST
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn fetch_override(&self, user_id: Uuid) -> Result<Option<ManualOverride>, StoreError> {
        let row = sqlx::query_as::<_, ManualOverride>(
            "SELECT avg_cycle_length, avg_period_duration FROM cycle_overrides WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn save_override(&self, user_id: Uuid, manual: ManualOverride) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO cycle_overrides (user_id, avg_cycle_length, avg_period_duration)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET avg_cycle_length = EXCLUDED.avg_cycle_length,
                avg_period_duration = EXCLUDED.avg_period_duration
            "#,
        )
        .bind(user_id)
        .bind(manual.avg_cycle_length)
        .bind(manual.avg_period_duration)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
