//! Repository for the `collector_logs` table.

use sqlx::PgPool;

use crate::models::collector_log::{CollectorLog, CreateCollectorLog};

/// Column list for `collector_logs` queries.
const COLUMNS: &str = "\
    id, server_name, keyword, collected_count, trigger_type, created_at, updated_at";

/// Provides query operations for collector cycle logs.
pub struct CollectorLogRepo;

impl CollectorLogRepo {
    /// Record one collector cycle.
    pub async fn create(
        pool: &PgPool,
        log: &CreateCollectorLog,
    ) -> Result<CollectorLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO collector_logs (server_name, keyword, collected_count, trigger_type) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CollectorLog>(&query)
            .bind(&log.server_name)
            .bind(&log.keyword)
            .bind(log.collected_count)
            .bind(log.trigger_type.as_str())
            .fetch_one(pool)
            .await
    }

    /// Most recent cycles first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<CollectorLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collector_logs \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, CollectorLog>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
