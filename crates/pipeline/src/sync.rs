//! Client-driven sync paths.

use atreia_core::sync::{
    validate_authoritative, validate_observed, AuthoritativeSync, ClientObservedCharacter,
};
use atreia_db::models::character::{AssertedCharacter, Character, DiscoveredCharacter};
use atreia_db::repositories::CharacterRepo;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::PipelineError;

/// Result of a batch sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncBatchReport {
    /// Valid records submitted to the store.
    pub count: usize,
    /// Records that were new to the store.
    pub inserted: usize,
    pub message: String,
}

/// Validate client-observed records and insert the ones not yet stored.
///
/// Invalid records are dropped silently; existing rows are never touched.
pub async fn sync_batch(
    pool: &PgPool,
    records: &[ClientObservedCharacter],
) -> Result<SyncBatchReport, PipelineError> {
    if records.is_empty() {
        return Ok(SyncBatchReport {
            count: 0,
            inserted: 0,
            message: "No data provided".to_string(),
        });
    }

    let rows: Vec<DiscoveredCharacter> = records
        .iter()
        .filter_map(|record| match validate_observed(record) {
            Ok(valid) => Some(valid),
            Err(reason) => {
                tracing::debug!(
                    character_id = %record.character_id,
                    %reason,
                    "Dropping synced record",
                );
                None
            }
        })
        .map(|valid| DiscoveredCharacter {
            character_id: valid.character_id,
            server_id: valid.server_id,
            name: valid.name,
            level: valid.level,
            class_name: Some(valid.class_name),
            race_name: valid.race_name,
            profile_image: valid.profile_image,
        })
        .collect();

    let inserted = CharacterRepo::insert_missing(pool, &rows).await?;

    tracing::info!(
        received = records.len(),
        valid = rows.len(),
        inserted = inserted.len(),
        "Batch sync complete",
    );

    Ok(SyncBatchReport {
        count: rows.len(),
        inserted: inserted.len(),
        message: format!("Synced {} characters", rows.len()),
    })
}

/// Overwrite one character's summary with caller-asserted values.
pub async fn sync_single_authoritative(
    pool: &PgPool,
    input: &AuthoritativeSync,
) -> Result<Character, PipelineError> {
    let valid = validate_authoritative(input)?;

    let stored = CharacterRepo::upsert_summary(
        pool,
        &AssertedCharacter {
            character_id: valid.character_id,
            server_id: valid.server_id,
            name: valid.name,
            level: valid.level,
            class_name: valid.class_name,
            race_name: valid.race_name,
        },
    )
    .await?;

    tracing::info!(
        character_id = %stored.character_id,
        class_name = ?stored.class_name,
        level = stored.level,
        "Authoritative sync stored",
    );
    Ok(stored)
}
