//! Out-of-band data-quality jobs.
//!
//! Each job is safe to re-run: purges stop when nothing matches, dedupe and
//! backfill only touch rows that still need it.

use std::time::Duration;

use atreia_core::backfill::{plan_backfill, BackfillDecision, BackfillSkip};
use atreia_core::class_table::CLASS_TABLE_VERSION;
use atreia_core::duplicates::{resolve_duplicates, DuplicateGroup};
use atreia_core::maintenance::{validate_batch_size, PurgePredicate, PURGE_BATCH_DELAY_MS};
use atreia_core::sanitize::{has_markup, strip_markup};
use atreia_core::types::DbId;
use atreia_db::repositories::CharacterRepo;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurgeReport {
    pub predicate: PurgePredicate,
    pub initial_count: i64,
    pub deleted: u64,
    pub batches: u32,
    /// Rows still matching after the last batch.
    pub remaining: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DedupeReport {
    pub dry_run: bool,
    pub scanned: usize,
    pub groups: Vec<DuplicateGroup>,
    /// Rows selected for removal across all groups.
    pub duplicate_rows: usize,
    pub deleted: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub id: DbId,
    pub character_id: String,
    pub name: String,
    #[serde(flatten)]
    pub reason: BackfillSkip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
    /// Class table the decisions were made against.
    pub class_table_version: u32,
    pub scanned: usize,
    pub updated: usize,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCleanupReport {
    pub scanned: usize,
    pub updated: usize,
}

/// Delete every row matching `predicate` in bounded batches.
///
/// Pauses between batches to keep pressure off the store and stops at the
/// first batch that deletes nothing.
pub async fn purge(
    pool: &PgPool,
    predicate: PurgePredicate,
    batch_size: Option<i64>,
) -> Result<PurgeReport, PipelineError> {
    let batch_size = validate_batch_size(batch_size)?;
    let initial_count = CharacterRepo::count_matching(pool, predicate).await?;
    tracing::info!(
        predicate = predicate.as_str(),
        initial_count,
        batch_size,
        "Purge starting",
    );

    let mut deleted = 0u64;
    let mut batches = 0u32;
    if initial_count > 0 {
        loop {
            let removed = CharacterRepo::delete_batch_matching(pool, predicate, batch_size).await?;
            if removed == 0 {
                break;
            }
            deleted += removed;
            batches += 1;
            tracing::info!(
                predicate = predicate.as_str(),
                batch = batches,
                removed,
                deleted,
                "Purge batch complete",
            );
            tokio::time::sleep(Duration::from_millis(PURGE_BATCH_DELAY_MS)).await;
        }
    }

    let remaining = CharacterRepo::count_matching(pool, predicate).await?;
    if remaining > 0 {
        tracing::warn!(predicate = predicate.as_str(), remaining, "Rows still match after purge");
    }
    tracing::info!(predicate = predicate.as_str(), deleted, batches, "Purge finished");

    Ok(PurgeReport {
        predicate,
        initial_count,
        deleted,
        batches,
        remaining,
    })
}

/// Collapse rows that share `(decoded id, name, server)` to one survivor.
pub async fn dedupe(pool: &PgPool, dry_run: bool) -> Result<DedupeReport, PipelineError> {
    let rows = CharacterRepo::list_identities(pool).await?;
    let scanned = rows.len();
    let groups = resolve_duplicates(rows.into_iter().map(Into::into).collect());

    let to_remove: Vec<DbId> = groups
        .iter()
        .flat_map(|g| g.remove.iter().copied())
        .collect();

    let deleted = if dry_run || to_remove.is_empty() {
        0
    } else {
        CharacterRepo::delete_by_ids(pool, &to_remove).await?
    };

    tracing::info!(
        scanned,
        groups = groups.len(),
        duplicate_rows = to_remove.len(),
        deleted,
        dry_run,
        "Duplicate resolution finished",
    );

    Ok(DedupeReport {
        dry_run,
        scanned,
        duplicate_rows: to_remove.len(),
        groups,
        deleted,
    })
}

/// Resolve the class of `Unknown` rows from their stored `profile.pcId`.
pub async fn backfill_classes(pool: &PgPool, limit: i64) -> Result<BackfillReport, PipelineError> {
    let rows = CharacterRepo::list_unknown_class(pool, limit).await?;
    let scanned = rows.len();
    let mut updated = 0;
    let mut skipped = Vec::new();

    for row in rows {
        match plan_backfill(row.id, row.profile.as_ref()) {
            BackfillDecision::Update { id, class_name } => {
                if CharacterRepo::update_class_name(pool, id, class_name).await? {
                    updated += 1;
                }
            }
            BackfillDecision::Skip { id, reason } => {
                tracing::debug!(id, character_id = %row.character_id, ?reason, "Backfill skipped");
                skipped.push(SkippedRow {
                    id,
                    character_id: row.character_id,
                    name: row.name,
                    reason,
                });
            }
        }
    }

    tracing::info!(
        class_table_version = CLASS_TABLE_VERSION,
        scanned,
        updated,
        skipped = skipped.len(),
        "Class backfill finished",
    );
    Ok(BackfillReport {
        class_table_version: CLASS_TABLE_VERSION,
        scanned,
        updated,
        skipped,
    })
}

/// Re-sanitize stored names that still contain markup.
pub async fn clean_names(pool: &PgPool, limit: i64) -> Result<NameCleanupReport, PipelineError> {
    let rows = CharacterRepo::list_with_markup_names(pool, limit).await?;
    let scanned = rows.len();
    let mut updated = 0;

    for row in rows.into_iter().filter(|r| has_markup(&r.name)) {
        let clean = strip_markup(&row.name);
        if clean != row.name && CharacterRepo::update_name(pool, row.id, &clean).await? {
            updated += 1;
        }
    }

    tracing::info!(scanned, updated, "Name cleanup finished");
    Ok(NameCleanupReport { scanned, updated })
}
