//! Opportunistic collector.
//!
//! One cycle searches upstream with a random (server, keyword, page) plan,
//! inserts every character not already stored, and records a
//! `collector_logs` row. Failures are reported in the outcome, never
//! returned as errors, so a scheduler can keep running.

use std::collections::HashSet;

use atreia_core::sampling::CollectionPlan;
use atreia_core::types::ServerId;
use atreia_db::models::collector_log::{CreateCollectorLog, TriggerType};
use atreia_db::repositories::{CharacterRepo, CollectorLogRepo};
use atreia_gameapi::models::SearchQuery;
use atreia_gameapi::{CharacterSource, GameApiError};
use serde::Serialize;
use sqlx::PgPool;

use crate::transform::discovered_from_search;

/// Status reported when the store rejects the batch.
const STORE_FAILURE_STATUS: u16 = 500;

/// Status reported when upstream could not be reached at all.
const UNREACHABLE_STATUS: u16 = 502;

/// A character inserted by this cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCharacterRef {
    pub id: String,
    pub server: ServerId,
    pub name: String,
}

/// Result of one collector cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CollectionOutcome {
    Collected {
        server: String,
        server_id: ServerId,
        keyword: String,
        page: u32,
        /// Hits that mapped to a storable row.
        collected_count: usize,
        /// Rows that were new to the store.
        inserted_count: usize,
        /// Store size after the insert; `None` if the count failed.
        total_characters: Option<i64>,
        new_characters: Vec<NewCharacterRef>,
    },
    Failed {
        error: String,
        status: u16,
        server: String,
        keyword: String,
    },
}

impl CollectionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CollectionOutcome::Collected { .. })
    }
}

/// Run one collector cycle for `plan`.
pub async fn run_collection_cycle(
    pool: &PgPool,
    source: &dyn CharacterSource,
    plan: &CollectionPlan,
    trigger: TriggerType,
    image_host: &str,
) -> CollectionOutcome {
    let server = plan.server;
    tracing::info!(
        server = server.name,
        server_id = server.id,
        keyword = plan.keyword,
        page = plan.page,
        trigger = trigger.as_str(),
        "Collector searching",
    );

    let query = SearchQuery {
        keyword: plan.keyword.to_string(),
        server_id: Some(server.id),
        race: None,
        page: plan.page,
        size: plan.size,
    };

    let response = match source.search(&query).await {
        Ok(response) => response,
        Err(e) => {
            let status = upstream_status(&e);
            tracing::warn!(
                server = server.name,
                keyword = plan.keyword,
                status,
                error = %e,
                "Collector search failed",
            );
            record_log(
                pool,
                server.name,
                &format!("{} (Error {status})", plan.keyword),
                0,
                trigger,
            )
            .await;
            return CollectionOutcome::Failed {
                error: "Search API failed".to_string(),
                status,
                server: server.name.to_string(),
                keyword: plan.keyword.to_string(),
            };
        }
    };

    let mut seen = HashSet::new();
    let rows: Vec<_> = response
        .list
        .iter()
        .filter_map(|entry| discovered_from_search(entry, server.id, image_host))
        .filter(|row| seen.insert(row.character_id.clone()))
        .collect();

    let inserted = match CharacterRepo::insert_missing(pool, &rows).await {
        Ok(inserted) => inserted,
        Err(e) => {
            tracing::error!(server = server.name, error = %e, "Collector insert failed");
            record_log(
                pool,
                server.name,
                &format!("{} (Error {STORE_FAILURE_STATUS})", plan.keyword),
                0,
                trigger,
            )
            .await;
            return CollectionOutcome::Failed {
                error: "Failed to store collected characters".to_string(),
                status: STORE_FAILURE_STATUS,
                server: server.name.to_string(),
                keyword: plan.keyword.to_string(),
            };
        }
    };

    record_log(pool, server.name, plan.keyword, rows.len(), trigger).await;

    let total_characters = match CharacterRepo::count(pool).await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to count characters after collection");
            None
        }
    };

    let inserted_ids: HashSet<&str> = inserted.iter().map(String::as_str).collect();
    let new_characters: Vec<_> = rows
        .iter()
        .filter(|row| inserted_ids.contains(row.character_id.as_str()))
        .map(|row| NewCharacterRef {
            id: row.character_id.clone(),
            server: row.server_id,
            name: row.name.clone(),
        })
        .collect();

    tracing::info!(
        server = server.name,
        keyword = plan.keyword,
        collected = rows.len(),
        inserted = inserted.len(),
        "Collector cycle complete",
    );

    CollectionOutcome::Collected {
        server: server.name.to_string(),
        server_id: server.id,
        keyword: plan.keyword.to_string(),
        page: plan.page,
        collected_count: rows.len(),
        inserted_count: inserted.len(),
        total_characters,
        new_characters,
    }
}

fn upstream_status(error: &GameApiError) -> u16 {
    error.status().unwrap_or(UNREACHABLE_STATUS)
}

/// Write the cycle log. A failed write is logged and swallowed.
async fn record_log(
    pool: &PgPool,
    server_name: &str,
    keyword: &str,
    collected_count: usize,
    trigger_type: TriggerType,
) {
    let log = CreateCollectorLog {
        server_name: server_name.to_string(),
        keyword: keyword.to_string(),
        collected_count: i32::try_from(collected_count).unwrap_or(i32::MAX),
        trigger_type,
    };
    if let Err(e) = CollectorLogRepo::create(pool, &log).await {
        tracing::error!(error = %e, "Failed to write collector log");
    }
}
