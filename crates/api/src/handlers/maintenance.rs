//! Handlers for out-of-band data-quality jobs.
//!
//! The same jobs are available from the `atreia-worker` CLI.

use atreia_core::maintenance::{PurgePredicate, DEFAULT_SCAN_LIMIT};
use atreia_pipeline::maintenance::{
    self, BackfillReport, DedupeReport, NameCleanupReport, PurgeReport,
};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeRequest {
    /// `level_zero` or `unknown_class`.
    pub predicate: String,
    pub batch_size: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupeRequest {
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Deserialize)]
pub struct ScanParams {
    pub limit: Option<i64>,
}

impl ScanParams {
    fn limit(&self) -> i64 {
        self.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_SCAN_LIMIT)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /admin/maintenance/purge
pub async fn purge(
    State(state): State<AppState>,
    Json(body): Json<PurgeRequest>,
) -> AppResult<Json<DataResponse<PurgeReport>>> {
    let predicate: PurgePredicate = body.predicate.parse()?;
    let report = maintenance::purge(&state.pool, predicate, body.batch_size).await?;
    Ok(Json(DataResponse { data: report }))
}

/// POST /admin/maintenance/dedupe
pub async fn dedupe(
    State(state): State<AppState>,
    Json(body): Json<DedupeRequest>,
) -> AppResult<Json<DataResponse<DedupeReport>>> {
    let report = maintenance::dedupe(&state.pool, body.dry_run).await?;
    Ok(Json(DataResponse { data: report }))
}

/// POST /admin/maintenance/backfill-classes?limit=
pub async fn backfill_classes(
    State(state): State<AppState>,
    Query(params): Query<ScanParams>,
) -> AppResult<Json<DataResponse<BackfillReport>>> {
    let report = maintenance::backfill_classes(&state.pool, params.limit()).await?;
    Ok(Json(DataResponse { data: report }))
}

/// POST /admin/maintenance/clean-names?limit=
pub async fn clean_names(
    State(state): State<AppState>,
    Query(params): Query<ScanParams>,
) -> AppResult<Json<DataResponse<NameCleanupReport>>> {
    let report = maintenance::clean_names(&state.pool, params.limit()).await?;
    Ok(Json(DataResponse { data: report }))
}
