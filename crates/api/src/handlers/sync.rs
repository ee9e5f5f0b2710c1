use atreia_core::sync::{AuthoritativeSync, ClientObservedCharacter};
use atreia_pipeline::sync::{self as sync_service, SyncBatchReport};
use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// POST /characters/sync
///
/// Accepts the characters a client saw while browsing. Invalid records are
/// dropped; existing rows are never overwritten.
pub async fn sync_batch(
    State(state): State<AppState>,
    Json(records): Json<Vec<ClientObservedCharacter>>,
) -> AppResult<Json<SyncBatchReport>> {
    let report = sync_service::sync_batch(&state.pool, &records).await?;
    Ok(Json(report))
}

/// POST /characters/sync-job
///
/// Overwrites one character's summary with caller-asserted values.
pub async fn sync_job(
    State(state): State<AppState>,
    Json(body): Json<AuthoritativeSync>,
) -> AppResult<Json<SuccessResponse>> {
    sync_service::sync_single_authoritative(&state.pool, &body).await?;
    Ok(Json(SuccessResponse::ok()))
}
