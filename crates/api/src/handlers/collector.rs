use atreia_core::sampling::plan_collection;
use atreia_core::search::{clamp_limit, DEFAULT_LOG_LIMIT, MAX_SEARCH_LIMIT};
use atreia_db::models::collector_log::{CollectorLog, TriggerType};
use atreia_db::repositories::CollectorLogRepo;
use atreia_pipeline::collector::{run_collection_cycle, CollectionOutcome};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LogParams {
    pub limit: Option<i64>,
}

/// GET|POST /admin/collector
///
/// Runs one manual cycle. Upstream or store failures are reported inside
/// the 200 response, not as an error status.
pub async fn run_collector(
    State(state): State<AppState>,
) -> Json<DataResponse<CollectionOutcome>> {
    let plan = plan_collection(&mut rand::rng());
    let outcome = run_collection_cycle(
        &state.pool,
        state.source.as_ref(),
        &plan,
        TriggerType::Manual,
        &state.cache.image_host,
    )
    .await;
    Json(DataResponse { data: outcome })
}

/// GET /admin/collector/logs?limit=
pub async fn list_logs(
    State(state): State<AppState>,
    Query(params): Query<LogParams>,
) -> AppResult<Json<DataResponse<Vec<CollectorLog>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LOG_LIMIT, MAX_SEARCH_LIMIT);
    let logs = CollectorLogRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: logs }))
}
