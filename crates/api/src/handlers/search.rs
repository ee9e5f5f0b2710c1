//! Handlers for local and upstream character search.

use atreia_core::types::ServerId;
use atreia_db::models::character::CharacterSummary;
use atreia_gameapi::models::SearchResponse;
use atreia_pipeline::search;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /characters/search`.
#[derive(Debug, Deserialize)]
pub struct LocalSearchParams {
    #[serde(default)]
    pub name: String,
    pub server_id: Option<ServerId>,
    pub limit: Option<i64>,
}

/// Request body for `POST /characters/search/upstream`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamSearchRequest {
    #[serde(default)]
    pub name: String,
    pub server_id: Option<ServerId>,
    pub race: Option<i32>,
    pub page: Option<u32>,
}

/// GET /characters/search?name=&server_id=&limit=
pub async fn search_local(
    State(state): State<AppState>,
    Query(params): Query<LocalSearchParams>,
) -> AppResult<Json<DataResponse<Vec<CharacterSummary>>>> {
    let rows = search::search_local(&state.pool, &params.name, params.server_id, params.limit)
        .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /characters/search/upstream
///
/// Proxies the upstream response unchanged.
pub async fn search_upstream(
    State(state): State<AppState>,
    Json(body): Json<UpstreamSearchRequest>,
) -> AppResult<Json<SearchResponse>> {
    let response = search::search_upstream(
        state.source.as_ref(),
        &body.name,
        body.server_id,
        body.race,
        body.page,
    )
    .await?;
    Ok(Json(response))
}
