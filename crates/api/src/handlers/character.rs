//! Handlers for the cache-aside fetch and forced refresh.
//!
//! Both return the stored row itself (no `data` envelope), including the
//! store-assigned `id` and timestamps.

use atreia_core::types::ServerId;
use atreia_db::models::character::Character;
use atreia_pipeline::character;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Request body for `POST /characters/fetch`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    #[serde(default)]
    pub character_id: String,
    #[serde(default)]
    pub server_id: Option<ServerId>,
    #[serde(default)]
    pub force_refresh: bool,
}

/// Request body for `POST /characters/refresh`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub character_id: String,
    #[serde(default)]
    pub server_id: Option<ServerId>,
}

/// POST /characters/fetch
pub async fn fetch(
    State(state): State<AppState>,
    Json(body): Json<FetchRequest>,
) -> AppResult<Json<Character>> {
    let row = character::fetch_character(
        &state.pool,
        state.source.as_ref(),
        &state.cache,
        &body.character_id,
        body.server_id.unwrap_or_default(),
        body.force_refresh,
    )
    .await?;
    Ok(Json(row))
}

/// POST /characters/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> AppResult<Json<Character>> {
    let row = character::refresh_character(
        &state.pool,
        state.source.as_ref(),
        &state.cache,
        &body.character_id,
        body.server_id.unwrap_or_default(),
    )
    .await?;
    Ok(Json(row))
}
