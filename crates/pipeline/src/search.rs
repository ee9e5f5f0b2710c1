//! Character search: local store and upstream proxy.

use atreia_core::error::CoreError;
use atreia_core::search::{
    clamp_limit, escape_like, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, UPSTREAM_SEARCH_PAGE_SIZE,
};
use atreia_core::types::ServerId;
use atreia_db::models::character::CharacterSummary;
use atreia_db::repositories::CharacterRepo;
use atreia_gameapi::models::{SearchQuery, SearchResponse};
use atreia_gameapi::CharacterSource;
use sqlx::PgPool;

use crate::error::PipelineError;

fn required_name(name: &str) -> Result<&str, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("name is required".into()));
    }
    Ok(name)
}

/// Case-insensitive substring search over stored names.
pub async fn search_local(
    pool: &PgPool,
    name: &str,
    server_id: Option<ServerId>,
    limit: Option<i64>,
) -> Result<Vec<CharacterSummary>, PipelineError> {
    let name = required_name(name)?;
    let limit = clamp_limit(limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT);
    Ok(CharacterRepo::search_by_name(pool, &escape_like(name), server_id, limit).await?)
}

/// Forward a name search to upstream, one page at a time.
pub async fn search_upstream(
    source: &dyn CharacterSource,
    name: &str,
    server_id: Option<ServerId>,
    race: Option<i32>,
    page: Option<u32>,
) -> Result<SearchResponse, PipelineError> {
    let name = required_name(name)?;
    let query = SearchQuery {
        keyword: name.to_string(),
        server_id,
        race,
        page: page.unwrap_or(1).max(1),
        size: UPSTREAM_SEARCH_PAGE_SIZE,
    };
    Ok(source.search(&query).await?)
}
