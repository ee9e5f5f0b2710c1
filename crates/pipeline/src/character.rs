//! Cache-aside fetch and forced refresh of full character records.

use atreia_core::error::CoreError;
use atreia_core::freshness::{is_fresh, DEFAULT_CACHE_TTL_SECS};
use atreia_core::sanitize::{decode_character_id, DEFAULT_IMAGE_HOST};
use atreia_core::types::ServerId;
use atreia_db::models::character::Character;
use atreia_db::repositories::CharacterRepo;
use atreia_gameapi::CharacterSource;
use chrono::Utc;
use sqlx::PgPool;

use crate::error::PipelineError;
use crate::transform::character_from_upstream;

/// Tunables for the fetch path.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Seconds a scraped row is served without going upstream.
    pub ttl_secs: u64,
    /// Host prepended to relative profile image paths.
    pub image_host: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
            image_host: DEFAULT_IMAGE_HOST.to_string(),
        }
    }
}

fn validate_key(character_id: &str, server_id: ServerId) -> Result<String, CoreError> {
    let decoded = decode_character_id(character_id);
    if decoded.is_empty() {
        return Err(CoreError::Validation("characterId is required".into()));
    }
    if server_id <= 0 {
        return Err(CoreError::Validation("serverId is required".into()));
    }
    Ok(decoded)
}

/// Return the stored record if fresh, otherwise scrape and store it.
pub async fn fetch_character(
    pool: &PgPool,
    source: &dyn CharacterSource,
    settings: &CacheSettings,
    character_id: &str,
    server_id: ServerId,
    force_refresh: bool,
) -> Result<Character, PipelineError> {
    let key = validate_key(character_id, server_id)?;

    if !force_refresh {
        if let Some(stored) = CharacterRepo::find_by_character_id(pool, &key).await? {
            if is_fresh(stored.scraped_at, Utc::now(), settings.ttl_secs) {
                tracing::debug!(character_id = %key, "Character cache hit");
                return Ok(stored);
            }
            tracing::debug!(character_id = %key, "Character cache stale");
        }
    }

    scrape_and_store(pool, source, settings, &key, server_id).await
}

/// Scrape upstream unconditionally and overwrite the stored record.
pub async fn refresh_character(
    pool: &PgPool,
    source: &dyn CharacterSource,
    settings: &CacheSettings,
    character_id: &str,
    server_id: ServerId,
) -> Result<Character, PipelineError> {
    let key = validate_key(character_id, server_id)?;
    scrape_and_store(pool, source, settings, &key, server_id).await
}

async fn scrape_and_store(
    pool: &PgPool,
    source: &dyn CharacterSource,
    settings: &CacheSettings,
    key: &str,
    server_id: ServerId,
) -> Result<Character, PipelineError> {
    let (info, equipment) = tokio::try_join!(
        source.character_info(key, server_id),
        source.character_equipment(key, server_id),
    )?;

    let record = character_from_upstream(
        key,
        server_id,
        info,
        equipment,
        &settings.image_host,
        Utc::now(),
    )?;

    let stored = CharacterRepo::upsert(pool, &record).await?;
    tracing::info!(
        character_id = %stored.character_id,
        server_id = stored.server_id,
        level = stored.level,
        "Character scraped from upstream",
    );
    Ok(stored)
}
