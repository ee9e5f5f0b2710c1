use std::sync::Arc;

use atreia_gameapi::CharacterSource;
use atreia_pipeline::character::CacheSettings;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: atreia_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Upstream game API (a fake in tests).
    pub source: Arc<dyn CharacterSource>,
    /// Cache TTL and image host used by the fetch path and the collector.
    pub cache: Arc<CacheSettings>,
}
