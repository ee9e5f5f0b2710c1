pub mod admin;
pub mod character;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /characters/fetch                        cache-aside fetch (POST)
/// /characters/refresh                      forced refresh (POST)
/// /characters/sync                         batch sync (POST)
/// /characters/sync-job                     authoritative sync (POST)
/// /characters/search                       local search (GET)
/// /characters/search/upstream              upstream search proxy (POST)
///
/// /admin/collector                         run one cycle (GET, POST)
/// /admin/collector/logs                    recent cycles (GET)
/// /admin/maintenance/purge                 delete by predicate (POST)
/// /admin/maintenance/dedupe                duplicate resolution (POST)
/// /admin/maintenance/backfill-classes      class backfill (POST)
/// /admin/maintenance/clean-names           name cleanup (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/characters", character::router())
        .nest("/admin", admin::router())
}
