//! Route definitions for the character cache.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{character, search, sync};
use crate::state::AppState;

/// Routes mounted at `/characters`.
///
/// ```text
/// POST   /fetch              -> fetch
/// POST   /refresh            -> refresh
/// POST   /sync               -> sync_batch
/// POST   /sync-job           -> sync_job
/// GET    /search             -> search_local
/// POST   /search/upstream    -> search_upstream
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/fetch", post(character::fetch))
        .route("/refresh", post(character::refresh))
        .route("/sync", post(sync::sync_batch))
        .route("/sync-job", post(sync::sync_job))
        .route("/search", get(search::search_local))
        .route("/search/upstream", post(search::search_upstream))
}
