//! Route definitions for collector and maintenance operations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{collector, maintenance};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET, POST  /collector                          -> run_collector
/// GET        /collector/logs                     -> list_logs
/// POST       /maintenance/purge                  -> purge
/// POST       /maintenance/dedupe                 -> dedupe
/// POST       /maintenance/backfill-classes       -> backfill_classes
/// POST       /maintenance/clean-names            -> clean_names
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/collector",
            get(collector::run_collector).post(collector::run_collector),
        )
        .route("/collector/logs", get(collector::list_logs))
        .route("/maintenance/purge", post(maintenance::purge))
        .route("/maintenance/dedupe", post(maintenance::dedupe))
        .route(
            "/maintenance/backfill-classes",
            post(maintenance::backfill_classes),
        )
        .route("/maintenance/clean-names", post(maintenance::clean_names))
}
