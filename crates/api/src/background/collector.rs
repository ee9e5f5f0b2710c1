//! Scheduled collector cycles.
//!
//! Runs one cycle per tick with trigger type `auto`. Cycle failures are
//! already soft, so the loop only stops on cancellation.

use std::sync::Arc;
use std::time::Duration;

use atreia_core::sampling::plan_collection;
use atreia_db::models::collector_log::TriggerType;
use atreia_gameapi::CharacterSource;
use atreia_pipeline::collector::{run_collection_cycle, CollectionOutcome};
use sqlx::PgPool;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Run the collector loop until `cancel` is triggered.
pub async fn run(
    pool: PgPool,
    source: Arc<dyn CharacterSource>,
    image_host: String,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(interval_secs = interval.as_secs(), "Collector job started");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Collector job stopping");
                break;
            }
            _ = ticker.tick() => {
                let plan = plan_collection(&mut rand::rng());
                let outcome = run_collection_cycle(
                    &pool,
                    source.as_ref(),
                    &plan,
                    TriggerType::Auto,
                    &image_host,
                )
                .await;
                if let CollectionOutcome::Failed { status, .. } = outcome {
                    tracing::debug!(status, "Collector cycle reported failure");
                }
            }
        }
    }
}
