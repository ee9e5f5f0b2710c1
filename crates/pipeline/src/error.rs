use atreia_core::error::CoreError;
use atreia_gameapi::GameApiError;

/// Failure of a pipeline service.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] GameApiError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
