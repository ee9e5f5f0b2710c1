//! Maintenance job constants and predicates.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Rows deleted per batch by a purge.
pub const DEFAULT_PURGE_BATCH_SIZE: i64 = 500;

/// Largest purge batch a caller may request.
pub const MAX_PURGE_BATCH_SIZE: i64 = 5_000;

/// Pause between purge batches, in milliseconds.
pub const PURGE_BATCH_DELAY_MS: u64 = 100;

/// Rows examined per backfill or name-cleanup pass.
pub const DEFAULT_SCAN_LIMIT: i64 = 1_000;

/// Low-quality rows a purge can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurgePredicate {
    /// `level = 0`: incomplete placeholder rows.
    LevelZero,
    /// `class_name = 'Unknown'`.
    UnknownClass,
}

impl PurgePredicate {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurgePredicate::LevelZero => "level_zero",
            PurgePredicate::UnknownClass => "unknown_class",
        }
    }
}

impl std::str::FromStr for PurgePredicate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "level_zero" | "level-zero" => Ok(PurgePredicate::LevelZero),
            "unknown_class" | "unknown-class" => Ok(PurgePredicate::UnknownClass),
            other => Err(CoreError::Validation(format!(
                "Invalid purge predicate '{other}'. Must be one of: level_zero, unknown_class"
            ))),
        }
    }
}

/// Validate a requested purge batch size, applying the default.
pub fn validate_batch_size(batch_size: Option<i64>) -> Result<i64, CoreError> {
    let size = batch_size.unwrap_or(DEFAULT_PURGE_BATCH_SIZE);
    if !(1..=MAX_PURGE_BATCH_SIZE).contains(&size) {
        return Err(CoreError::Validation(format!(
            "Batch size must be between 1 and {MAX_PURGE_BATCH_SIZE}, got {size}"
        )));
    }
    Ok(size)
}
