//! Collector log model.

use atreia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const TRIGGER_AUTO: &str = "auto";
pub const TRIGGER_MANUAL: &str = "manual";

/// What started a collector cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    /// The background schedule.
    Auto,
    /// An admin request.
    Manual,
}

impl TriggerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::Auto => TRIGGER_AUTO,
            TriggerType::Manual => TRIGGER_MANUAL,
        }
    }
}

/// A row from the `collector_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CollectorLog {
    pub id: DbId,
    pub server_name: String,
    pub keyword: String,
    pub collected_count: i32,
    pub trigger_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a collector cycle.
#[derive(Debug, Clone)]
pub struct CreateCollectorLog {
    pub server_name: String,
    pub keyword: String,
    pub collected_count: i32,
    pub trigger_type: TriggerType,
}
