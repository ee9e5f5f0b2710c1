//! Class backfill planning for rows stored with the `Unknown` placeholder.
//!
//! The stored `profile` blob of a scraped character carries the numeric
//! `pcId`; resolving it through the class table fixes the summary column.

use serde::Serialize;

use crate::class_table::{resolve_pc_id, ClassResolution};
use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "pc_id", rename_all = "snake_case")]
pub enum BackfillSkip {
    /// No profile blob, or the blob has no usable `pcId`.
    NoPcId,
    /// The pcId is not in the class table.
    UnmappedPcId(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackfillDecision {
    Update { id: DbId, class_name: &'static str },
    Skip { id: DbId, reason: BackfillSkip },
}

/// Extract `pcId` from a profile blob. Accepts numbers and numeric strings.
pub fn profile_pc_id(profile: &serde_json::Value) -> Option<i32> {
    let value = profile.get("pcId")?;
    match value {
        serde_json::Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Decide what to do with one `Unknown`-class row.
pub fn plan_backfill(id: DbId, profile: Option<&serde_json::Value>) -> BackfillDecision {
    let Some(pc_id) = profile.and_then(profile_pc_id) else {
        return BackfillDecision::Skip {
            id,
            reason: BackfillSkip::NoPcId,
        };
    };
    match resolve_pc_id(pc_id) {
        ClassResolution::Resolved(class_name) => BackfillDecision::Update { id, class_name },
        ClassResolution::Unresolved(pc_id) => BackfillDecision::Skip {
            id,
            reason: BackfillSkip::UnmappedPcId(pc_id),
        },
    }
}
