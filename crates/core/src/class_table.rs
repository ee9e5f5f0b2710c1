//! Player-class id to class display name mapping.
//!
//! The upstream search endpoint only reports a numeric `pcId`; detail
//! endpoints report the textual class name. Every advancement tier of a base
//! class has its own id, so four consecutive ids map to one display name.
//!
//! This is the only copy of the table in the workspace. Bump
//! [`CLASS_TABLE_VERSION`] whenever an entry is added or changed; class
//! backfill reports carry it so runs can be tied to a table revision.

use serde::Serialize;

/// Version of [`PC_ID_TO_CLASS_NAME`].
pub const CLASS_TABLE_VERSION: u32 = 1;

/// Placeholder stored when a class has not been resolved yet.
pub const UNKNOWN_CLASS: &str = "Unknown";

/// Prefix used by clients that forward a raw, unresolved pcId (`pcId:27`).
pub const RAW_PC_ID_PREFIX: &str = "pcId:";

pub const GLADIATOR: &str = "검성";
pub const TEMPLAR: &str = "수호성";
pub const RANGER: &str = "궁성";
pub const ASSASSIN: &str = "살성";
pub const SPIRITMASTER: &str = "정령성";
pub const SORCERER: &str = "마도성";
pub const CLERIC: &str = "치유성";
pub const CHANTER: &str = "호법성";

/// `(pc_id, class_name)` pairs, sorted by id.
pub const PC_ID_TO_CLASS_NAME: &[(i32, &str)] = &[
    (6, GLADIATOR),
    (7, GLADIATOR),
    (8, GLADIATOR),
    (9, GLADIATOR),
    (10, TEMPLAR),
    (11, TEMPLAR),
    (12, TEMPLAR),
    (13, TEMPLAR),
    (14, RANGER),
    (15, RANGER),
    (16, RANGER),
    (17, RANGER),
    (18, ASSASSIN),
    (19, ASSASSIN),
    (20, ASSASSIN),
    (21, ASSASSIN),
    (22, SPIRITMASTER),
    (23, SPIRITMASTER),
    (24, SPIRITMASTER),
    (25, SPIRITMASTER),
    (26, SORCERER),
    (27, SORCERER),
    (28, SORCERER),
    (29, SORCERER),
    (30, CLERIC),
    (31, CLERIC),
    (32, CLERIC),
    (33, CLERIC),
    (34, CHANTER),
    (35, CHANTER),
    (36, CHANTER),
    (37, CHANTER),
];

/// Outcome of looking up a pcId.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ClassResolution {
    Resolved(&'static str),
    Unresolved(i32),
}

impl ClassResolution {
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            ClassResolution::Resolved(name) => Some(name),
            ClassResolution::Unresolved(_) => None,
        }
    }
}

/// Resolve a pcId through the table.
pub fn resolve_pc_id(pc_id: i32) -> ClassResolution {
    match PC_ID_TO_CLASS_NAME.binary_search_by_key(&pc_id, |&(id, _)| id) {
        Ok(idx) => ClassResolution::Resolved(PC_ID_TO_CLASS_NAME[idx].1),
        Err(_) => ClassResolution::Unresolved(pc_id),
    }
}

/// Parse a class value that is actually a raw pcId (`"pcId:27"` or `"27"`).
///
/// Returns `None` when the value is ordinary text.
pub fn parse_raw_pc_id(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix(RAW_PC_ID_PREFIX).unwrap_or(trimmed);
    digits.trim().parse().ok()
}

/// `true` when a stored class name is missing or the `Unknown` placeholder.
pub fn is_unresolved_class(class_name: Option<&str>) -> bool {
    match class_name {
        None => true,
        Some(name) => name.trim().is_empty() || name == UNKNOWN_CLASS,
    }
}
