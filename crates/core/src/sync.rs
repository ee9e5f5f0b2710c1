//! Validation of client-observed character summaries.
//!
//! Clients forward characters they saw while browsing. Batches go through
//! [`validate_observed`] and are inserted without touching existing rows;
//! a single record asserted from a character's own detail page goes through
//! [`validate_authoritative`] and overwrites the stored summary.

use serde::{Deserialize, Serialize};

use crate::class_table::{self, UNKNOWN_CLASS};
use crate::error::CoreError;
use crate::race::{Race, UNKNOWN_RACE};
use crate::sanitize::{decode_character_id, strip_markup};
use crate::types::ServerId;

/// Level stored when an authoritative sync omits it.
pub const DEFAULT_ASSERTED_LEVEL: i32 = 55;

/// A character summary as gathered by a browsing client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientObservedCharacter {
    #[serde(default)]
    pub character_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(alias = "server_id", default)]
    pub server_id: ServerId,
    #[serde(default)]
    pub level: i32,
    /// Class display name, or a raw `pcId:<n>` when the client could not
    /// resolve it.
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A client-observed character that passed validation, ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCharacter {
    pub character_id: String,
    pub server_id: ServerId,
    pub name: String,
    pub level: i32,
    pub class_name: String,
    /// `None` when the client sent no race or one that is not recognised.
    pub race_name: Option<String>,
    pub profile_image: Option<String>,
}

/// Why a client-observed record was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncRejection {
    MissingCharacterId,
    InvalidLevel(i32),
    UnresolvedClass(String),
}

impl std::fmt::Display for SyncRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncRejection::MissingCharacterId => f.write_str("missing characterId"),
            SyncRejection::InvalidLevel(level) => write!(f, "invalid level ({level})"),
            SyncRejection::UnresolvedClass(job) => write!(f, "unresolved class ({job})"),
        }
    }
}

/// Resolve the `job` field to a display name.
///
/// Raw pcIds are looked up in the class table; text is taken as-is.
/// Returns `None` for placeholders and unmapped ids.
fn resolve_job(job: &str) -> Option<String> {
    let job = job.trim();
    if job.is_empty() || job == UNKNOWN_CLASS {
        return None;
    }
    match class_table::parse_raw_pc_id(job) {
        Some(pc_id) => class_table::resolve_pc_id(pc_id)
            .class_name()
            .map(str::to_string),
        None if job.starts_with(class_table::RAW_PC_ID_PREFIX) => None,
        None => Some(job.to_string()),
    }
}

/// Validate and normalize one client-observed record.
pub fn validate_observed(
    record: &ClientObservedCharacter,
) -> Result<ValidatedCharacter, SyncRejection> {
    if record.level <= 0 {
        return Err(SyncRejection::InvalidLevel(record.level));
    }
    let character_id = decode_character_id(&record.character_id);
    if character_id.is_empty() {
        return Err(SyncRejection::MissingCharacterId);
    }
    let class_name =
        resolve_job(&record.job).ok_or_else(|| SyncRejection::UnresolvedClass(record.job.clone()))?;

    Ok(ValidatedCharacter {
        character_id,
        server_id: record.server_id,
        name: strip_markup(&record.name),
        level: record.level,
        class_name,
        race_name: record
            .race
            .as_deref()
            .and_then(Race::from_text)
            .map(|race| race.as_str().to_string()),
        profile_image: record.image_url.clone().filter(|u| !u.trim().is_empty()),
    })
}

/// A single caller-asserted authoritative record (`sync-job`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoritativeSync {
    pub character_id: Option<String>,
    pub server_id: Option<ServerId>,
    pub job: Option<String>,
    pub level: Option<i32>,
    pub race: Option<String>,
    pub name: Option<String>,
}

/// Validated authoritative record. Always overwrites the stored summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoritativeCharacter {
    pub character_id: String,
    pub server_id: ServerId,
    pub name: String,
    pub level: i32,
    pub class_name: String,
    pub race_name: String,
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, CoreError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoreError::Validation(format!("Missing required field: {field}")))
}

/// Validate an authoritative sync request.
///
/// `characterId`, `serverId`, `job` and `name` are required. An unresolvable
/// `job` is kept as the `Unknown` placeholder for a later backfill.
pub fn validate_authoritative(input: &AuthoritativeSync) -> Result<AuthoritativeCharacter, CoreError> {
    let character_id = decode_character_id(required(&input.character_id, "characterId")?);
    let server_id = input
        .server_id
        .filter(|id| *id > 0)
        .ok_or_else(|| CoreError::Validation("Missing required field: serverId".into()))?;
    let job = required(&input.job, "job")?;
    let name = strip_markup(required(&input.name, "name")?);

    let race_name = match input.race.as_deref().and_then(Race::from_text) {
        Some(race) => race.as_str().to_string(),
        None => UNKNOWN_RACE.to_string(),
    };

    Ok(AuthoritativeCharacter {
        character_id,
        server_id,
        name,
        level: input
            .level
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_ASSERTED_LEVEL),
        class_name: resolve_job(job).unwrap_or_else(|| UNKNOWN_CLASS.to_string()),
        race_name,
    })
}
