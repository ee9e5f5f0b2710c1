//! Character entity model and DTOs.

use atreia_core::duplicates::DuplicateCandidate;
use atreia_core::types::{DbId, ServerId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub character_id: String,
    pub server_id: ServerId,
    pub name: String,
    pub level: i32,
    pub class_name: Option<String>,
    pub race_name: Option<String>,
    /// Not derived by this service yet; always 0 when written here.
    pub combat_power: i64,
    pub profile_image: Option<String>,
    pub profile: Option<serde_json::Value>,
    pub stats: Option<serde_json::Value>,
    pub titles: Option<serde_json::Value>,
    pub rankings: Option<serde_json::Value>,
    pub daevanion: Option<serde_json::Value>,
    pub equipment: Option<serde_json::Value>,
    pub skills: Option<serde_json::Value>,
    pub pet_wing: Option<serde_json::Value>,
    pub scraped_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Summary columns only, for search listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CharacterSummary {
    pub id: DbId,
    pub character_id: String,
    pub server_id: ServerId,
    pub name: String,
    pub level: i32,
    pub class_name: Option<String>,
    pub race_name: Option<String>,
    pub profile_image: Option<String>,
    pub updated_at: Timestamp,
}

/// A fully scraped character. Upserting replaces every column.
#[derive(Debug, Clone)]
pub struct NewCharacter {
    pub character_id: String,
    pub server_id: ServerId,
    pub name: String,
    pub level: i32,
    pub class_name: Option<String>,
    pub race_name: String,
    pub combat_power: i64,
    pub profile_image: Option<String>,
    pub profile: serde_json::Value,
    pub stats: Option<serde_json::Value>,
    pub titles: Option<serde_json::Value>,
    pub rankings: Option<serde_json::Value>,
    pub daevanion: Option<serde_json::Value>,
    pub equipment: Option<serde_json::Value>,
    pub skills: Option<serde_json::Value>,
    pub pet_wing: Option<serde_json::Value>,
    pub scraped_at: Timestamp,
}

/// A summary row discovered by the collector or a client sync.
///
/// Inserted only if the key is new; existing rows are never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredCharacter {
    pub character_id: String,
    pub server_id: ServerId,
    pub name: String,
    pub level: i32,
    pub class_name: Option<String>,
    pub race_name: Option<String>,
    pub profile_image: Option<String>,
}

/// Caller-asserted summary that overwrites the stored one.
#[derive(Debug, Clone)]
pub struct AssertedCharacter {
    pub character_id: String,
    pub server_id: ServerId,
    pub name: String,
    pub level: i32,
    pub class_name: String,
    pub race_name: String,
}

/// Identity columns used by duplicate resolution.
#[derive(Debug, Clone, FromRow)]
pub struct CharacterIdentity {
    pub id: DbId,
    pub character_id: String,
    pub name: String,
    pub server_id: ServerId,
    pub class_name: Option<String>,
    pub level: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CharacterIdentity> for DuplicateCandidate {
    fn from(row: CharacterIdentity) -> Self {
        DuplicateCandidate {
            id: row.id,
            character_id: row.character_id,
            name: row.name,
            server_id: row.server_id,
            class_name: row.class_name,
            level: row.level,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A row still carrying the `Unknown` class placeholder.
#[derive(Debug, Clone, FromRow)]
pub struct UnknownClassRow {
    pub id: DbId,
    pub character_id: String,
    pub name: String,
    pub profile: Option<serde_json::Value>,
}

/// A row whose stored name still contains markup.
#[derive(Debug, Clone, FromRow)]
pub struct NamedRow {
    pub id: DbId,
    pub name: String,
}
