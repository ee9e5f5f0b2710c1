//! Upstream response envelopes.
//!
//! Upstream shapes drift, so only the fields this service reads are typed
//! and all of them are optional. Section payloads stay `serde_json::Value`.

use serde::{Deserialize, Serialize};

/// Parameters for `GET /search/v2/character`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub server_id: Option<i32>,
    /// Numeric race filter (`1` Elyos, `2` Asmodian).
    pub race: Option<i32>,
    pub page: u32,
    pub size: u32,
}

/// Response of the search endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub list: Vec<SearchEntry>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub end_page: u32,
}

/// One search hit. Names come back with `<strong>` highlighting.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    #[serde(default)]
    pub character_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub character_name: Option<String>,
    #[serde(default)]
    pub server_id: Option<i32>,
    #[serde(default)]
    pub server_name: Option<String>,
    #[serde(default)]
    pub level: Option<i32>,
    #[serde(default)]
    pub race: Option<i64>,
    #[serde(default)]
    pub pc_id: Option<i32>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl SearchEntry {
    /// The raw display name, whichever field upstream populated.
    pub fn display_name(&self) -> Option<&str> {
        self.character_name
            .as_deref()
            .or(self.name.as_deref())
            .filter(|n| !n.trim().is_empty())
    }
}

/// Response of `GET /character/info`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CharacterInfo {
    pub profile: serde_json::Value,
    #[serde(default)]
    pub stat: Option<serde_json::Value>,
    #[serde(default)]
    pub title: Option<serde_json::Value>,
    #[serde(default)]
    pub ranking: Option<serde_json::Value>,
    #[serde(default)]
    pub daevanion: Option<serde_json::Value>,
}

impl CharacterInfo {
    /// Read the typed scalar subset of `profile`.
    pub fn summary(&self) -> Result<ProfileSummary, serde_json::Error> {
        ProfileSummary::deserialize(&self.profile)
    }
}

/// The scalar fields of a profile blob that the cache pipeline stores.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    #[serde(default)]
    pub character_id: Option<String>,
    #[serde(default)]
    pub character_name: Option<String>,
    #[serde(default)]
    pub server_id: Option<i32>,
    #[serde(default)]
    pub character_level: Option<i32>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub pc_id: Option<i32>,
    #[serde(default)]
    pub race_id: Option<i64>,
    #[serde(default)]
    pub race_name: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Response of `GET /character/equipment`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CharacterEquipment {
    #[serde(default)]
    pub equipment: Option<serde_json::Value>,
    #[serde(default)]
    pub skill: Option<serde_json::Value>,
    #[serde(default)]
    pub petwing: Option<serde_json::Value>,
}
