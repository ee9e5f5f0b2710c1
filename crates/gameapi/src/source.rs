use async_trait::async_trait;

use crate::error::GameApiError;
use crate::models::{CharacterEquipment, CharacterInfo, SearchQuery, SearchResponse};

/// Anything that can answer character search and detail queries.
///
/// [`GameApiClient`](crate::GameApiClient) is the production implementation;
/// tests substitute in-memory sources.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    /// Substring search over character names.
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, GameApiError>;

    /// Profile, stats, titles, rankings and daevanion of one character.
    async fn character_info(
        &self,
        character_id: &str,
        server_id: i32,
    ) -> Result<CharacterInfo, GameApiError>;

    /// Equipment, skills and pet/wing of one character.
    async fn character_equipment(
        &self,
        character_id: &str,
        server_id: i32,
    ) -> Result<CharacterEquipment, GameApiError>;
}
