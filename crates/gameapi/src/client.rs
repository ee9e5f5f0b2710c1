use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::config::GameApiConfig;
use crate::error::GameApiError;
use crate::models::{CharacterEquipment, CharacterInfo, SearchQuery, SearchResponse};
use crate::source::CharacterSource;

/// Language requested from the detail endpoints.
const LANG: &str = "ko";

/// HTTP client for the upstream game API.
///
/// Every request carries the browser-like headers upstream insists on and
/// is bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct GameApiClient {
    client: reqwest::Client,
    config: GameApiConfig,
}

impl GameApiClient {
    /// Build a client with default headers and timeout from `config`.
    pub fn new(config: GameApiConfig) -> Result<Self, GameApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(referer) = HeaderValue::from_str(&config.referer) {
            headers.insert(REFERER, referer);
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GameApiConfig {
        &self.config
    }

    // ---- private helpers ----

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> Result<T, GameApiError> {
        tracing::debug!(%url, "Game API request");
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(%url, status = status.as_u16(), "Game API returned error status");
            return Err(GameApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn detail_query(character_id: &str, server_id: i32) -> [(&'static str, String); 3] {
        [
            ("lang", LANG.to_string()),
            ("characterId", character_id.to_string()),
            ("serverId", server_id.to_string()),
        ]
    }
}

#[async_trait]
impl CharacterSource for GameApiClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, GameApiError> {
        let mut params = vec![
            ("keyword", query.keyword.clone()),
            ("page", query.page.to_string()),
            ("size", query.size.to_string()),
        ];
        if let Some(server_id) = query.server_id {
            params.push(("serverId", server_id.to_string()));
        }
        if let Some(race) = query.race {
            params.push(("race", race.to_string()));
        }

        let url = format!("{}/search/v2/character", self.config.search_base_url);
        self.get_json(url, &params).await
    }

    async fn character_info(
        &self,
        character_id: &str,
        server_id: i32,
    ) -> Result<CharacterInfo, GameApiError> {
        let url = format!("{}/character/info", self.config.api_base_url);
        self.get_json(url, &Self::detail_query(character_id, server_id))
            .await
    }

    async fn character_equipment(
        &self,
        character_id: &str,
        server_id: i32,
    ) -> Result<CharacterEquipment, GameApiError> {
        let url = format!("{}/character/equipment", self.config.api_base_url);
        self.get_json(url, &Self::detail_query(character_id, server_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_default_config() {
        let client = GameApiClient::new(GameApiConfig::default()).unwrap();
        assert_eq!(client.config().timeout_secs, 15);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_request_error() {
        let client = GameApiClient::new(GameApiConfig {
            api_base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
            ..GameApiConfig::default()
        })
        .unwrap();
        let err = client.character_info("abc", 1001).await.unwrap_err();
        assert!(matches!(err, GameApiError::Request(_)));
        assert_eq!(err.status(), None);
    }
}
