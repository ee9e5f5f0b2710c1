//! Shared helpers for api integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use atreia_api::config::ServerConfig;
use atreia_api::router::build_app_router;
use atreia_api::state::AppState;
use atreia_gameapi::models::{
    CharacterEquipment, CharacterInfo, SearchEntry, SearchQuery, SearchResponse,
};
use atreia_gameapi::{CharacterSource, GameApiError};
use atreia_pipeline::character::CacheSettings;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// The scheduled collector is off; tests trigger cycles by hand.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        cache_ttl_secs: 300,
        collector_interval_secs: 0,
    }
}

/// Upstream stand-in serving one fixed character and a fixed hit list.
#[derive(Default)]
pub struct StubSource {
    pub fail_status: Option<u16>,
    pub hits: Vec<SearchEntry>,
    pub calls: AtomicUsize,
}

impl StubSource {
    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    pub fn with_hits(hits: Vec<SearchEntry>) -> Self {
        Self {
            hits,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), GameApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_status {
            Some(status) => Err(GameApiError::Status {
                status,
                body: "forbidden".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CharacterSource for StubSource {
    async fn search(&self, _query: &SearchQuery) -> Result<SearchResponse, GameApiError> {
        self.check()?;
        Ok(SearchResponse {
            list: self.hits.clone(),
            pagination: None,
        })
    }

    async fn character_info(
        &self,
        character_id: &str,
        server_id: i32,
    ) -> Result<CharacterInfo, GameApiError> {
        self.check()?;
        Ok(serde_json::from_value(json!({
            "profile": {
                "characterId": character_id,
                "characterName": "<b>Tester</b>",
                "serverId": server_id,
                "characterLevel": 45,
                "className": "마도성",
                "raceId": 2,
                "profileImage": "/p/tester.png"
            },
            "stat": { "statList": [] }
        }))
        .unwrap())
    }

    async fn character_equipment(
        &self,
        _character_id: &str,
        _server_id: i32,
    ) -> Result<CharacterEquipment, GameApiError> {
        self.check()?;
        Ok(CharacterEquipment {
            equipment: Some(json!({ "equipmentList": [] })),
            skill: None,
            petwing: None,
        })
    }
}

/// A search hit in upstream shape.
pub fn hit(character_id: &str, name: &str, level: i32) -> SearchEntry {
    serde_json::from_value(json!({
        "characterId": character_id,
        "characterName": name,
        "level": level,
        "race": 1,
        "pcId": 7
    }))
    .unwrap()
}

/// Build the full application router against a default stub upstream.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_source(pool, StubSource::default())
}

/// Build the full application router with the given upstream.
///
/// Uses [`build_app_router`] so tests exercise the production middleware
/// stack.
pub fn build_test_app_with_source(pool: PgPool, source: impl CharacterSource + 'static) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        source: Arc::new(source),
        cache: Arc::new(CacheSettings {
            ttl_secs: config.cache_ttl_secs,
            image_host: "https://img.test".to_string(),
        }),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
