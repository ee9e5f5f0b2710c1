//! Shared fixtures for pipeline integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use atreia_gameapi::models::{
    CharacterEquipment, CharacterInfo, SearchEntry, SearchQuery, SearchResponse,
};
use atreia_gameapi::{CharacterSource, GameApiError};
use serde_json::json;

/// In-memory upstream that counts calls and can be told to fail.
#[derive(Default)]
pub struct FakeSource {
    pub info_calls: AtomicUsize,
    pub equipment_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    /// Status returned by every call when set.
    pub fail_status: Option<u16>,
    /// Level reported by the next info call.
    pub level: Mutex<i32>,
    pub search_hits: Vec<SearchEntry>,
    pub last_query: Mutex<Option<SearchQuery>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            level: Mutex::new(60),
            ..Self::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::new()
        }
    }

    pub fn with_hits(hits: Vec<SearchEntry>) -> Self {
        Self {
            search_hits: hits,
            ..Self::new()
        }
    }

    pub fn set_level(&self, level: i32) {
        *self.level.lock().unwrap() = level;
    }

    pub fn upstream_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst) + self.equipment_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), GameApiError> {
        match self.fail_status {
            Some(status) => Err(GameApiError::Status {
                status,
                body: "upstream unavailable".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CharacterSource for FakeSource {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, GameApiError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        self.check()?;
        Ok(SearchResponse {
            list: self.search_hits.clone(),
            pagination: None,
        })
    }

    async fn character_info(
        &self,
        character_id: &str,
        server_id: i32,
    ) -> Result<CharacterInfo, GameApiError> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let level = *self.level.lock().unwrap();
        Ok(serde_json::from_value(json!({
            "profile": {
                "characterId": character_id,
                "characterName": "<strong>Hero</strong>",
                "serverId": server_id,
                "characterLevel": level,
                "pcId": 7,
                "raceId": 1,
                "profileImage": "/profile/hero.png"
            },
            "stat": { "statList": [{ "type": "STR", "value": 10 }] },
            "title": { "titleList": [] },
            "ranking": { "rankingList": [] },
            "daevanion": { "boardList": [] }
        }))
        .unwrap())
    }

    async fn character_equipment(
        &self,
        _character_id: &str,
        _server_id: i32,
    ) -> Result<CharacterEquipment, GameApiError> {
        self.equipment_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(CharacterEquipment {
            equipment: Some(json!({ "equipmentList": [{ "slotPos": 1 }] })),
            skill: Some(json!({ "skillList": [] })),
            petwing: Some(json!({ "pet": null })),
        })
    }
}

/// A search hit as upstream returns it.
pub fn hit(character_id: &str, name: &str, pc_id: i32, level: i32) -> SearchEntry {
    serde_json::from_value(json!({
        "characterId": character_id,
        "characterName": format!("<strong>{name}</strong>"),
        "serverId": 1001,
        "level": level,
        "race": 2,
        "pcId": pc_id,
        "profileImageUrl": "/img/a.png"
    }))
    .unwrap()
}
