//! HTTP-level tests for the character cache endpoints.

mod common;

use atreia_db::repositories::CharacterRepo;
use axum::http::StatusCode;
use common::{body_json, get, hit, post_json, StubSource};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Fetch / refresh
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fetch_scrapes_and_returns_row(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/characters/fetch",
        json!({ "characterId": "abc%3D", "serverId": 1001 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert_eq!(json["character_id"], "abc=");
    assert_eq!(json["name"], "Tester");
    assert_eq!(json["level"], 45);
    assert_eq!(json["class_name"], "마도성");
    assert_eq!(json["race_name"], "Asmodian");
    assert_eq!(json["profile_image"], "https://img.test/p/tester.png");
    assert!(json["scraped_at"].is_string());

    let stored = CharacterRepo::find_by_character_id(&pool, "abc=").await.unwrap();
    assert!(stored.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fetch_missing_server_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/characters/fetch",
        json!({ "characterId": "abc" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fetch_upstream_failure_returns_500(pool: PgPool) {
    let app = common::build_test_app_with_source(pool.clone(), StubSource::failing(403));
    let response = post_json(
        app,
        "/api/v1/characters/fetch",
        json!({ "characterId": "abc", "serverId": 1001 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(CharacterRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_keeps_row_id(pool: PgPool) {
    let body = json!({ "characterId": "r1", "serverId": 2001 });

    let first = body_json(
        post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/characters/fetch",
            body.clone(),
        )
        .await,
    )
    .await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/characters/refresh",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(CharacterRepo::count(&pool).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Sync
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sync_batch_drops_invalid_records(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/characters/sync",
        json!([
            { "characterId": "s1", "name": "<b>Alpha</b>", "serverId": 1001, "level": 12, "job": "검성", "race": "천족" },
            { "characterId": "s2", "name": "Beta", "serverId": 1001, "level": 0, "job": "검성" },
            { "characterId": "", "name": "Gamma", "serverId": 1001, "level": 5, "job": "검성" }
        ]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["inserted"], 1);
    assert_eq!(json["message"], "Synced 1 characters");

    let row = CharacterRepo::find_by_character_id(&pool, "s1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.name, "Alpha");
    assert_eq!(row.race_name.as_deref(), Some("Elyos"));
    assert!(row.scraped_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sync_empty_batch(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/characters/sync", json!([])).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 0);
    assert_eq!(json["message"], "No data provided");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sync_job_overwrites_summary(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/characters/sync-job",
        json!({ "characterId": "j1", "serverId": 1001, "job": "수호성", "level": 30, "name": "Job", "race": "마족" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/characters/sync-job",
        json!({ "characterId": "j1", "serverId": 1001, "job": "검성", "level": 31, "name": "Job" }),
    )
    .await;

    let row = CharacterRepo::find_by_character_id(&pool, "j1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.class_name.as_deref(), Some("검성"));
    assert_eq!(row.level, 31);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sync_job_requires_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/characters/sync-job",
        json!({ "characterId": "j1", "serverId": 1001, "job": "검성" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing required field: name");
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_local_search_filters_by_name(pool: PgPool) {
    post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/characters/sync",
        json!([
            { "characterId": "a", "name": "Sunrise", "serverId": 1001, "level": 40, "job": "검성" },
            { "characterId": "b", "name": "Moonrise", "serverId": 1001, "level": 50, "job": "검성" },
            { "characterId": "c", "name": "Other", "serverId": 1001, "level": 60, "job": "검성" }
        ]),
    )
    .await;

    let response = get(
        common::build_test_app(pool),
        "/api/v1/characters/search?name=rise",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Moonrise", "Sunrise"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_local_search_requires_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/characters/search").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upstream_search_is_proxied(pool: PgPool) {
    let source = StubSource::with_hits(vec![hit("u1", "Upstream", 33)]);
    let app = common::build_test_app_with_source(pool, source);
    let response = post_json(
        app,
        "/api/v1/characters/search/upstream",
        json!({ "name": "Up", "serverId": 1001 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["list"][0]["characterId"], "u1");
}
