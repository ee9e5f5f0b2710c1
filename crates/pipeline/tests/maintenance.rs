//! Maintenance jobs against a real database.

use atreia_core::backfill::BackfillSkip;
use atreia_core::class_table::CLASS_TABLE_VERSION;
use atreia_core::maintenance::PurgePredicate;
use atreia_db::models::character::{DiscoveredCharacter, NewCharacter};
use atreia_db::repositories::CharacterRepo;
use atreia_pipeline::maintenance::{backfill_classes, clean_names, dedupe, purge};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;

fn row(character_id: &str, name: &str, level: i32, class_name: Option<&str>) -> DiscoveredCharacter {
    DiscoveredCharacter {
        character_id: character_id.to_string(),
        server_id: 1001,
        name: name.to_string(),
        level,
        class_name: class_name.map(str::to_string),
        race_name: Some("Elyos".to_string()),
        profile_image: None,
    }
}

fn scraped_unknown(character_id: &str, profile: serde_json::Value) -> NewCharacter {
    NewCharacter {
        character_id: character_id.to_string(),
        server_id: 1001,
        name: character_id.to_string(),
        level: 50,
        class_name: Some("Unknown".to_string()),
        race_name: "Elyos".to_string(),
        combat_power: 0,
        profile_image: None,
        profile,
        stats: None,
        titles: None,
        rankings: None,
        daevanion: None,
        equipment: None,
        skills: None,
        pet_wing: None,
        scraped_at: Utc::now(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purge_deletes_in_batches_until_empty(pool: PgPool) {
    let mut rows: Vec<_> = (0..5).map(|i| row(&format!("z{i}"), "Zero", 0, None)).collect();
    rows.push(row("keep", "Keeper", 30, Some("검성")));
    CharacterRepo::insert_missing(&pool, &rows).await.unwrap();

    let report = purge(&pool, PurgePredicate::LevelZero, Some(2)).await.unwrap();

    assert_eq!(report.initial_count, 5);
    assert_eq!(report.deleted, 5);
    assert_eq!(report.batches, 3);
    assert_eq!(report.remaining, 0);
    assert_eq!(CharacterRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purge_with_nothing_matching(pool: PgPool) {
    let report = purge(&pool, PurgePredicate::UnknownClass, None).await.unwrap();
    assert_eq!(report.deleted, 0);
    assert_eq!(report.batches, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purge_rejects_bad_batch_size(pool: PgPool) {
    assert!(purge(&pool, PurgePredicate::LevelZero, Some(0)).await.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dedupe_keeps_resolved_class(pool: PgPool) {
    CharacterRepo::insert_missing(
        &pool,
        &[
            row("abc%3D", "Dup", 40, Some("검성")),
            row("abc=", "Dup", 40, Some("Unknown")),
            row("solo", "Solo", 40, Some("궁성")),
        ],
    )
    .await
    .unwrap();

    let preview = dedupe(&pool, true).await.unwrap();
    assert_eq!(preview.groups.len(), 1);
    assert_eq!(preview.duplicate_rows, 1);
    assert_eq!(preview.deleted, 0);
    assert_eq!(CharacterRepo::count(&pool).await.unwrap(), 3);

    let report = dedupe(&pool, false).await.unwrap();
    assert_eq!(report.deleted, 1);

    let kept = CharacterRepo::find_by_character_id(&pool, "abc%3D")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.id, report.groups[0].keep);
    assert!(CharacterRepo::find_by_character_id(&pool, "abc=")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_backfill_resolves_from_profile(pool: PgPool) {
    CharacterRepo::upsert(&pool, &scraped_unknown("mapped", json!({ "pcId": 23 })))
        .await
        .unwrap();
    CharacterRepo::upsert(&pool, &scraped_unknown("unmapped", json!({ "pcId": 99 })))
        .await
        .unwrap();
    CharacterRepo::upsert(&pool, &scraped_unknown("empty", json!({})))
        .await
        .unwrap();

    let report = backfill_classes(&pool, 100).await.unwrap();

    assert_eq!(report.class_table_version, CLASS_TABLE_VERSION);
    assert_eq!(report.scanned, 3);
    assert_eq!(report.updated, 1);
    assert_eq!(report.skipped.len(), 2);
    assert!(report
        .skipped
        .iter()
        .any(|s| s.character_id == "unmapped" && s.reason == BackfillSkip::UnmappedPcId(99)));
    assert!(report
        .skipped
        .iter()
        .any(|s| s.character_id == "empty" && s.reason == BackfillSkip::NoPcId));

    let mapped = CharacterRepo::find_by_character_id(&pool, "mapped")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mapped.class_name.as_deref(), Some("정령성"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clean_names_strips_markup(pool: PgPool) {
    CharacterRepo::insert_missing(
        &pool,
        &[
            row("a", "<strong>Bold</strong>", 10, Some("검성")),
            row("b", "Plain", 10, Some("검성")),
        ],
    )
    .await
    .unwrap();

    let report = clean_names(&pool, 100).await.unwrap();
    assert_eq!(report.scanned, 1);
    assert_eq!(report.updated, 1);

    let row = CharacterRepo::find_by_character_id(&pool, "a")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.name, "Bold");
}
