//! Repository for the `characters` table.

use atreia_core::class_table::UNKNOWN_CLASS;
use atreia_core::maintenance::PurgePredicate;
use atreia_core::types::{DbId, ServerId};
use sqlx::PgPool;

use crate::models::character::{
    AssertedCharacter, Character, CharacterIdentity, CharacterSummary, DiscoveredCharacter,
    NamedRow, NewCharacter, UnknownClassRow,
};

/// Column list for full `characters` queries.
const COLUMNS: &str = "\
    id, character_id, server_id, name, level, class_name, race_name, \
    combat_power, profile_image, profile, stats, titles, rankings, \
    daevanion, equipment, skills, pet_wing, scraped_at, created_at, updated_at";

/// Column list for summary listings.
const SUMMARY_COLUMNS: &str = "\
    id, character_id, server_id, name, level, class_name, race_name, \
    profile_image, updated_at";

/// Rows per multi-row INSERT statement (7 binds each).
const INSERT_CHUNK_SIZE: usize = 500;

/// SQL condition selecting rows targeted by a purge predicate.
fn predicate_clause(predicate: PurgePredicate) -> &'static str {
    match predicate {
        PurgePredicate::LevelZero => "level = 0",
        PurgePredicate::UnknownClass => "class_name = 'Unknown'",
    }
}

/// Provides query operations for cached characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Find a character by its upstream key.
    pub async fn find_by_character_id(
        pool: &PgPool,
        character_id: &str,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE character_id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(character_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or fully overwrite a scraped character, returning the stored row.
    pub async fn upsert(pool: &PgPool, input: &NewCharacter) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters \
                (character_id, server_id, name, level, class_name, race_name, combat_power, \
                 profile_image, profile, stats, titles, rankings, daevanion, equipment, \
                 skills, pet_wing, scraped_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             ON CONFLICT (character_id) DO UPDATE SET \
                server_id = EXCLUDED.server_id, \
                name = EXCLUDED.name, \
                level = EXCLUDED.level, \
                class_name = EXCLUDED.class_name, \
                race_name = EXCLUDED.race_name, \
                combat_power = EXCLUDED.combat_power, \
                profile_image = EXCLUDED.profile_image, \
                profile = EXCLUDED.profile, \
                stats = EXCLUDED.stats, \
                titles = EXCLUDED.titles, \
                rankings = EXCLUDED.rankings, \
                daevanion = EXCLUDED.daevanion, \
                equipment = EXCLUDED.equipment, \
                skills = EXCLUDED.skills, \
                pet_wing = EXCLUDED.pet_wing, \
                scraped_at = EXCLUDED.scraped_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(&input.character_id)
            .bind(input.server_id)
            .bind(&input.name)
            .bind(input.level)
            .bind(&input.class_name)
            .bind(&input.race_name)
            .bind(input.combat_power)
            .bind(&input.profile_image)
            .bind(&input.profile)
            .bind(&input.stats)
            .bind(&input.titles)
            .bind(&input.rankings)
            .bind(&input.daevanion)
            .bind(&input.equipment)
            .bind(&input.skills)
            .bind(&input.pet_wing)
            .bind(input.scraped_at)
            .fetch_one(pool)
            .await
    }

    /// Insert discovered characters whose key is not yet stored.
    ///
    /// Existing rows are left untouched. All chunks run in one transaction,
    /// so either every new row lands or none does. Returns the keys that
    /// were actually inserted.
    pub async fn insert_missing(
        pool: &PgPool,
        rows: &[DiscoveredCharacter],
    ) -> Result<Vec<String>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = pool.begin().await?;
        let mut inserted = Vec::new();

        for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
            let mut query = String::from(
                "INSERT INTO characters \
                    (character_id, server_id, name, level, class_name, race_name, profile_image) \
                 VALUES ",
            );
            let mut idx = 1u32;
            for (i, _) in chunk.iter().enumerate() {
                if i > 0 {
                    query.push_str(", ");
                }
                query.push_str(&format!(
                    "(${}, ${}, ${}, ${}, ${}, ${}, ${})",
                    idx,
                    idx + 1,
                    idx + 2,
                    idx + 3,
                    idx + 4,
                    idx + 5,
                    idx + 6,
                ));
                idx += 7;
            }
            query.push_str(" ON CONFLICT (character_id) DO NOTHING RETURNING character_id");

            let mut q = sqlx::query_scalar::<_, String>(&query);
            for row in chunk {
                q = q
                    .bind(&row.character_id)
                    .bind(row.server_id)
                    .bind(&row.name)
                    .bind(row.level)
                    .bind(&row.class_name)
                    .bind(&row.race_name)
                    .bind(&row.profile_image);
            }
            inserted.extend(q.fetch_all(&mut *tx).await?);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Overwrite the summary columns of one character, creating it if absent.
    ///
    /// Detail blobs and `scraped_at` are not touched.
    pub async fn upsert_summary(
        pool: &PgPool,
        input: &AssertedCharacter,
    ) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (character_id, server_id, name, level, class_name, race_name) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (character_id) DO UPDATE SET \
                server_id = EXCLUDED.server_id, \
                name = EXCLUDED.name, \
                level = EXCLUDED.level, \
                class_name = EXCLUDED.class_name, \
                race_name = EXCLUDED.race_name \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(&input.character_id)
            .bind(input.server_id)
            .bind(&input.name)
            .bind(input.level)
            .bind(&input.class_name)
            .bind(&input.race_name)
            .fetch_one(pool)
            .await
    }

    /// Total number of stored characters.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM characters")
            .fetch_one(pool)
            .await
    }

    /// Case-insensitive substring search on name, best matches first.
    ///
    /// `pattern` must already be LIKE-escaped.
    pub async fn search_by_name(
        pool: &PgPool,
        pattern: &str,
        server_id: Option<ServerId>,
        limit: i64,
    ) -> Result<Vec<CharacterSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM characters \
             WHERE name ILIKE '%' || $1 || '%' \
               AND ($2::INT IS NULL OR server_id = $2) \
             ORDER BY level DESC, updated_at DESC, id DESC \
             LIMIT $3"
        );
        sqlx::query_as::<_, CharacterSummary>(&query)
            .bind(pattern)
            .bind(server_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Count rows matching a purge predicate.
    pub async fn count_matching(
        pool: &PgPool,
        predicate: PurgePredicate,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM characters WHERE {}",
            predicate_clause(predicate)
        );
        sqlx::query_scalar(&query).fetch_one(pool).await
    }

    /// Delete up to `batch_size` rows matching a purge predicate.
    ///
    /// Returns the number of rows removed.
    pub async fn delete_batch_matching(
        pool: &PgPool,
        predicate: PurgePredicate,
        batch_size: i64,
    ) -> Result<u64, sqlx::Error> {
        let query = format!(
            "DELETE FROM characters WHERE id IN \
                (SELECT id FROM characters WHERE {} LIMIT $1)",
            predicate_clause(predicate)
        );
        let result = sqlx::query(&query).bind(batch_size).execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// All rows' identity columns, for duplicate grouping.
    pub async fn list_identities(pool: &PgPool) -> Result<Vec<CharacterIdentity>, sqlx::Error> {
        sqlx::query_as::<_, CharacterIdentity>(
            "SELECT id, character_id, name, server_id, class_name, level, created_at, updated_at \
             FROM characters ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    /// Delete rows by surrogate id. Returns the number removed.
    pub async fn delete_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM characters WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Rows whose class is missing or the `Unknown` placeholder.
    pub async fn list_unknown_class(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<UnknownClassRow>, sqlx::Error> {
        sqlx::query_as::<_, UnknownClassRow>(
            "SELECT id, character_id, name, profile FROM characters \
             WHERE class_name IS NULL OR class_name = $1 \
             ORDER BY id LIMIT $2",
        )
        .bind(UNKNOWN_CLASS)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Set a row's class name. Returns `true` if the row existed.
    pub async fn update_class_name(
        pool: &PgPool,
        id: DbId,
        class_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE characters SET class_name = $2 WHERE id = $1")
            .bind(id)
            .bind(class_name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Rows whose name still contains a `<`.
    pub async fn list_with_markup_names(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<NamedRow>, sqlx::Error> {
        sqlx::query_as::<_, NamedRow>(
            "SELECT id, name FROM characters WHERE name LIKE '%<%' ORDER BY id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Set a row's name. Returns `true` if the row existed.
    pub async fn update_name(pool: &PgPool, id: DbId, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE characters SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
