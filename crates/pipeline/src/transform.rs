//! Mapping of upstream payloads onto storable records.

use atreia_core::class_table::{resolve_pc_id, UNKNOWN_CLASS};
use atreia_core::race::Race;
use atreia_core::sanitize::{decode_character_id, resolve_profile_image, strip_markup};
use atreia_core::types::{ServerId, Timestamp};
use atreia_db::models::character::{DiscoveredCharacter, NewCharacter};
use atreia_gameapi::models::{CharacterEquipment, CharacterInfo, SearchEntry};
use atreia_gameapi::GameApiError;

/// Build a full record from the info and equipment payloads.
///
/// `requested_id` is used as the key when the profile omits `characterId`.
/// The profile text class wins over its `pcId`; a placeholder class or an
/// unmapped id leaves `class_name` empty.
pub fn character_from_upstream(
    requested_id: &str,
    requested_server: ServerId,
    info: CharacterInfo,
    equipment: CharacterEquipment,
    image_host: &str,
    now: Timestamp,
) -> Result<NewCharacter, GameApiError> {
    let summary = info.summary()?;

    let character_id = summary
        .character_id
        .as_deref()
        .map(decode_character_id)
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| decode_character_id(requested_id));

    let class_name = summary
        .class_name
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != UNKNOWN_CLASS)
        .map(str::to_string)
        .or_else(|| {
            summary
                .pc_id
                .and_then(|pc_id| resolve_pc_id(pc_id).class_name())
                .map(str::to_string)
        });

    Ok(NewCharacter {
        character_id,
        server_id: summary.server_id.unwrap_or(requested_server),
        name: strip_markup(summary.character_name.as_deref().unwrap_or_default()),
        level: summary.character_level.unwrap_or(0).max(0),
        class_name,
        race_name: Race::normalize(summary.race_id, summary.race_name.as_deref())
            .as_str()
            .to_string(),
        combat_power: 0,
        profile_image: resolve_profile_image(summary.profile_image.as_deref(), image_host),
        profile: info.profile,
        stats: info.stat,
        titles: info.title,
        rankings: info.ranking,
        daevanion: info.daevanion,
        equipment: equipment.equipment,
        skills: equipment.skill,
        pet_wing: equipment.petwing,
        scraped_at: now,
    })
}

/// Map one search hit to a discovered summary row.
///
/// Hits without a name or id are dropped.
pub fn discovered_from_search(
    entry: &SearchEntry,
    fallback_server: ServerId,
    image_host: &str,
) -> Option<DiscoveredCharacter> {
    let name = strip_markup(entry.display_name()?);
    if name.is_empty() {
        return None;
    }
    let character_id = decode_character_id(entry.character_id.as_deref()?);
    if character_id.is_empty() {
        return None;
    }

    Some(DiscoveredCharacter {
        character_id,
        server_id: entry.server_id.unwrap_or(fallback_server),
        name,
        level: entry.level.unwrap_or(0).max(0),
        class_name: entry
            .pc_id
            .and_then(|pc_id| resolve_pc_id(pc_id).class_name())
            .map(str::to_string),
        race_name: entry
            .race
            .map(|flag| Race::from_flag(flag).as_str().to_string()),
        profile_image: resolve_profile_image(entry.profile_image_url.as_deref(), image_host),
    })
}
