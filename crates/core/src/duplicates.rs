//! Duplicate character resolution.
//!
//! Rows written before ids were consistently decoded can exist twice: once
//! keyed `...%3D` and once `...=`. Rows are grouped by
//! `(decoded character_id, name, server_id)` and exactly one member of each
//! group survives. Pure logic; the maintenance job does the I/O.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::class_table::is_unresolved_class;
use crate::sanitize::decode_character_id;
use crate::types::{DbId, ServerId, Timestamp};

/// Identity columns of one stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateCandidate {
    pub id: DbId,
    pub character_id: String,
    pub name: String,
    pub server_id: ServerId,
    pub class_name: Option<String>,
    pub level: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Resolution of one group with more than one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub decoded_id: String,
    pub name: String,
    pub server_id: ServerId,
    pub keep: DbId,
    pub remove: Vec<DbId>,
}

/// Order two group members so the one to keep sorts first.
///
/// Priority: resolved class, then most recently updated, then most recently
/// created. The surrogate id breaks remaining ties so the result is stable.
pub fn keep_order(a: &DuplicateCandidate, b: &DuplicateCandidate) -> Ordering {
    let a_resolved = !is_unresolved_class(a.class_name.as_deref());
    let b_resolved = !is_unresolved_class(b.class_name.as_deref());
    b_resolved
        .cmp(&a_resolved)
        .then_with(|| b.updated_at.cmp(&a.updated_at))
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

/// Group rows by identity and decide which member of each duplicate group
/// to keep. Groups with a single member are omitted.
pub fn resolve_duplicates(rows: Vec<DuplicateCandidate>) -> Vec<DuplicateGroup> {
    let mut groups: BTreeMap<(String, String, ServerId), Vec<DuplicateCandidate>> =
        BTreeMap::new();
    for row in rows {
        let key = (
            decode_character_id(&row.character_id),
            row.name.clone(),
            row.server_id,
        );
        groups.entry(key).or_default().push(row);
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|((decoded_id, name, server_id), mut members)| {
            members.sort_by(keep_order);
            let keep = members[0].id;
            let remove = members[1..].iter().map(|m| m.id).collect();
            DuplicateGroup {
                decoded_id,
                name,
                server_id,
                keep,
                remove,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn row(id: DbId, character_id: &str, class: Option<&str>, updated_days_ago: i64) -> DuplicateCandidate {
        let now = Utc::now();
        DuplicateCandidate {
            id,
            character_id: character_id.to_string(),
            name: "Foo".to_string(),
            server_id: 1001,
            class_name: class.map(str::to_string),
            level: 50,
            created_at: now - Duration::days(30),
            updated_at: now - Duration::days(updated_days_ago),
        }
    }

    #[test]
    fn resolved_class_beats_recency() {
        let groups = resolve_duplicates(vec![
            row(1, "abc%3D", Some("Unknown"), 1),
            row(2, "abc=", Some("수호성"), 7),
        ]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].keep, 2);
        assert_eq!(groups[0].remove, vec![1]);
        assert_eq!(groups[0].decoded_id, "abc=");
    }

    #[test]
    fn most_recent_update_wins_among_equals() {
        let groups = resolve_duplicates(vec![
            row(1, "abc=", Some("검성"), 5),
            row(2, "abc=", Some("검성"), 2),
            row(3, "abc%3D", None, 0),
        ]);
        assert_eq!(groups[0].keep, 2);
        let mut removed = groups[0].remove.clone();
        removed.sort_unstable();
        assert_eq!(removed, vec![1, 3]);
    }

    #[test]
    fn created_at_breaks_update_ties() {
        let mut older = row(1, "abc=", None, 3);
        let mut newer = row(2, "abc=", None, 3);
        newer.updated_at = older.updated_at;
        older.created_at = newer.created_at - Duration::days(1);
        let groups = resolve_duplicates(vec![older, newer]);
        assert_eq!(groups[0].keep, 2);
    }

    #[test]
    fn different_servers_or_names_are_not_duplicates() {
        let mut other_server = row(2, "abc=", None, 1);
        other_server.server_id = 2001;
        let mut other_name = row(3, "abc=", None, 1);
        other_name.name = "Bar".to_string();
        let groups = resolve_duplicates(vec![row(1, "abc=", None, 1), other_server, other_name]);
        assert!(groups.is_empty());
    }
}
