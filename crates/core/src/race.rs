//! Race normalization.
//!
//! Upstream reports race as a numeric flag (`0`/`1` Elyos, `2` Asmodian) and
//! sometimes as localized text. Everything is stored as one of two canonical
//! English values.

use serde::{Deserialize, Serialize};

/// Stored when a caller asserts a record without a race.
pub const UNKNOWN_RACE: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Race {
    Elyos,
    Asmodian,
}

impl Race {
    /// Return the canonical stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Race::Elyos => "Elyos",
            Race::Asmodian => "Asmodian",
        }
    }

    /// Interpret the numeric race flag used by the search endpoint.
    pub fn from_flag(flag: i64) -> Self {
        match flag {
            0 | 1 => Race::Elyos,
            _ => Race::Asmodian,
        }
    }

    /// Parse localized or English text. Returns `None` if unrecognised.
    pub fn from_text(text: &str) -> Option<Self> {
        let normalized = text.trim().to_lowercase();
        if normalized.contains("천족") || normalized.contains("elyos") {
            return Some(Race::Elyos);
        }
        if normalized.contains("마족") || normalized.contains("asmodian") {
            return Some(Race::Asmodian);
        }
        match normalized.as_str() {
            "0" | "1" => Some(Race::Elyos),
            "2" => Some(Race::Asmodian),
            _ => None,
        }
    }

    /// Normalize a profile's `raceId` / `raceName` pair.
    ///
    /// The name wins when it is recognisable; otherwise the id decides.
    /// Falls back to [`Race::Asmodian`] when neither is usable.
    pub fn normalize(race_id: Option<i64>, race_name: Option<&str>) -> Self {
        if let Some(race) = race_name.and_then(Race::from_text) {
            return race;
        }
        match race_id {
            Some(0 | 1) => Race::Elyos,
            _ => Race::Asmodian,
        }
    }
}

impl std::fmt::Display for Race {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
