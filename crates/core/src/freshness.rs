//! Cache freshness rules for stored character records.

use crate::types::Timestamp;

/// Default time-to-live of a scraped record: 5 minutes.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Whether a record scraped at `scraped_at` may still be served at `now`.
///
/// A record is fresh while `now - scraped_at < ttl_secs`. Records that were
/// never scraped (created by sync or the collector) are always stale, as are
/// records whose timestamp lies in the future by more than the TTL.
pub fn is_fresh(scraped_at: Option<Timestamp>, now: Timestamp, ttl_secs: u64) -> bool {
    let Some(scraped_at) = scraped_at else {
        return false;
    };
    let age = now.signed_duration_since(scraped_at);
    let ttl = i64::try_from(ttl_secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .unwrap_or(chrono::Duration::MAX);
    age < ttl && age > -ttl
}
