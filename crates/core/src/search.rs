//! Search pagination defaults and helpers.

/// Default number of local search results.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Maximum number of local search results.
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Page size used when proxying an interactive upstream search.
pub const UPSTREAM_SEARCH_PAGE_SIZE: u32 = 30;

/// Default number of collector log entries returned.
pub const DEFAULT_LOG_LIMIT: i64 = 50;

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Escape `%`, `_` and `\` so user input is matched literally by `ILIKE`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
