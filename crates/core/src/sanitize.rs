//! Normalization of the handful of scalar fields taken from upstream or
//! client payloads: character names, character ids and profile image URLs.

use std::borrow::Cow;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

/// Default host prepended to relative profile image paths.
pub const DEFAULT_IMAGE_HOST: &str = "https://profileimg.plaync.com";

/// Opening or closing tag, including a trailing unterminated one.
static MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[^>]+(>|$)").expect("valid regex"));

/// Strip HTML markup (search results highlight matches with `<strong>`).
pub fn strip_markup(name: &str) -> String {
    MARKUP_RE.replace_all(name, "").trim().to_string()
}

/// `true` if `name` still contains something that looks like markup.
pub fn has_markup(name: &str) -> bool {
    name.contains('<')
}

/// Decode a URL-encoded character id (`...pZ3U%3D` -> `...pZ3U=`).
///
/// `+` is left alone: ids are base64 and `+` is a literal character there.
/// Ids that do not decode to valid UTF-8 are returned unchanged.
pub fn decode_character_id(raw: &str) -> String {
    let trimmed = raw.trim();
    match percent_decode_str(trimmed).decode_utf8() {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => trimmed.to_string(),
    }
}

/// Resolve a profile image reference to an absolute URL.
///
/// Absolute URLs pass through, relative paths are prefixed with `image_host`,
/// and empty values resolve to `None`.
pub fn resolve_profile_image(url: Option<&str>, image_host: &str) -> Option<String> {
    let url = url.map(str::trim).filter(|u| !u.is_empty())?;
    if url.starts_with("http://") || url.starts_with("https://") {
        return Some(url.to_string());
    }
    let host = image_host.trim_end_matches('/');
    if url.starts_with('/') {
        Some(format!("{host}{url}"))
    } else {
        Some(format!("{host}/{url}"))
    }
}
