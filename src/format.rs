//! Display helpers for output cells

use crate::types::CellValue;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is by the legacy `escape()` URL encoding
const ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'@')
    .remove(b'*')
    .remove(b'_')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'/');

/// Display text of generated map links
pub const MAP_LINK_TEXT: &str = "View on Google Maps";

/// Shorten a full name to the first name and the initial of the second token
///
/// ```
/// use pantry_logistics::format::truncate_name;
///
/// assert_eq!(truncate_name("Jane Doe"), "Jane D");
/// assert_eq!(truncate_name("Madonna"), "Madonna");
/// ```
pub fn truncate_name(name: &str) -> String {
    let mut parts = name.split_whitespace();
    match (parts.next(), parts.next().and_then(|p| p.chars().next())) {
        (Some(first), Some(initial)) => format!("{} {}", first, initial),
        _ => name.to_string(),
    }
}

/// Map search URL for an intersection in `city`
pub fn map_url(intersection: &str, city: &str) -> String {
    format!(
        "https://maps.google.com?q={},+{}",
        utf8_percent_encode(intersection, ESCAPE_SET),
        utf8_percent_encode(city, ESCAPE_SET)
    )
}

/// Hyperlink formula pointing at `intersection`
///
/// The sentinel passes through unchanged and a blank intersection yields an
/// empty cell, so unresolved locations never turn into a search link.
pub fn map_link(intersection: &str, city: &str, sentinel: &str) -> CellValue {
    let trimmed = intersection.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if trimmed == sentinel {
        return CellValue::String(sentinel.to_string());
    }

    CellValue::Formula(format!(
        "=HYPERLINK(\"{}\", \"{}\")",
        map_url(trimmed, city),
        MAP_LINK_TEXT
    ))
}
