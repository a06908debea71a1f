//! Utility functions for matching.

/// Normalizes text for matching by lowercasing and removing every whitespace,
/// underscore, and hyphen character.
///
/// `"First Name"`, `"first_name"`, and `"first-name"` all become `"firstname"`.
pub fn normalize_for_match(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '_' && *ch != '-')
        .collect()
}

/// [`normalize_for_match`] for optional attribute values; absent becomes `""`.
pub fn normalize_optional(raw: Option<&str>) -> String {
    raw.map(normalize_for_match).unwrap_or_default()
}
