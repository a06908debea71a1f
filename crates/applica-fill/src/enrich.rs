//! Derives `first_name`/`last_name` from `full_name` before a fill pass.
//!
//! Many application forms ask for first and last name separately while the
//! backend profile only carries a full name.

use applica_model::{FieldKey, FieldValue, ProfileRecord};

/// Splits a full name on whitespace runs into `(first, last)`.
///
/// The first token is the first name and the remaining tokens, joined with
/// single spaces, form the last name.
pub fn split_full_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

/// Returns a copy of the profile with split names filled in.
///
/// Only applies when `full_name` is a non-blank string. Existing non-null
/// `first_name`/`last_name` values are never overwritten; missing keys are
/// appended after the existing ones.
pub fn enrich(profile: &ProfileRecord) -> ProfileRecord {
    let mut enriched = profile.clone();
    let Some(full_name) = profile
        .get_field(FieldKey::FullName)
        .and_then(FieldValue::as_text)
        .filter(|name| !name.trim().is_empty())
    else {
        return enriched;
    };

    let (first, last) = split_full_name(full_name);
    if enriched.is_absent(FieldKey::FirstName.as_str()) {
        enriched.set(FieldKey::FirstName.as_str(), first);
    }
    if enriched.is_absent(FieldKey::LastName.as_str()) {
        enriched.set(FieldKey::LastName.as_str(), last);
    }
    enriched
}
