//! Option resolution for `<select>` controls.
//!
//! Yes/no questions are answered by token sets covering the usual spellings,
//! including the decline-to-answer family for `false`. Other fields (gender,
//! race, state, ...) are answered by normalized text comparison.

use applica_model::{FieldKey, FieldValue};

use crate::document::SelectOption;
use crate::utils::normalize_for_match;

/// Accepted option tokens for a `true` answer.
pub const TRUE_TOKENS: [&str; 4] = ["yes", "true", "1", "y"];

/// Accepted option tokens for a `false` answer.
///
/// Plain "no" and decline-to-answer spellings share one bucket.
pub const FALSE_TOKENS: [&str; 14] = [
    "no",
    "false",
    "0",
    "n",
    "prefernottosay",
    "decline",
    "dontwish",
    "idontwish",
    "rathernot",
    "choosenot",
    "noanswer",
    "notspecified",
    "none",
    "na",
];

/// Finds the option to select for a profile value.
///
/// Disabled options are never chosen. Exact matches are preferred over
/// substring matches; within a pass the first option in definition order wins.
pub fn find_matching_option<'a>(
    options: &'a [SelectOption],
    field: FieldKey,
    value: &FieldValue,
    fill_text: &str,
) -> Option<&'a SelectOption> {
    let candidates: Vec<(&SelectOption, String)> = options
        .iter()
        .filter(|option| !option.disabled)
        .map(|option| (option, normalize_for_match(option.match_text())))
        .filter(|(_, normalized)| !normalized.is_empty())
        .collect();
    if candidates.is_empty() {
        return None;
    }

    if field.is_boolean()
        && let Some(answer) = value.as_bool()
    {
        let accept: &[&str] = if answer { &TRUE_TOKENS } else { &FALSE_TOKENS };
        return first_where(&candidates, |text| accept.contains(&text)).or_else(|| {
            first_where(&candidates, |text| {
                accept
                    .iter()
                    .any(|token| text.contains(token) || token.contains(text))
            })
        });
    }

    let wanted = normalize_for_match(fill_text);
    first_where(&candidates, |text| text == wanted).or_else(|| {
        if wanted.is_empty() {
            return None;
        }
        first_where(&candidates, |text| {
            text.contains(wanted.as_str()) || wanted.contains(text)
        })
    })
}

fn first_where<'a>(
    candidates: &[(&'a SelectOption, String)],
    predicate: impl Fn(&str) -> bool,
) -> Option<&'a SelectOption> {
    candidates
        .iter()
        .find(|(_, normalized)| predicate(normalized.as_str()))
        .map(|(option, _)| *option)
}
