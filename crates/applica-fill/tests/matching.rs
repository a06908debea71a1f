//! Property tests for normalization, enrichment, and label-based matching.

use applica_fill::{
    FillEngine, FormDocument, HtmlDocument, enrich, normalize_for_match, split_full_name,
};
use applica_model::{FieldValue, ProfileRecord};
use proptest::prelude::*;

#[test]
fn separators_and_case_do_not_matter() {
    assert_eq!(
        normalize_for_match("First-Name_1"),
        normalize_for_match("firstname1")
    );
    assert_eq!(
        normalize_for_match("E MAIL"),
        normalize_for_match("e_mail")
    );
}

#[test]
fn label_in_a_sibling_wrapper_identifies_the_control() {
    let mut doc = HtmlDocument::parse(
        r#"<div class="field">
             <label>Postal code</label>
             <div class="wrap"><input type="text" id="q7"></div>
           </div>"#,
    );
    let report = FillEngine::default().fill(&mut doc, &ProfileRecord::new().with("zip", "10001"));
    let input = doc
        .elements()
        .into_iter()
        .find(|&el| doc.attribute(el, "id") == Some("q7"))
        .unwrap();
    assert_eq!(report.element_for("zip"), Some(input));
    assert_eq!(doc.value_of(input).as_deref(), Some("10001"));
}

proptest! {
    #[test]
    fn normalization_is_idempotent(raw in "\\PC{0,40}") {
        let once = normalize_for_match(&raw);
        prop_assert_eq!(normalize_for_match(&once), once);
    }

    #[test]
    fn normalized_text_has_no_separators(raw in "[A-Za-z _\\-\t]{0,40}") {
        let normalized = normalize_for_match(&raw);
        prop_assert!(!normalized.contains([' ', '_', '-', '\t']));
        prop_assert!(!normalized.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn split_names_rejoin_to_the_collapsed_full_name(
        words in prop::collection::vec("[A-Za-z]{1,10}", 1..5),
        pad in "[ \t]{0,3}",
    ) {
        let full = format!("{pad}{}{pad}", words.join("  "));
        let (first, last) = split_full_name(&full);
        prop_assert_eq!(&first, &words[0]);
        prop_assert_eq!(last, words[1..].join(" "));
    }

    #[test]
    fn enrichment_never_overwrites_present_names(
        full in "[A-Za-z]{1,8} [A-Za-z]{1,8}",
        existing in "[A-Za-z]{1,8}",
    ) {
        let profile = ProfileRecord::new()
            .with("first_name", existing.as_str())
            .with("full_name", full.as_str());
        let enriched = enrich(&profile);
        prop_assert_eq!(enriched.get("first_name"), Some(&FieldValue::from(existing.as_str())));
        prop_assert!(enriched.get("last_name").is_some());
        prop_assert_eq!(enriched.len(), 3);
    }
}
